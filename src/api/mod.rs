//! HTTP API layer for IAM Core.
//!
//! Provides REST endpoints for sign-up, sign-in and the caller's identity.

pub mod handlers;
mod routes;
mod types;

pub use routes::build_router;
