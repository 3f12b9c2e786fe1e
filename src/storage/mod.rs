//! Storage layer for IAM Core.
//!
//! Provides database access via SQLx with SQLite.

mod models;
pub(crate) mod repository;

pub use repository::IamRepository;
