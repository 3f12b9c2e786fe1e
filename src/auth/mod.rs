//! Authentication module for IAM Core.
//!
//! - Credentials: sign-up and sign-in against the user store
//! - Hashing: Argon2id password digests
//! - JWT: access token issuing and verification
//! - Guard: per-route strategy selection, wired in as axum middleware

mod credentials;
mod guard;
mod hashing;
pub(crate) mod jwt;
mod middleware;

pub use credentials::*;
pub use guard::*;
pub use hashing::*;
pub use jwt::*;
pub use middleware::*;
