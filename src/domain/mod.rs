//! Domain types for IAM Core.

mod user;

pub use user::*;
