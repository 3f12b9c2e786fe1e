//! User domain types.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered account.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique identifier.
    pub id: Uuid,
    /// Email address, unique across all users.
    pub email: String,
    /// Password digest in PHC format.
    pub password: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user from an email and an already-hashed password.
    pub fn new(email: String, password_digest: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password: password_digest,
            created_at: Utc::now(),
        }
    }
}
