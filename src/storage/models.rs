//! Database models for IAM Core.
//!
//! These are the row types returned by SQLx queries.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::User;
use crate::error::IamError;

/// Database row for users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub password: String,
    pub created_at: String,
}

impl TryFrom<UserRow> for User {
    type Error = IamError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: Uuid::parse_str(&row.id).map_err(|e| IamError::Internal(e.to_string()))?,
            email: row.email,
            password: row.password,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .map_err(|e| IamError::Internal(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}
