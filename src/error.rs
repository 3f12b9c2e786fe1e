//! Error types for IAM Core.
//!
//! Defines a unified error type that maps cleanly to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Why a sign-in attempt was refused.
///
/// Kept for logs and tests only; clients always see the same message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialMismatch {
    UserMismatch,
    PasswordMismatch,
}

impl std::fmt::Display for CredentialMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialMismatch::UserMismatch => write!(f, "user does not match"),
            CredentialMismatch::PasswordMismatch => write!(f, "password does not match"),
        }
    }
}

/// Unified error type for IAM operations.
#[derive(Debug, Error)]
pub enum IamError {
    #[error("Account already exists")]
    DuplicateAccount,

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(CredentialMismatch),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Hashing error: {0}")]
    Hashing(String),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for IamError {
    fn from(errors: validator::ValidationErrors) -> Self {
        IamError::BadRequest(errors.to_string())
    }
}

impl IamError {
    /// True when the underlying store rejected a write on a unique constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            IamError::Database(sqlx::Error::Database(e)) => e.is_unique_violation(),
            _ => false,
        }
    }
}

/// Error response body for API clients.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for IamError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            IamError::DuplicateAccount => (
                StatusCode::CONFLICT,
                "DUPLICATE_ACCOUNT",
                "Account already exists".to_string(),
            ),
            IamError::InvalidCredentials(reason) => {
                tracing::warn!(reason = %reason, "Rejected credentials");
                (
                    StatusCode::UNAUTHORIZED,
                    "INVALID_CREDENTIALS",
                    "Invalid credentials".to_string(),
                )
            }
            IamError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            IamError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
            }
            IamError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            IamError::Database(e) => {
                // Log the actual error but don't expose internals
                tracing::error!(error = %e, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            IamError::Hashing(msg) | IamError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            IamError::Token(e) => {
                tracing::error!(error = %e, "Token signing error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for IAM operations.
pub type IamResult<T> = Result<T, IamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            IamError::DuplicateAccount.into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            IamError::InvalidCredentials(CredentialMismatch::UserMismatch)
                .into_response()
                .status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            IamError::Unauthorized("unauthorized".into())
                .into_response()
                .status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            IamError::Internal("boom".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_mismatch_messages_stay_distinct_internally() {
        let user = IamError::InvalidCredentials(CredentialMismatch::UserMismatch);
        let password = IamError::InvalidCredentials(CredentialMismatch::PasswordMismatch);
        assert!(user.to_string().contains("user does not match"));
        assert!(password.to_string().contains("password does not match"));
    }

    #[test]
    fn test_non_database_error_is_not_unique_violation() {
        assert!(!IamError::DuplicateAccount.is_unique_violation());
        assert!(!IamError::Database(sqlx::Error::RowNotFound).is_unique_violation());
    }
}
