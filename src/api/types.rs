//! API request and response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// ==================== Authentication ====================

/// Sign-up request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignUpRequest {
    /// Account email.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 10, message = "must be at least 10 characters"))]
    pub password: String,
}

/// Sign-in request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignInRequest {
    /// Account email.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Identity carried by the caller's access token.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    /// User ID.
    pub id: String,
    /// User email.
    pub email: String,
}

// ==================== Health ====================

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Database connectivity.
    pub database: String,
    /// Timestamp.
    pub timestamp: String,
}
