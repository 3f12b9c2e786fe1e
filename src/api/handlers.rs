//! HTTP request handlers.

use axum::{extract::State, http::StatusCode, Extension, Json};
use uuid::Uuid;
use validator::Validate;

use crate::api::types::*;
use crate::auth::{Claims, SignInOutcome};
use crate::error::{IamError, IamResult};
use crate::AppState;

// ==================== Authentication Endpoints ====================

/// Register a new account.
///
/// POST /authentication/sign-up
#[utoipa::path(
    post,
    path = "/authentication/sign-up",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created"),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Email already registered")
    ),
    tag = "authentication"
)]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> IamResult<StatusCode> {
    request.validate()?;

    state
        .credentials
        .sign_up(&request.email, &request.password)
        .await?;

    Ok(StatusCode::CREATED)
}

/// Verify credentials and obtain an access token.
///
/// POST /authentication/sign-in
#[utoipa::path(
    post,
    path = "/authentication/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = SignInOutcome),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "authentication"
)]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> IamResult<Json<SignInOutcome>> {
    request.validate()?;

    let outcome = state
        .credentials
        .sign_in(&request.email, &request.password)
        .await?;

    Ok(Json(outcome))
}

/// Get the caller's identity from their access token.
///
/// GET /users/me
#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Current user info", body = UserInfo),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Account no longer exists")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> IamResult<Json<UserInfo>> {
    let id = Uuid::parse_str(&claims.sub)
        .map_err(|_| IamError::Unauthorized("malformed token subject".to_string()))?;
    let user = state.repository.get_user(id).await?;

    Ok(Json(UserInfo {
        id: user.id.to_string(),
        email: user.email,
    }))
}

// ==================== Health ====================

/// Health check endpoint.
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // Check database connectivity
    let db_status = match sqlx::query("SELECT 1")
        .fetch_one(state.repository.pool())
        .await
    {
        Ok(_) => "connected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
