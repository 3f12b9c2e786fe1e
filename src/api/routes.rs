//! Route definitions for the API.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers;
use crate::auth::{authenticate, AuthRequirement, AuthType, AuthenticationGuard, RouteGuard};
use crate::AppState;

/// Security scheme modifier for OpenAPI.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::sign_up,
        handlers::sign_in,
        handlers::get_current_user,
        handlers::health_check,
    ),
    components(schemas(
        crate::api::types::SignUpRequest,
        crate::api::types::SignInRequest,
        crate::api::types::UserInfo,
        crate::api::types::HealthResponse,
        crate::auth::AccessToken,
        crate::auth::SignInOutcome,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "authentication", description = "Sign-up and sign-in"),
        (name = "users", description = "Authenticated user endpoints"),
        (name = "health", description = "Health and status endpoints")
    ),
    info(
        title = "IAM Core API",
        version = "0.1.0",
        description = "Account registration, credential verification and bearer-token issuance",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Build the API router.
///
/// Every route gets its authentication requirement resolved here, once:
/// a handler-level declaration wins over its group's, and routes declaring
/// neither require a bearer token.
pub fn build_router(state: AppState, guard: AuthenticationGuard) -> Router {
    let guard = Arc::new(guard);
    let public = AuthRequirement::new([AuthType::None]);

    // Authentication group: open to anonymous callers
    let authentication_group = RouteGuard::new(guard.clone(), None, Some(&public));
    // Users group: no declaration, falls back to Bearer
    let users_group = RouteGuard::new(guard.clone(), None, None);
    let health = RouteGuard::new(guard, Some(&public), None);

    for route in [&authentication_group, &users_group, &health] {
        tracing::debug!(auth_types = ?route.requirement().types(), "Resolved route requirement");
    }

    let authentication_routes = Router::new()
        .route(
            "/authentication/sign-up",
            post(handlers::sign_up).route_layer(middleware::from_fn_with_state(
                authentication_group.clone(),
                authenticate,
            )),
        )
        .route(
            "/authentication/sign-in",
            post(handlers::sign_in).route_layer(middleware::from_fn_with_state(
                authentication_group,
                authenticate,
            )),
        );

    let user_routes = Router::new().route(
        "/users/me",
        get(handlers::get_current_user)
            .route_layer(middleware::from_fn_with_state(users_group, authenticate)),
    );

    let health_routes = Router::new().route(
        "/health",
        get(handlers::health_check)
            .route_layer(middleware::from_fn_with_state(health, authenticate)),
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(authentication_routes)
        .merge(user_routes)
        .merge(health_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}
