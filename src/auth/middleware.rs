//! Authentication middleware for axum.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthRequirement, AuthenticationGuard};
use crate::error::IamError;

/// Guard bound to one route's resolved requirement.
///
/// Built once while the router is assembled.
#[derive(Clone)]
pub struct RouteGuard {
    guard: Arc<AuthenticationGuard>,
    requirement: Arc<AuthRequirement>,
}

impl RouteGuard {
    pub fn new(
        guard: Arc<AuthenticationGuard>,
        handler: Option<&AuthRequirement>,
        group: Option<&AuthRequirement>,
    ) -> Self {
        Self {
            guard,
            requirement: Arc::new(AuthRequirement::resolve(handler, group)),
        }
    }

    pub fn requirement(&self) -> &AuthRequirement {
        &self.requirement
    }
}

/// Run the authentication guard before the handler.
pub async fn authenticate(
    State(route): State<RouteGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, IamError> {
    if let Err(e) = route
        .guard
        .can_activate(&route.requirement, &mut request)
        .await
    {
        tracing::debug!(
            path = %request.uri().path(),
            auth_types = ?route.requirement.types(),
            error = %e,
            "Request rejected by authentication guard"
        );
        return Err(e);
    }

    Ok(next.run(request).await)
}
