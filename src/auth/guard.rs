//! Strategy selection for authenticated routes.
//!
//! Every route carries an [`AuthRequirement`]: the list of authentication
//! types it accepts. The [`AuthenticationGuard`] maps each type to its
//! registered strategies and accepts the request as soon as one of them does.

use std::collections::HashMap;

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, Request},
};

use crate::auth::TokenIssuer;
use crate::error::{IamError, IamResult};

/// Authentication type a route can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthType {
    /// A valid access token in `Authorization: Bearer <token>`.
    Bearer,
    /// No authentication.
    None,
}

/// Ordered set of authentication types a route accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRequirement(Vec<AuthType>);

impl AuthRequirement {
    pub fn new(types: impl Into<Vec<AuthType>>) -> Self {
        Self(types.into())
    }

    /// Pick the most specific declaration: handler, then group, then the default.
    pub fn resolve(handler: Option<&AuthRequirement>, group: Option<&AuthRequirement>) -> Self {
        handler.or(group).cloned().unwrap_or_default()
    }

    pub fn types(&self) -> &[AuthType] {
        &self.0
    }
}

impl Default for AuthRequirement {
    fn default() -> Self {
        Self(vec![AuthType::Bearer])
    }
}

/// Verifies the bearer access token on a request.
#[derive(Clone)]
pub struct AccessTokenGuard {
    tokens: TokenIssuer,
}

impl AccessTokenGuard {
    pub fn new(tokens: TokenIssuer) -> Self {
        Self { tokens }
    }

    /// Accepts the request when it carries a valid token, attaching the
    /// decoded claims to the request extensions.
    pub async fn can_activate(&self, request: &mut Request<Body>) -> IamResult<bool> {
        let token = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| IamError::Unauthorized("missing bearer token".to_string()))?;

        let claims = self.tokens.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Access token rejected");
            IamError::Unauthorized(format!("invalid access token: {}", e))
        })?;

        request.extensions_mut().insert(claims);
        Ok(true)
    }
}

/// A single authentication strategy the guard can delegate to.
#[derive(Clone)]
pub enum Strategy {
    AccessToken(AccessTokenGuard),
    /// Accepts every request.
    Accept,
}

impl Strategy {
    pub async fn evaluate(&self, request: &mut Request<Body>) -> IamResult<bool> {
        match self {
            Strategy::AccessToken(guard) => guard.can_activate(request).await,
            Strategy::Accept => Ok(true),
        }
    }
}

/// Maps authentication types to strategies and evaluates them in order.
#[derive(Clone, Default)]
pub struct AuthenticationGuard {
    strategies: HashMap<AuthType, Vec<Strategy>>,
}

impl AuthenticationGuard {
    /// Standard wiring: `Bearer` verifies access tokens, `None` accepts all.
    pub fn new(access_token: AccessTokenGuard) -> Self {
        Self::default()
            .register(AuthType::Bearer, Strategy::AccessToken(access_token))
            .register(AuthType::None, Strategy::Accept)
    }

    /// Append a strategy for `auth_type`. Strategies of one type run in
    /// registration order.
    pub fn register(mut self, auth_type: AuthType, strategy: Strategy) -> Self {
        self.strategies.entry(auth_type).or_default().push(strategy);
        self
    }

    /// Accept the request if any strategy for the required types accepts it.
    ///
    /// Errors from rejecting strategies do not stop evaluation. When all
    /// strategies reject, the most recent error is returned.
    pub async fn can_activate(
        &self,
        requirement: &AuthRequirement,
        request: &mut Request<Body>,
    ) -> IamResult<()> {
        let strategies = requirement
            .types()
            .iter()
            .flat_map(|t| self.strategies.get(t).into_iter().flatten());

        let mut last_error = None;

        for strategy in strategies {
            match strategy.evaluate(request).await {
                Ok(true) => return Ok(()),
                Ok(false) => {}
                Err(e) => last_error = Some(e),
            }
        }

        Err(last_error.unwrap_or_else(|| IamError::Unauthorized("unauthorized".to_string())))
    }
}
