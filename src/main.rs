//! IAM Core - identity service
//!
//! Registers accounts, verifies credentials, issues signed access tokens
//! and guards routes by their declared authentication requirement.

use sqlx::sqlite::SqlitePool;
use tokio::net::TcpListener;

mod api;
mod auth;
mod config;
mod domain;
mod error;
mod logging;
mod storage;

use crate::api::build_router;
use crate::auth::{
    AccessTokenGuard, AuthenticationGuard, CredentialService, HashingService, TokenIssuer,
};
use crate::config::Config;
use crate::storage::IamRepository;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Sign-up and sign-in.
    pub credentials: CredentialService,
    /// Database repository.
    pub repository: IamRepository,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: No .env file loaded ({e})");
    }

    logging::init();

    tracing::info!("Starting IAM Core v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        database = %config.database.url,
        sign_in_mode = ?config.auth.sign_in_mode,
        token_issuer = %config.auth.jwt.issuer,
        token_audience = %config.auth.jwt.audience,
        "Configuration loaded"
    );

    let pool = SqlitePool::connect(&config.database.url)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to database");
            anyhow::anyhow!("Database connection error: {}", e)
        })?;

    let repository = IamRepository::new(pool);
    repository.init_schema().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize database schema");
        anyhow::anyhow!("Schema initialization error: {}", e)
    })?;

    tracing::info!(
        users = repository.count_users().await?,
        "Database connected and schema initialized"
    );

    let tokens = TokenIssuer::new(&config.auth.jwt);
    let credentials = CredentialService::new(
        repository.clone(),
        HashingService::new(),
        tokens.clone(),
        config.auth.sign_in_mode,
    );
    let guard = AuthenticationGuard::new(AccessTokenGuard::new(tokens));

    let state = AppState {
        credentials,
        repository,
    };

    let app = build_router(state, guard);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(address = %addr, "Server listening");
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
