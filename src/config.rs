//! Configuration module for IAM Core.
//!
//! Loads configuration from YAML files and environment variables.

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// What a successful sign-in returns.
    #[serde(default)]
    pub sign_in_mode: SignInMode,
    /// Signing parameters for issued access tokens.
    pub jwt: TokenConfig,
}

/// Response shape of a successful sign-in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignInMode {
    /// Issue a signed access token.
    #[default]
    Token,
    /// Only confirm that the credentials matched.
    Verify,
}

/// Static parameters used to sign and verify access tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    pub audience: String,
    pub issuer: String,
    pub secret: String,
    /// Access token lifetime in seconds.
    #[serde(default = "default_access_token_ttl")]
    pub access_token_ttl: i64,
}

fn default_access_token_ttl() -> i64 {
    3600
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (IAM__*)
    /// 2. config/local.yaml (if exists)
    /// 3. config/default.yaml
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.url", "sqlite://iam.db?mode=rwc")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("IAM")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message("auth.jwt.secret must not be empty".into()));
        }
        if self.auth.jwt.access_token_ttl <= 0 {
            return Err(ConfigError::Message(
                "auth.jwt.access_token_ttl must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
            },
            auth: AuthConfig {
                sign_in_mode: SignInMode::Token,
                jwt: TokenConfig {
                    audience: "localhost:3000".to_string(),
                    issuer: "localhost:3000".to_string(),
                    secret: "secret".to_string(),
                    access_token_ttl: 3600,
                },
            },
        }
    }

    #[test]
    fn test_sign_in_mode_defaults_to_token() {
        assert_eq!(SignInMode::default(), SignInMode::Token);
        let mode: SignInMode = serde_json::from_str("\"verify\"").unwrap();
        assert_eq!(mode, SignInMode::Verify);
    }

    #[test]
    fn test_ttl_defaults_when_missing() {
        let jwt: TokenConfig = serde_json::from_value(serde_json::json!({
            "audience": "a",
            "issuer": "i",
            "secret": "s"
        }))
        .unwrap();
        assert_eq!(jwt.access_token_ttl, 3600);
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        let mut config = sample();
        assert!(config.validate().is_ok());

        config.auth.jwt.secret = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_ttl() {
        let mut config = sample();
        config.auth.jwt.access_token_ttl = 0;
        assert!(config.validate().is_err());
    }
}
