//! JWT issuing and verification for access tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

use crate::config::TokenConfig;
use crate::error::IamResult;

/// Claims embedded in an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: String,
    /// User email.
    pub email: String,
    /// Audience.
    pub aud: String,
    /// Issuer.
    pub iss: String,
    /// Issued at time (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

/// Signs and verifies access tokens against one [`TokenConfig`].
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    audience: String,
    issuer: String,
    /// Token validity in seconds.
    access_token_ttl: i64,
}

impl TokenIssuer {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            audience: config.audience.clone(),
            issuer: config.issuer.clone(),
            access_token_ttl: config.access_token_ttl,
        }
    }

    /// Access token lifetime in seconds.
    pub fn access_token_ttl(&self) -> i64 {
        self.access_token_ttl
    }

    /// Sign an access token for the given subject.
    pub fn sign(&self, subject: &str, email: &str) -> IamResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.access_token_ttl);

        let claims = Claims {
            sub: subject.to_string(),
            email: email.to_string(),
            aud: self.audience.clone(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Verify signature, audience, issuer and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::default();
        validation.set_audience(&[&self.audience]);
        validation.set_issuer(&[&self.issuer]);
        validation.leeway = 0;

        let token_data: TokenData<Claims> = decode(token, &self.decoding_key, &validation)?;

        Ok(token_data.claims)
    }
}
