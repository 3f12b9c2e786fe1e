//! Account sign-up and sign-in.

use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::{HashingService, TokenIssuer};
use crate::config::SignInMode;
use crate::domain::User;
use crate::error::{CredentialMismatch, IamError, IamResult};
use crate::storage::IamRepository;

/// Issued access token.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    pub access_token: String,
}

/// What a successful sign-in hands back to the caller.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum SignInOutcome {
    Token(AccessToken),
    Verified(bool),
}

/// Creates accounts and verifies credentials.
#[derive(Clone)]
pub struct CredentialService {
    repository: IamRepository,
    hashing: HashingService,
    tokens: TokenIssuer,
    mode: SignInMode,
}

impl CredentialService {
    pub fn new(
        repository: IamRepository,
        hashing: HashingService,
        tokens: TokenIssuer,
        mode: SignInMode,
    ) -> Self {
        Self {
            repository,
            hashing,
            tokens,
            mode,
        }
    }

    /// Register a new account.
    ///
    /// Fails with [`IamError::DuplicateAccount`] when the email is taken;
    /// every other failure is returned as-is.
    pub async fn sign_up(&self, email: &str, password: &str) -> IamResult<()> {
        let digest = self.hashing.hash(password).await?;
        let user = User::new(email.to_string(), digest);

        match self.repository.save_user(&user).await {
            Ok(()) => {
                tracing::info!(user_id = %user.id, "Account created");
                Ok(())
            }
            Err(e) if e.is_unique_violation() => {
                tracing::debug!("Sign-up rejected, email already registered");
                Err(IamError::DuplicateAccount)
            }
            Err(e) => Err(e),
        }
    }

    /// Check an email/password pair and return the matching user.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> IamResult<User> {
        let user = self
            .repository
            .find_user_by_email(email)
            .await?
            .ok_or(IamError::InvalidCredentials(CredentialMismatch::UserMismatch))?;

        if !self.hashing.compare(password, &user.password).await? {
            return Err(IamError::InvalidCredentials(
                CredentialMismatch::PasswordMismatch,
            ));
        }

        Ok(user)
    }

    /// Verify credentials and, depending on the configured mode, issue a token.
    pub async fn sign_in(&self, email: &str, password: &str) -> IamResult<SignInOutcome> {
        let user = self.verify_credentials(email, password).await?;

        let outcome = match self.mode {
            SignInMode::Token => {
                let access_token = self.tokens.sign(&user.id.to_string(), &user.email)?;
                SignInOutcome::Token(AccessToken { access_token })
            }
            SignInMode::Verify => SignInOutcome::Verified(true),
        };

        tracing::info!(
            user_id = %user.id,
            mode = ?self.mode,
            expires_in = self.tokens.access_token_ttl(),
            "User signed in"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::tests::token_config;
    use crate::storage::repository::tests::setup_test_db;
    use tokio_test::{assert_err, assert_ok};

    async fn setup_service(mode: SignInMode) -> (CredentialService, TokenIssuer) {
        crate::logging::init_test();
        let repo = setup_test_db().await;
        let tokens = TokenIssuer::new(&token_config("test-secret", "iam-core"));
        let service = CredentialService::new(repo, HashingService::new(), tokens.clone(), mode);
        (service, tokens)
    }

    #[tokio::test]
    async fn test_sign_up_stores_digest() {
        let (service, _) = setup_service(SignInMode::Token).await;

        assert_ok!(service.sign_up("alice@example.com", "password123").await);

        let user = service
            .repository
            .find_user_by_email("alice@example.com")
            .await
            .unwrap()
            .expect("user should be persisted");
        assert_ne!(user.password, "password123");
        assert!(user.password.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email() {
        let (service, _) = setup_service(SignInMode::Token).await;

        service.sign_up("bob@example.com", "password123").await.unwrap();
        let err = service
            .sign_up("bob@example.com", "another-password")
            .await
            .unwrap_err();

        assert!(matches!(err, IamError::DuplicateAccount));
        assert_eq!(service.repository.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_sign_in_unknown_user() {
        let (service, _) = setup_service(SignInMode::Token).await;

        let err = service
            .sign_in("nobody@example.com", "password123")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            IamError::InvalidCredentials(CredentialMismatch::UserMismatch)
        ));
        assert!(err.to_string().contains("user does not match"));
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password() {
        let (service, _) = setup_service(SignInMode::Token).await;
        service.sign_up("carol@example.com", "password123").await.unwrap();

        let err = service
            .sign_in("carol@example.com", "wrong-password")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            IamError::InvalidCredentials(CredentialMismatch::PasswordMismatch)
        ));
        assert!(err.to_string().contains("password does not match"));
    }

    #[tokio::test]
    async fn test_sign_in_issues_verifiable_token() {
        let (service, tokens) = setup_service(SignInMode::Token).await;
        service.sign_up("dave@example.com", "password123").await.unwrap();
        let stored = service
            .repository
            .find_user_by_email("dave@example.com")
            .await
            .unwrap()
            .unwrap();

        let outcome = service
            .sign_in("dave@example.com", "password123")
            .await
            .unwrap();

        let SignInOutcome::Token(token) = outcome else {
            panic!("expected an access token");
        };
        let claims = tokens.verify(&token.access_token).unwrap();
        assert_eq!(claims.sub, stored.id.to_string());
        assert_eq!(claims.email, stored.email);
        assert_eq!(claims.exp - claims.iat, tokens.access_token_ttl());
    }

    #[tokio::test]
    async fn test_sign_in_verify_mode_returns_flag() {
        let (service, _) = setup_service(SignInMode::Verify).await;
        service.sign_up("erin@example.com", "password123").await.unwrap();

        let outcome = service
            .sign_in("erin@example.com", "password123")
            .await
            .unwrap();
        assert!(matches!(outcome, SignInOutcome::Verified(true)));

        assert_err!(service.sign_in("erin@example.com", "nope-nope-nope").await);
    }

    #[test]
    fn test_access_token_serializes_camel_case() {
        let outcome = SignInOutcome::Token(AccessToken {
            access_token: "abc".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({ "accessToken": "abc" })
        );
        assert_eq!(
            serde_json::to_value(SignInOutcome::Verified(true)).unwrap(),
            serde_json::json!(true)
        );
    }
}
