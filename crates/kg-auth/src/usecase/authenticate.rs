//! Authenticate User
//!
//! Verify credentials, issue a fresh token pair and store the refresh
//! token's hash, moving the session from Anonymous to Authenticated. The
//! plaintext pair goes back to the caller; only the hash is persisted.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::TokenPair;
use crate::error::{AuthError, ErrorCode, Result};
use crate::repository::UserRepository;
use crate::service::{GenerateToken, SecretMatch, TokenService, UserService};

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

pub struct AuthenticateUserUseCase {
    repository: Arc<dyn UserRepository>,
    users: Arc<UserService>,
    tokens: Arc<TokenService>,
}

impl AuthenticateUserUseCase {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        users: Arc<UserService>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            repository,
            users,
            tokens,
        }
    }

    pub async fn execute(&self, credentials: &Credentials) -> Result<TokenPair> {
        info!(email = %credentials.email, "authenticating user");

        self.users.validate_email(&credentials.email)?;

        let user = self
            .repository
            .find_by_email(&credentials.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %credentials.email, "user not found");
                AuthError::not_found(ErrorCode::UserNotFound)
            })?;

        let password_matches = self.tokens.validate_secret_match(SecretMatch {
            plain: &credentials.password,
            hashed: &user.password_hash,
        })?;
        if !password_matches {
            warn!(email = %credentials.email, "password mismatch");
            return Err(AuthError::bad_model(ErrorCode::PasswordIncorrect));
        }

        let pair = self.tokens.generate_token_pair(&GenerateToken {
            user_id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
        })?;

        let refresh_token_hash = self.tokens.hash_refresh_token(&pair.refresh_token)?;
        let updated = self
            .repository
            .update_refresh_token(&user.id, Some(&refresh_token_hash))
            .await?;
        if updated.is_none() {
            warn!(email = %credentials.email, "storing refresh-token hash failed");
            return Err(AuthError::unexpected(ErrorCode::TokenStorageFailed));
        }

        info!(email = %credentials.email, "user authenticated");
        Ok(pair)
    }
}
