//! Logout User
//!
//! Clear the stored refresh-token hash, returning the session to Anonymous.
//! The presented token must be the *access* token: proving live-session
//! ownership happens on the access channel. If the presented token matches
//! the stored refresh-token hash the caller is misusing a refresh token to
//! log out, which is rejected outright.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{AuthError, ErrorCode, Result};
use crate::repository::UserRepository;
use crate::service::{SecretMatch, TokenService};

pub struct LogoutUserUseCase {
    repository: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl LogoutUserUseCase {
    pub fn new(repository: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { repository, tokens }
    }

    pub async fn execute(&self, access_token: &str) -> Result<()> {
        let claims = self.tokens.verify_access_token(access_token)?;

        info!(email = %claims.email, "logging out user");

        let user = self.repository.find_by_id(&claims.sub).await?;
        let Some(user) = user else {
            warn!(email = %claims.email, "subject no longer exists");
            return Err(AuthError::invalid_permissions(ErrorCode::UserNotAuthenticated));
        };
        let Some(stored_hash) = user.refresh_token_hash.as_deref() else {
            warn!(email = %claims.email, "no live session for subject");
            return Err(AuthError::invalid_permissions(ErrorCode::UserNotAuthenticated));
        };

        let is_refresh_token = self.tokens.validate_secret_match(SecretMatch {
            plain: access_token,
            hashed: stored_hash,
        })?;
        if is_refresh_token {
            warn!(email = %claims.email, "refresh token presented on the access channel");
            return Err(AuthError::invalid_permissions(ErrorCode::TokenNotValid));
        }

        let updated = self.repository.update_refresh_token(&user.id, None).await?;
        if updated.is_none() {
            warn!(email = %claims.email, "clearing refresh-token hash failed");
            return Err(AuthError::unexpected(ErrorCode::TokenClearingFailed));
        }

        info!(email = %claims.email, "user logged out");
        Ok(())
    }
}
