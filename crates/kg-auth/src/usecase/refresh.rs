//! Refresh Authentication
//!
//! Exchange a valid refresh token for a fresh pair. Full rotation: both
//! tokens are renewed and the stored hash is overwritten, so the presented
//! token can never be replayed - a stale token (stolen or already rotated
//! away) no longer matches the stored hash and is rejected.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::TokenPair;
use crate::error::{AuthError, ErrorCode, Result};
use crate::repository::UserRepository;
use crate::service::{GenerateToken, SecretMatch, TokenService};

pub struct RefreshAuthenticationUseCase {
    repository: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl RefreshAuthenticationUseCase {
    pub fn new(repository: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { repository, tokens }
    }

    pub async fn execute(&self, refresh_token: &str) -> Result<TokenPair> {
        let claims = self.tokens.verify_refresh_token(refresh_token)?;

        info!(email = %claims.email, "refreshing authentication");

        let user = self.repository.find_by_id(&claims.sub).await?;
        let Some(user) = user else {
            warn!(email = %claims.email, "subject no longer exists");
            return Err(AuthError::invalid_permissions(ErrorCode::UserNotAuthenticated));
        };
        let Some(stored_hash) = user.refresh_token_hash.as_deref() else {
            warn!(email = %claims.email, "no live session for subject");
            return Err(AuthError::invalid_permissions(ErrorCode::UserNotAuthenticated));
        };

        let token_matches = self.tokens.validate_secret_match(SecretMatch {
            plain: refresh_token,
            hashed: stored_hash,
        })?;
        if !token_matches {
            warn!(email = %claims.email, "presented refresh token does not match stored hash");
            return Err(AuthError::invalid_permissions(ErrorCode::TokenNotValid));
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
            warn!(email = %claims.email, "rotating refresh-token hash failed");
            return Err(AuthError::unexpected(ErrorCode::TokenStorageFailed));
        }

        info!(email = %claims.email, "token pair rotated");
        Ok(pair)
    }
}
