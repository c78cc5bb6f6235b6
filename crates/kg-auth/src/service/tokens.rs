//! Token Service
//!
//! Issues and verifies the signed access/refresh pair. The two token
//! families are signed with distinct secrets and lifetimes, so a leaked
//! access-token secret cannot forge refresh tokens. Access tokens are never
//! persisted or individually revocable; refresh tokens are persisted only as
//! an Argon2id hash on the user record.

use std::sync::Arc;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::TokenConfig;
use crate::domain::{Claims, TokenPair, TokenType};
use crate::error::{AuthError, ErrorCode, Result};
use crate::service::password::PasswordService;
use crate::uuid::UuidGenerator;

/// Claim inputs for a new token pair.
#[derive(Debug, Clone)]
pub struct GenerateToken {
    pub user_id: String,
    pub email: String,
    pub name: String,
}

/// A plaintext secret and the stored hash to compare it against.
#[derive(Debug, Clone, Copy)]
pub struct SecretMatch<'a> {
    pub plain: &'a str,
    pub hashed: &'a str,
}

pub struct TokenService {
    config: TokenConfig,
    hasher: Arc<PasswordService>,
}

impl TokenService {
    pub fn new(config: TokenConfig, hasher: Arc<PasswordService>) -> Self {
        Self { config, hasher }
    }

    /// Issue two independently-signed tokens embedding the same subject.
    /// Fail-fast: if either signing fails no partial pair is returned.
    pub fn generate_token_pair(&self, input: &GenerateToken) -> Result<TokenPair> {
        let now = chrono::Utc::now().timestamp();

        let access_token = self.sign(
            input,
            now,
            self.config.access_expiry_secs,
            &self.config.access_secret,
        )?;
        let refresh_token = self.sign(
            input,
            now,
            self.config.refresh_expiry_secs,
            &self.config.refresh_secret,
        )?;

        Ok(TokenPair {
            access_token,
            expires_in: self.config.access_expiry_secs,
            token_type: TokenType::Bearer,
            refresh_token,
            scope: String::new(),
        })
    }

    /// Hash a refresh token for storage on the user record.
    pub fn hash_refresh_token(&self, token: &str) -> Result<String> {
        self.hasher
            .hash(token)
            .map_err(|e| AuthError::unexpected_with(ErrorCode::TokenGenerationFailed, e))
    }

    pub fn verify_access_token(&self, token: &str) -> Result<Claims> {
        self.verify(token, &self.config.access_secret)
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims> {
        self.verify(token, &self.config.refresh_secret)
    }

    /// Compare a presented secret against a stored hash.
    pub fn validate_secret_match(&self, input: SecretMatch<'_>) -> Result<bool> {
        self.hasher
            .verify(input.plain, input.hashed)
            .map_err(|e| AuthError::unexpected_with(ErrorCode::HashingFailed, e))
    }

    fn sign(&self, input: &GenerateToken, now: i64, expiry_secs: i64, secret: &str) -> Result<String> {
        let claims = Claims {
            sub: input.user_id.clone(),
            email: input.email.clone(),
            name: input.name.clone(),
            iat: now,
            exp: now + expiry_secs,
            jti: UuidGenerator::generate(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AuthError::unexpected_with(ErrorCode::TokenGenerationFailed, e))
    }

    fn verify(&self, token: &str, secret: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::invalid_permissions(ErrorCode::TokenNotValid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn subject() -> GenerateToken {
        GenerateToken {
            user_id: UuidGenerator::generate(),
            email: "john@x.com".to_string(),
            name: "John Doe".to_string(),
        }
    }

    fn service() -> TokenService {
        TokenService::new(TokenConfig::default(), Arc::new(PasswordService::default()))
    }

    #[test]
    fn test_generated_pair_verifies_with_matching_claims() {
        let service = service();
        let input = subject();
        let pair = service.generate_token_pair(&input).unwrap();

        assert_eq!(pair.token_type, TokenType::Bearer);
        assert_eq!(pair.expires_in, 900);
        assert_eq!(pair.scope, "");

        let access = service.verify_access_token(&pair.access_token).unwrap();
        let refresh = service.verify_refresh_token(&pair.refresh_token).unwrap();
        assert_eq!(access.sub, input.user_id);
        assert_eq!(access.email, "john@x.com");
        assert_eq!(refresh.sub, input.user_id);
        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn test_token_families_are_not_interchangeable() {
        let service = service();
        let pair = service.generate_token_pair(&subject()).unwrap();

        let err = service.verify_refresh_token(&pair.access_token).unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenNotValid);
        assert_eq!(err.kind, ErrorKind::InvalidPermissions);
        assert!(service.verify_access_token(&pair.refresh_token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = TokenConfig {
            access_expiry_secs: -60,
            ..TokenConfig::default()
        };
        let service = TokenService::new(config, Arc::new(PasswordService::default()));
        let pair = service.generate_token_pair(&subject()).unwrap();

        let err = service.verify_access_token(&pair.access_token).unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenNotValid);
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let service = service();
        let pair = service.generate_token_pair(&subject()).unwrap();

        let mut tampered = pair.access_token.clone();
        tampered.pop();
        tampered.push('x');
        assert!(service.verify_access_token(&tampered).is_err());
    }

    #[test]
    fn test_back_to_back_pairs_differ() {
        // Same subject and clock second must still yield distinct tokens,
        // otherwise rotation could not invalidate the previous one.
        let service = service();
        let input = subject();
        let first = service.generate_token_pair(&input).unwrap();
        let second = service.generate_token_pair(&input).unwrap();

        assert_ne!(first.refresh_token, second.refresh_token);
        assert_ne!(first.access_token, second.access_token);
    }

    #[test]
    fn test_refresh_token_hash_matches_only_its_token() {
        let service = service();
        let pair = service.generate_token_pair(&subject()).unwrap();
        let hash = service.hash_refresh_token(&pair.refresh_token).unwrap();

        assert_ne!(hash, pair.refresh_token);
        assert!(service
            .validate_secret_match(SecretMatch { plain: &pair.refresh_token, hashed: &hash })
            .unwrap());
        assert!(!service
            .validate_secret_match(SecretMatch { plain: &pair.access_token, hashed: &hash })
            .unwrap());
    }
}
