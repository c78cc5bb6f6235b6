//! Token Structures
//!
//! Token pairs are ephemeral: constructed per issuance, returned to the
//! caller in plaintext, never persisted. Only the refresh token's hash is
//! stored, attached to the user record.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Token scheme label. Only the Bearer scheme is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TokenType {
    #[serde(rename = "Bearer")]
    Bearer,
}

impl TokenType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bearer => "Bearer",
        }
    }
}

/// A freshly issued access/refresh pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    /// Access-token lifetime in seconds
    pub expires_in: i64,
    pub token_type: TokenType,
    pub refresh_token: String,
    /// Reserved, currently always empty
    pub scope: String,
}

/// Claims embedded in and recovered from a signed token. Produced only by
/// verification, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id
    pub sub: String,
    pub email: String,
    pub name: String,
    /// Issued-at, seconds since epoch
    pub iat: i64,
    /// Expiry, seconds since epoch
    pub exp: i64,
    /// Random per-token id; makes every issued token a distinct string even
    /// within the same clock second, which rotation relies on
    pub jti: String,
}
