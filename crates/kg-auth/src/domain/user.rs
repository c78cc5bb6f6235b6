//! User Entity
//!
//! Owned exclusively by the user directory; use cases receive copies and
//! never hold long-lived state. Constructed fully formed - there is no
//! partially-valid intermediate state and no public setters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// UUID as string
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name, at most 20 characters
    pub name: String,

    /// Unique across all users
    pub email: String,

    /// Argon2id PHC string; the plaintext password is never stored
    pub password_hash: String,

    /// Hash of the single live refresh token; absent while logged out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token_hash: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// A freshly registered user carries no refresh token: the session
    /// starts anonymous until the first authentication.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            refresh_token_hash: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_refresh_token_hash(mut self, hash: impl Into<String>) -> Self {
        self.refresh_token_hash = Some(hash.into());
        self
    }

    /// A user is in the Authenticated state iff a refresh-token hash is
    /// stored for them.
    pub fn is_authenticated(&self) -> bool {
        self.refresh_token_hash.is_some()
    }
}
