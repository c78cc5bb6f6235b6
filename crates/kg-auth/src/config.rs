//! Token Signing Configuration
//!
//! Two independently configured secret/expiry pairs: a leaked access-token
//! secret must not allow forging refresh tokens.

/// Signing configuration for the two token families.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    /// Access-token lifetime in seconds (typically minutes).
    pub access_expiry_secs: i64,
    /// Refresh-token lifetime in seconds (typically a day or more).
    pub refresh_expiry_secs: i64,
}

impl Default for TokenConfig {
    /// Development defaults. Production deployments override every field
    /// from the environment (see `bin/kg-server`).
    fn default() -> Self {
        Self {
            access_secret: "keygate-dev-access-secret".to_string(),
            refresh_secret: "keygate-dev-refresh-secret".to_string(),
            access_expiry_secs: 900,
            refresh_expiry_secs: 86_400,
        }
    }
}
