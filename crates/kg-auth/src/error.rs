//! Auth Error Types
//!
//! Every error carries a stable machine-readable code, a generated trace id
//! and a creation timestamp so callers can correlate log lines without the
//! error ever embedding password or token material.

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fmt;
use thiserror::Error;

const TRACE_ID_LENGTH: usize = 20;

/// Stable error codes surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NameTooLong,
    EmailFormatInvalid,
    PasswordTooShort,
    PasswordsNotMatch,
    IdFormatInvalid,
    UserAlreadyExists,
    UserNotFound,
    PasswordIncorrect,
    UserNotAuthenticated,
    TokenNotValid,
    TokenGenerationFailed,
    TokenStorageFailed,
    TokenClearingFailed,
    RepositoryUnexpected,
    HashingFailed,
    AuthHeaderNotProvided,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NameTooLong => "NAME_TOO_LONG",
            Self::EmailFormatInvalid => "EMAIL_FORMAT_INVALID",
            Self::PasswordTooShort => "PASSWORD_TOO_SHORT",
            Self::PasswordsNotMatch => "PASSWORDS_NOT_MATCH",
            Self::IdFormatInvalid => "ID_FORMAT_INVALID",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::PasswordIncorrect => "PASSWORD_INCORRECT",
            Self::UserNotAuthenticated => "USER_NOT_AUTHENTICATED",
            Self::TokenNotValid => "TOKEN_NOT_VALID",
            Self::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
            Self::TokenStorageFailed => "TOKEN_STORAGE_FAILED",
            Self::TokenClearingFailed => "TOKEN_CLEARING_FAILED",
            Self::RepositoryUnexpected => "REPOSITORY_UNEXPECTED",
            Self::HashingFailed => "HASHING_FAILED",
            Self::AuthHeaderNotProvided => "AUTH_HEADER_NOT_PROVIDED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error classification. Inbound adapters map each kind to a transport
/// status (400 / 404 / 401 / 500 respectively).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input or business-rule violation on the caller's request.
    BadModel,
    /// Referenced entity does not exist.
    NotFound,
    /// Token invalid, expired or misused; session preconditions not met.
    InvalidPermissions,
    /// Infrastructure failure beyond the caller's control.
    Unexpected,
}

#[derive(Debug, Error)]
#[error("{code} ({kind:?}) [trace {trace_id}]")]
pub struct AuthError {
    pub kind: ErrorKind,
    pub code: ErrorCode,
    pub trace_id: String,
    pub timestamp: DateTime<Utc>,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AuthError {
    fn new(kind: ErrorKind, code: ErrorCode) -> Self {
        Self {
            kind,
            code,
            trace_id: generate_trace_id(),
            timestamp: Utc::now(),
            source: None,
        }
    }

    pub fn bad_model(code: ErrorCode) -> Self {
        Self::new(ErrorKind::BadModel, code)
    }

    pub fn not_found(code: ErrorCode) -> Self {
        Self::new(ErrorKind::NotFound, code)
    }

    pub fn invalid_permissions(code: ErrorCode) -> Self {
        Self::new(ErrorKind::InvalidPermissions, code)
    }

    pub fn unexpected(code: ErrorCode) -> Self {
        Self::new(ErrorKind::Unexpected, code)
    }

    pub fn unexpected_with(
        code: ErrorCode,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..Self::new(ErrorKind::Unexpected, code)
        }
    }
}

impl From<mongodb::error::Error> for AuthError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::unexpected_with(ErrorCode::RepositoryUnexpected, err)
    }
}

fn generate_trace_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TRACE_ID_LENGTH)
        .map(char::from)
        .collect()
}

pub type Result<T> = std::result::Result<T, AuthError>;
