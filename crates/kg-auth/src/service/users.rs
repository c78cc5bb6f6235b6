//! Identity Validation Service
//!
//! Structural invariants on user-supplied fields, and construction of a
//! fully-formed (unsaved) user from a registration request. Validation
//! short-circuits on the first failing rule; persistence is the caller's
//! responsibility.

use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::User;
use crate::error::{AuthError, ErrorCode, Result};
use crate::service::password::PasswordService;
use crate::uuid::UuidGenerator;

const MAX_NAME_LENGTH: usize = 20;
const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Registration request as received from the inbound adapter.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

pub struct UserService {
    hasher: Arc<PasswordService>,
}

impl UserService {
    pub fn new(hasher: Arc<PasswordService>) -> Self {
        Self { hasher }
    }

    pub fn validate_name(&self, name: &str) -> Result<()> {
        let length = name.chars().count();
        if (1..=MAX_NAME_LENGTH).contains(&length) {
            Ok(())
        } else {
            Err(AuthError::bad_model(ErrorCode::NameTooLong))
        }
    }

    pub fn validate_email(&self, email: &str) -> Result<()> {
        if EMAIL_REGEX.is_match(email) {
            Ok(())
        } else {
            Err(AuthError::bad_model(ErrorCode::EmailFormatInvalid))
        }
    }

    pub fn validate_password(&self, password: &str) -> Result<()> {
        if password.chars().count() >= MIN_PASSWORD_LENGTH {
            Ok(())
        } else {
            Err(AuthError::bad_model(ErrorCode::PasswordTooShort))
        }
    }

    pub fn validate_confirm_password(&self, password: &str, confirm: &str) -> Result<()> {
        if password == confirm {
            Ok(())
        } else {
            Err(AuthError::bad_model(ErrorCode::PasswordsNotMatch))
        }
    }

    pub fn validate_id(&self, id: &str) -> Result<()> {
        if UuidGenerator::validate(id) {
            Ok(())
        } else {
            Err(AuthError::bad_model(ErrorCode::IdFormatInvalid))
        }
    }

    /// Build an unsaved user: generate an id, validate every field, hash the
    /// password. Pure construction - nothing is persisted here.
    pub fn create(&self, registration: &Registration) -> Result<User> {
        let id = UuidGenerator::generate();

        self.validate_name(&registration.name)?;
        self.validate_email(&registration.email)?;
        self.validate_password(&registration.password)?;
        self.validate_confirm_password(&registration.password, &registration.confirm_password)?;

        let password_hash = self
            .hasher
            .hash(&registration.password)
            .map_err(|e| AuthError::unexpected_with(ErrorCode::HashingFailed, e))?;

        Ok(User::new(id, &registration.name, &registration.email, password_hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn service() -> UserService {
        UserService::new(Arc::new(PasswordService::default()))
    }

    fn registration() -> Registration {
        Registration {
            name: "John Doe".to_string(),
            email: "john@x.com".to_string(),
            password: "123456".to_string(),
            confirm_password: "123456".to_string(),
        }
    }

    #[test]
    fn test_name_rules() {
        let service = service();
        assert!(service.validate_name("J").is_ok());
        assert!(service.validate_name(&"x".repeat(20)).is_ok());

        let err = service.validate_name(&"x".repeat(21)).unwrap_err();
        assert_eq!(err.code, ErrorCode::NameTooLong);
        assert_eq!(service.validate_name("").unwrap_err().code, ErrorCode::NameTooLong);
    }

    #[test]
    fn test_email_rules() {
        let service = service();
        assert!(service.validate_email("john.doe+tag@sub.example.co").is_ok());

        for bad in ["", "john", "john@", "@x.com", "john@x", "john@x.c"] {
            let err = service.validate_email(bad).unwrap_err();
            assert_eq!(err.code, ErrorCode::EmailFormatInvalid, "email {bad:?}");
        }
    }

    #[test]
    fn test_password_rules() {
        let service = service();
        assert!(service.validate_password("123456").is_ok());
        assert_eq!(
            service.validate_password("12345").unwrap_err().code,
            ErrorCode::PasswordTooShort
        );
        assert_eq!(
            service.validate_confirm_password("123456", "654321").unwrap_err().code,
            ErrorCode::PasswordsNotMatch
        );
    }

    #[test]
    fn test_id_rules() {
        let service = service();
        assert!(service.validate_id(&UuidGenerator::generate()).is_ok());
        assert_eq!(
            service.validate_id("nope").unwrap_err().code,
            ErrorCode::IdFormatInvalid
        );
    }

    #[test]
    fn test_create_builds_unsaved_user_with_hashed_password() {
        let service = service();
        let user = service.create(&registration()).unwrap();

        assert!(UuidGenerator::validate(&user.id));
        assert_eq!(user.name, "John Doe");
        assert_eq!(user.email, "john@x.com");
        assert_ne!(user.password_hash, "123456");
        assert!(user.refresh_token_hash.is_none());
    }

    #[test]
    fn test_create_short_circuits_on_first_failure() {
        let service = service();
        let mut bad = registration();
        bad.email = "broken".to_string();
        bad.password = "123".to_string();

        // Email is checked before password, so its code wins.
        let err = service.create(&bad).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailFormatInvalid);
        assert_eq!(err.kind, ErrorKind::BadModel);
    }
}
