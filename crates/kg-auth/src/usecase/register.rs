//! Register User
//!
//! Validate the email format, reject duplicates, build the user through the
//! identity validation service and persist it.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::User;
use crate::error::{AuthError, ErrorCode, Result};
use crate::repository::UserRepository;
use crate::service::{Registration, UserService};

pub struct RegisterUserUseCase {
    repository: Arc<dyn UserRepository>,
    users: Arc<UserService>,
}

impl RegisterUserUseCase {
    pub fn new(repository: Arc<dyn UserRepository>, users: Arc<UserService>) -> Self {
        Self { repository, users }
    }

    pub async fn execute(&self, registration: &Registration) -> Result<User> {
        info!(email = %registration.email, "registering user");

        self.users.validate_email(&registration.email)?;

        if self
            .repository
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            warn!(email = %registration.email, "user already exists");
            return Err(AuthError::bad_model(ErrorCode::UserAlreadyExists));
        }

        let user = self.users.create(registration)?;
        let saved = self.repository.save(&user).await?;

        info!(email = %saved.email, "user registered");
        Ok(saved)
    }
}
