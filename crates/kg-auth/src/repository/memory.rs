//! In-Memory User Directory
//!
//! Map-backed adapter for tests and the server's `KG_STORE=memory` dev
//! mode. Refresh-token updates can be made to report failure so the
//! storage-failure paths of the use cases are testable.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::User;
use crate::error::{AuthError, ErrorCode, Result};
use crate::repository::users::UserRepository;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
    fail_refresh_token_updates: AtomicBool,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `update_refresh_token` calls report "not found",
    /// mimicking a directory that refused the write.
    pub fn fail_refresh_token_updates(&self, fail: bool) {
        self.fail_refresh_token_updates.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<User> {
        let mut users = self.users.write().expect("user map poisoned");
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::bad_model(ErrorCode::UserAlreadyExists));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().expect("user map poisoned");
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let users = self.users.read().expect("user map poisoned");
        Ok(users.get(id).cloned())
    }

    async fn update_refresh_token(
        &self,
        user_id: &str,
        refresh_token_hash: Option<&str>,
    ) -> Result<Option<User>> {
        if self.fail_refresh_token_updates.load(Ordering::SeqCst) {
            return Ok(None);
        }

        let mut users = self.users.write().expect("user map poisoned");
        Ok(users.get_mut(user_id).map(|user| {
            user.refresh_token_hash = refresh_token_hash.map(str::to_string);
            user.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User::new(crate::uuid::UuidGenerator::generate(), "John Doe", email, "$hash")
    }

    #[tokio::test]
    async fn test_save_rejects_duplicate_email() {
        let repo = InMemoryUserRepository::new();
        repo.save(&user("john@x.com")).await.unwrap();

        let err = repo.save(&user("john@x.com")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UserAlreadyExists);
    }

    #[tokio::test]
    async fn test_update_refresh_token_overwrites_and_clears() {
        let repo = InMemoryUserRepository::new();
        let saved = repo.save(&user("john@x.com")).await.unwrap();

        let updated = repo
            .update_refresh_token(&saved.id, Some("hash-1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.refresh_token_hash.as_deref(), Some("hash-1"));

        let cleared = repo.update_refresh_token(&saved.id, None).await.unwrap().unwrap();
        assert!(cleared.refresh_token_hash.is_none());

        assert!(repo.update_refresh_token("missing", None).await.unwrap().is_none());
    }
}
