//! User Directory
//!
//! Port consumed by the use cases, plus the MongoDB adapter. Lookups return
//! an explicit `None` for "not found"; errors always mean infrastructure
//! failure, letting the use cases decide the resulting error kind.

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};

use crate::domain::User;
use crate::error::{AuthError, ErrorCode, Result};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user. Fails with `USER_ALREADY_EXISTS` when the email
    /// is already taken.
    async fn save(&self, user: &User) -> Result<User>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Atomically overwrite (or clear, with `None`) the stored refresh-token
    /// hash and return the updated record. `Ok(None)` means the user does
    /// not exist.
    async fn update_refresh_token(
        &self,
        user_id: &str,
        refresh_token_hash: Option<&str>,
    ) -> Result<Option<User>>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }

    /// Unique index on email; `_id` is unique by construction.
    pub async fn ensure_indexes(&self) -> Result<()> {
        let model = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(model).await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn save(&self, user: &User) -> Result<User> {
        self.collection.insert_one(user).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AuthError::bad_model(ErrorCode::UserAlreadyExists)
            } else {
                e.into()
            }
        })?;
        Ok(user.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn update_refresh_token(
        &self,
        user_id: &str,
        refresh_token_hash: Option<&str>,
    ) -> Result<Option<User>> {
        let update = match refresh_token_hash {
            Some(hash) => doc! { "$set": { "refreshTokenHash": hash } },
            None => doc! { "$unset": { "refreshTokenHash": "" } },
        };

        // Single conditional update; rotation never reads-then-writes.
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": user_id }, update)
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated)
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};
    matches!(
        &*err.kind,
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000
    )
}
