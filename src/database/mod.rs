// Store traits consumed by the handlers, plus the Postgres implementation.

pub mod entities;
pub mod repositories;

use async_trait::async_trait;
use thiserror::Error;

pub use entities::{NewPost, PostEntity, UserEntity, UserRecord};
pub use repositories::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate entry: {0}")]
    Duplicate(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user_name: &str, password_hash: &str)
    -> Result<UserRecord, StoreError>;

    /// Row including the password hash, for login checks.
    async fn find_credentials(&self, user_name: &str) -> Result<Option<UserEntity>, StoreError>;

    async fn find_user(&self, user_name: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError>;

    async fn update_password(
        &self,
        user_name: &str,
        password_hash: &str,
    ) -> Result<UserRecord, StoreError>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn create_post(&self, author: &str, post: &NewPost) -> Result<PostEntity, StoreError>;

    async fn find_post(&self, url_handle: &str) -> Result<Option<PostEntity>, StoreError>;

    /// Newest first.
    async fn list_posts(&self, offset: i64, limit: i64) -> Result<Vec<PostEntity>, StoreError>;

    async fn count_posts(&self) -> Result<i64, StoreError>;
}
