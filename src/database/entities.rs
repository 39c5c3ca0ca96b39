use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// The stored credentials for one user.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub user_name: String,
    pub password_hash: String,
}

/// A user together with the handles of the posts they wrote.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct UserRecord {
    pub user_name: String,
    pub posts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PostEntity {
    pub url_handle: String,
    pub author: String,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub url_handle: String,
    pub title: String,
    pub summary: String,
    pub body: String,
}
