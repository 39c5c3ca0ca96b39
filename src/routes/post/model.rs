use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::{NewPost, PostEntity};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub url_handle: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub url_handle: String,
    pub title: String,
    pub author: String,
    pub summary: String,
    pub body: String,
    pub creation_time: DateTime<Utc>,
}

/// A post without its body, as returned by the paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMetadata {
    pub url_handle: String,
    pub title: String,
    pub author: String,
    pub summary: String,
    pub creation_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PageCount {
    pub pages: i64,
}

const RESERVED_HANDLE: &str = "pages";

impl CreatePostRequest {
    pub fn validate(self) -> Result<NewPost, AppError> {
        let url_handle = self.url_handle.trim();
        if url_handle.is_empty() {
            return Err(AppError::Validation("urlHandle must not be empty".into()));
        }
        if url_handle.contains('/') {
            return Err(AppError::Validation("urlHandle must not contain '/'".into()));
        }
        // GET /posts/pages is the page count, so a post there could never be read back
        if url_handle == RESERVED_HANDLE {
            return Err(AppError::Validation(format!("urlHandle '{RESERVED_HANDLE}' is reserved")));
        }

        Ok(NewPost {
            url_handle: url_handle.to_owned(),
            title: self.title,
            summary: self.summary,
            body: self.body,
        })
    }
}

impl From<PostEntity> for Post {
    fn from(post: PostEntity) -> Self {
        Self {
            url_handle: post.url_handle,
            title: post.title,
            author: post.author,
            summary: post.summary,
            body: post.body,
            creation_time: post.created_at,
        }
    }
}

impl From<PostEntity> for PostMetadata {
    fn from(post: PostEntity) -> Self {
        Self {
            url_handle: post.url_handle,
            title: post.title,
            author: post.author,
            summary: post.summary,
            creation_time: post.created_at,
        }
    }
}

/// Index of the first post on a 1-based `page`.
pub fn page_offset(page: i64, page_size: u32) -> Result<i64, AppError> {
    if page < 1 {
        return Err(AppError::InvalidPage(page));
    }
    (page - 1)
        .checked_mul(i64::from(page_size))
        .ok_or(AppError::InvalidPage(page))
}

pub fn page_count(total: i64, page_size: u32) -> i64 {
    let size = i64::from(page_size.max(1));
    (total.max(0) + size - 1) / size
}
