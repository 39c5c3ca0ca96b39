use async_trait::async_trait;

use super::{PgStore, map_unique};
use crate::database::{NewPost, PostEntity, PostStore, StoreError};

#[async_trait]
impl PostStore for PgStore {
    async fn create_post(&self, author: &str, post: &NewPost) -> Result<PostEntity, StoreError> {
        let created = sqlx::query_as::<_, PostEntity>(
            r#"
            WITH inserted AS (
                INSERT INTO posts (url_handle, author_id, title, summary, body)
                SELECT $1, id, $3, $4, $5 FROM users WHERE user_name = $2
                RETURNING url_handle, author_id, title, summary, body, created_at
            )
            SELECT i.url_handle, u.user_name AS author, i.title, i.summary, i.body, i.created_at
            FROM inserted i
            JOIN users u ON u.id = i.author_id
            "#,
        )
        .bind(&post.url_handle)
        .bind(author)
        .bind(&post.title)
        .bind(&post.summary)
        .bind(&post.body)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique(e, &post.url_handle))?;

        match created {
            Some(post) => {
                tracing::info!("Created post {} by {}", post.url_handle, post.author);
                Ok(post)
            }
            None => Err(StoreError::NotFound(author.to_owned())),
        }
    }

    async fn find_post(&self, url_handle: &str) -> Result<Option<PostEntity>, StoreError> {
        let post = sqlx::query_as::<_, PostEntity>(
            r#"
            SELECT p.url_handle, u.user_name AS author, p.title, p.summary, p.body, p.created_at
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.url_handle = $1
            "#,
        )
        .bind(url_handle)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn list_posts(&self, offset: i64, limit: i64) -> Result<Vec<PostEntity>, StoreError> {
        let posts = sqlx::query_as::<_, PostEntity>(
            r#"
            SELECT p.url_handle, u.user_name AS author, p.title, p.summary, p.body, p.created_at
            FROM posts p
            JOIN users u ON u.id = p.author_id
            ORDER BY p.created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn count_posts(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
