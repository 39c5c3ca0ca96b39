use async_trait::async_trait;

use super::{PgStore, map_unique};
use crate::database::{StoreError, UserEntity, UserRecord, UserStore};

const USER_RECORD_SELECT: &str = r#"
    SELECT
        u.user_name,
        COALESCE(
            array_agg(p.url_handle ORDER BY p.created_at) FILTER (WHERE p.url_handle IS NOT NULL),
            ARRAY[]::TEXT[]
        ) AS posts
    FROM users u
    LEFT JOIN posts p ON p.author_id = u.id
"#;

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(
        &self,
        user_name: &str,
        password_hash: &str,
    ) -> Result<UserRecord, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (user_name, password_hash)
            VALUES ($1, $2)
            RETURNING user_name, ARRAY[]::TEXT[] AS posts
            "#,
        )
        .bind(user_name)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, user_name))?;

        tracing::info!("Created user: {}", user.user_name);
        Ok(user)
    }

    async fn find_credentials(&self, user_name: &str) -> Result<Option<UserEntity>, StoreError> {
        let user = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT user_name, password_hash
            FROM users
            WHERE user_name = $1
            "#,
        )
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user(&self, user_name: &str) -> Result<Option<UserRecord>, StoreError> {
        let sql = format!("{USER_RECORD_SELECT} WHERE u.user_name = $1 GROUP BY u.id");
        let user = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(user_name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let sql = format!("{USER_RECORD_SELECT} GROUP BY u.id ORDER BY u.user_name");
        let users = sqlx::query_as::<_, UserRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn update_password(
        &self,
        user_name: &str,
        password_hash: &str,
    ) -> Result<UserRecord, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $1, updated_at = now()
            WHERE user_name = $2
            "#,
        )
        .bind(password_hash)
        .bind(user_name)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(user_name.to_owned()));
        }

        self.find_user(user_name)
            .await?
            .ok_or_else(|| StoreError::NotFound(user_name.to_owned()))
    }
}
