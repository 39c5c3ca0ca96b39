mod post;
mod user;

use sqlx::PgPool;

use super::StoreError;

/// Postgres-backed implementation of both stores.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Turns a unique-constraint violation into `StoreError::Duplicate`.
fn map_unique(err: sqlx::Error, key: &str) -> StoreError {
    match err.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => StoreError::Duplicate(key.to_owned()),
        _ => StoreError::Database(err),
    }
}
