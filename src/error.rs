use axum::Json;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;
use crate::database::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("incorrect username or password")]
    IncorrectUsernameOrPassword,

    #[error("not allowed to modify user {0}")]
    Forbidden(String),

    #[error("user {0} not found")]
    UserNotFound(String),

    #[error("post with handle {0} not found")]
    PostNotFound(String),

    #[error("{0} already exists")]
    Duplicate(String),

    #[error("invalid page {0}")]
    InvalidPage(i64),

    #[error("{0}")]
    Validation(String),

    #[error("internal server error")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    code: i32,
    error_message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Auth(_) | AppError::IncorrectUsernameOrPassword => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::UserNotFound(_) | AppError::PostNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Duplicate(_) => StatusCode::CONFLICT,
            AppError::InvalidPage(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(key) => AppError::Duplicate(key),
            StoreError::NotFound(key) => AppError::UserNotFound(key),
            StoreError::Database(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal details go to the log, not to the caller.
        let error_message = match &self {
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                self.to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            code: status.as_u16() as i32,
            error_message,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_auth_error_is_unauthorized() {
        for err in [
            AuthError::MissingCredential,
            AuthError::InvalidCredential,
            AuthError::ExpiredCredential,
            AuthError::SigningFailure,
        ] {
            assert_eq!(AppError::from(err).status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_store_errors_map_to_statuses() {
        assert_eq!(
            AppError::from(StoreError::Duplicate("first-post".into())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(StoreError::NotFound("ghost".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(StoreError::Database(sqlx::Error::RowNotFound)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
