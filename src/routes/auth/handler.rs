use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::model::LoginRequest;
use crate::{
    AppState,
    auth::verify_password,
    error::AppError,
    extract::AppJson,
    middleware::{AUTH_TOKEN_HEADER, Identity},
};

/// Checks the password and hands back a fresh token in the `X-Auth-Token` header.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Unknown users and wrong passwords look the same to the caller
    let user = match state.users.find_credentials(&req.user_name).await? {
        Some(user) => user,
        None => {
            tracing::info!("Login attempt for unknown user: {}", req.user_name);
            return Err(AppError::IncorrectUsernameOrPassword);
        }
    };

    if !verify_password(&req.password, &user.password_hash)? {
        tracing::info!("Wrong password for user: {}", user.user_name);
        return Err(AppError::IncorrectUsernameOrPassword);
    }

    let token = state.tokens.generate(&user.user_name)?;
    tracing::info!("User logged in: {}", user.user_name);

    Ok((StatusCode::OK, [(AUTH_TOKEN_HEADER, token)]))
}

#[axum::debug_handler]
pub async fn refresh(
    Extension(identity): Extension<Identity>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let token = state.tokens.generate(&identity.user_name)?;
    Ok((StatusCode::OK, [(AUTH_TOKEN_HEADER, token)]))
}
