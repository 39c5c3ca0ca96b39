use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::model::{RegisterRequest, UpdatePasswordRequest, User};
use crate::{
    AppState,
    auth::{hash_password, verify_password},
    error::AppError,
    extract::AppJson,
    middleware::Identity,
};

#[axum::debug_handler]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users: Vec<User> = state
        .users
        .list_users()
        .await?
        .into_iter()
        .map(User::from)
        .collect();

    Ok(Json(users))
}

#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_name): Path<String>,
) -> Result<Json<User>, AppError> {
    match state.users.find_user(&user_name).await? {
        Some(user) => Ok(Json(user.into())),
        None => Err(AppError::UserNotFound(user_name)),
    }
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let password_hash = hash_password(&req.password)?;
    let user = state
        .users
        .create_user(req.user_name.trim(), &password_hash)
        .await?;

    Ok((StatusCode::CREATED, Json(User::from(user))))
}

/// Changes the caller's own password after re-checking the old one.
#[axum::debug_handler]
pub async fn update_user(
    Extension(identity): Extension<Identity>,
    State(state): State<AppState>,
    Path(user_name): Path<String>,
    AppJson(req): AppJson<UpdatePasswordRequest>,
) -> Result<Json<User>, AppError> {
    if identity.user_name != user_name {
        tracing::warn!(
            "{} tried to change the password of {}",
            identity.user_name,
            user_name
        );
        return Err(AppError::Forbidden(user_name));
    }
    if req.new_password.is_empty() {
        return Err(AppError::Validation("newPassword must not be empty".into()));
    }

    let current = state
        .users
        .find_credentials(&user_name)
        .await?
        .ok_or_else(|| AppError::UserNotFound(user_name.clone()))?;

    if !verify_password(&req.old_password, &current.password_hash)? {
        return Err(AppError::IncorrectUsernameOrPassword);
    }

    let password_hash = hash_password(&req.new_password)?;
    let user = state
        .users
        .update_password(&user_name, &password_hash)
        .await?;

    tracing::info!("Password updated for user: {}", user.user_name);
    Ok(Json(user.into()))
}
