use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::model::{
    CreatePostRequest, PageCount, PageQuery, Post, PostMetadata, page_count, page_offset,
};
use crate::{
    AppState,
    database::StoreError,
    error::AppError,
    extract::{AppJson, AppQuery},
    middleware::Identity,
};

#[axum::debug_handler]
pub async fn get_posts(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PageQuery>,
) -> Result<Json<Vec<PostMetadata>>, AppError> {
    let page_size = state.config.posts_page_size;
    let offset = page_offset(query.page.unwrap_or(1), page_size)?;

    let posts: Vec<PostMetadata> = state
        .posts
        .list_posts(offset, i64::from(page_size))
        .await?
        .into_iter()
        .map(PostMetadata::from)
        .collect();

    Ok(Json(posts))
}

#[axum::debug_handler]
pub async fn count_pages(State(state): State<AppState>) -> Result<Json<PageCount>, AppError> {
    let total = state.posts.count_posts().await?;
    Ok(Json(PageCount {
        pages: page_count(total, state.config.posts_page_size),
    }))
}

#[axum::debug_handler]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Post>, AppError> {
    match state.posts.find_post(&id).await? {
        Some(post) => Ok(Json(post.into())),
        None => Err(AppError::PostNotFound(id)),
    }
}

/// Stores a new post authored by the authenticated user.
#[axum::debug_handler]
pub async fn add_post(
    Extension(identity): Extension<Identity>,
    State(state): State<AppState>,
    AppJson(req): AppJson<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_post = req.validate()?;

    let post = match state.posts.create_post(&identity.user_name, &new_post).await {
        Ok(post) => post,
        // The token outlived its user
        Err(StoreError::NotFound(_)) => {
            return Err(AppError::Validation(format!(
                "author {} does not exist",
                identity.user_name
            )));
        }
        Err(e) => return Err(e.into()),
    };

    Ok((StatusCode::CREATED, Json(Post::from(post))))
}
