pub mod auth;
pub mod post;
pub mod user;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::{
    AppState,
    middleware::{log_errors, require_auth},
};

/// Builds the full application router, nested under `api_base_uri` when set.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/posts", get(post::get_posts))
        .route("/posts/pages", get(post::count_pages))
        .route("/posts/{id}", get(post::get_post))
        .route("/users", get(user::get_users).post(user::register))
        .route("/users/{user_name}", get(user::get_user));

    let protected_routes = Router::new()
        .route("/login/refresh", post(auth::refresh))
        .route("/posts", post(post::add_post))
        .route("/users/{user_name}", put(user::update_user))
        .route_layer(axum::middleware::from_fn_with_state(
            state.gate(),
            require_auth,
        ));

    let api = Router::new().merge(public_routes).merge(protected_routes);

    let base = state.config.api_base_uri.trim_end_matches('/');
    let router = if base.is_empty() {
        api
    } else if base.starts_with('/') {
        Router::new().nest(base, api)
    } else {
        Router::new().nest(&format!("/{base}"), api)
    };

    router
        .layer(axum::middleware::from_fn(log_errors))
        .with_state(state)
}
