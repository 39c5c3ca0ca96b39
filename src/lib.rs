use std::sync::Arc;

use auth::TokenService;
use config::Config;
use database::{PostStore, UserStore};
use middleware::AccessGate;

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tokens: TokenService,
    pub users: Arc<dyn UserStore>,
    pub posts: Arc<dyn PostStore>,
}

impl AppState {
    pub fn new(config: Config, users: Arc<dyn UserStore>, posts: Arc<dyn PostStore>) -> Self {
        let tokens = TokenService::from_config(&config);
        Self {
            config: Arc::new(config),
            tokens,
            users,
            posts,
        }
    }

    pub fn gate(&self) -> AccessGate {
        AccessGate::new(self.tokens.clone())
    }
}
