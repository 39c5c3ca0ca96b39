#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use blog::{
    AppState,
    auth::TokenService,
    config::Config,
    database::{NewPost, PostEntity, PostStore, StoreError, UserEntity, UserRecord, UserStore},
    routes,
};
use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

pub const SECRET: &str = "integration-secret";

/// Cheap bcrypt cost so fixtures stay fast.
const FIXTURE_COST: u32 = 4;

#[derive(Default)]
struct Inner {
    users: Vec<UserEntity>,
    posts: Vec<PostEntity>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn add_user(&self, user_name: &str, password: &str) {
        let hash = bcrypt::hash(password, FIXTURE_COST).unwrap();
        let mut inner = self.inner.lock().unwrap();
        inner.users.push(UserEntity {
            user_name: user_name.to_owned(),
            password_hash: hash,
        });
    }

    /// Inserts a post whose creation time is `minutes` after a fixed epoch.
    pub fn add_post(&self, author: &str, url_handle: &str, minutes: i64) {
        let mut inner = self.inner.lock().unwrap();
        inner.posts.push(PostEntity {
            url_handle: url_handle.to_owned(),
            author: author.to_owned(),
            title: format!("Title of {url_handle}"),
            summary: format!("Summary of {url_handle}"),
            body: format!("Body of {url_handle}"),
            created_at: epoch() + Duration::minutes(minutes),
        });
    }

    pub fn post_count(&self) -> usize {
        self.inner.lock().unwrap().posts.len()
    }

    fn record(inner: &Inner, user_name: &str) -> UserRecord {
        let mut posts: Vec<&PostEntity> =
            inner.posts.iter().filter(|p| p.author == user_name).collect();
        posts.sort_by_key(|p| p.created_at);
        UserRecord {
            user_name: user_name.to_owned(),
            posts: posts.into_iter().map(|p| p.url_handle.clone()).collect(),
        }
    }
}

fn epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(
        &self,
        user_name: &str,
        password_hash: &str,
    ) -> Result<UserRecord, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.users.iter().any(|u| u.user_name == user_name) {
            return Err(StoreError::Duplicate(user_name.to_owned()));
        }
        inner.users.push(UserEntity {
            user_name: user_name.to_owned(),
            password_hash: password_hash.to_owned(),
        });
        Ok(Self::record(&inner, user_name))
    }

    async fn find_credentials(&self, user_name: &str) -> Result<Option<UserEntity>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.user_name == user_name).cloned())
    }

    async fn find_user(&self, user_name: &str) -> Result<Option<UserRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .users
            .iter()
            .find(|u| u.user_name == user_name)
            .map(|u| Self::record(&inner, &u.user_name)))
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut names: Vec<&str> = inner.users.iter().map(|u| u.user_name.as_str()).collect();
        names.sort();
        Ok(names.into_iter().map(|n| Self::record(&inner, n)).collect())
    }

    async fn update_password(
        &self,
        user_name: &str,
        password_hash: &str,
    ) -> Result<UserRecord, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.users.iter_mut().find(|u| u.user_name == user_name) {
            Some(user) => user.password_hash = password_hash.to_owned(),
            None => return Err(StoreError::NotFound(user_name.to_owned())),
        }
        Ok(Self::record(&inner, user_name))
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn create_post(&self, author: &str, post: &NewPost) -> Result<PostEntity, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.users.iter().any(|u| u.user_name == author) {
            return Err(StoreError::NotFound(author.to_owned()));
        }
        if inner.posts.iter().any(|p| p.url_handle == post.url_handle) {
            return Err(StoreError::Duplicate(post.url_handle.clone()));
        }
        let created = PostEntity {
            url_handle: post.url_handle.clone(),
            author: author.to_owned(),
            title: post.title.clone(),
            summary: post.summary.clone(),
            body: post.body.clone(),
            created_at: Utc::now(),
        };
        inner.posts.push(created.clone());
        Ok(created)
    }

    async fn find_post(&self, url_handle: &str) -> Result<Option<PostEntity>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.posts.iter().find(|p| p.url_handle == url_handle).cloned())
    }

    async fn list_posts(&self, offset: i64, limit: i64) -> Result<Vec<PostEntity>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut posts = inner.posts.clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_posts(&self) -> Result<i64, StoreError> {
        Ok(self.inner.lock().unwrap().posts.len() as i64)
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub tokens: TokenService,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(Config::with_secret(SECRET))
    }

    pub fn with_config(config: Config) -> Self {
        let store = Arc::new(MemoryStore::default());
        let state = AppState::new(config, store.clone(), store.clone());
        let tokens = state.tokens.clone();
        Self {
            router: routes::router(state),
            store,
            tokens,
        }
    }

    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.unwrap()
    }

    pub fn token_for(&self, user_name: &str) -> String {
        self.tokens.generate(user_name).unwrap()
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header("X-Auth-Token", token);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_json<T: DeserializeOwned>(resp: Response<Body>) -> T {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A request whose body is sent as-is, without a content type.
pub fn raw_request(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("X-Auth-Token", token);
    }
    builder.body(Body::from(body.to_owned())).unwrap()
}
