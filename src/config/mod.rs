use std::env;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_secs: u64,
    pub posts_page_size: u32,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        let jwt_secret = env::var("JWT_SIGNING_KEY").unwrap_or_default();
        if jwt_secret.is_empty() {
            tracing::warn!("JWT_SIGNING_KEY is not set, tokens will be signed with an empty key");
        }

        Ok(Config {
            database_url: env::var("DATABASE_URL")?,
            jwt_secret,
            jwt_expiration_secs: expiration_secs(env::var("JWT_EXPIRATION").ok().as_deref()),
            posts_page_size: env::var("POSTS_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|size| *size > 0)
                .unwrap_or(5),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(8080),
            api_base_uri: env::var("API_BASE_URI").unwrap_or_default(),
        })
    }

    /// Config for tests and tools that never touch the database.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Config {
            database_url: String::new(),
            jwt_secret: secret.into(),
            jwt_expiration_secs: 24 * 3600,
            posts_page_size: 5,
            server_host: "127.0.0.1".into(),
            server_port: 8080,
            api_base_uri: String::new(),
        }
    }

    pub fn jwt_expiration(&self) -> Duration {
        Duration::from_secs(self.jwt_expiration_secs)
    }
}

const DEFAULT_EXPIRATION_HOURS: u64 = 24;

/// Parses `JWT_EXPIRATION` ("48" or "48h") into seconds, falling back to a day.
fn expiration_secs(raw: Option<&str>) -> u64 {
    let hours = raw
        .and_then(|v| v.trim().trim_end_matches('h').parse::<u64>().ok())
        .filter(|h| *h > 0)
        .unwrap_or(DEFAULT_EXPIRATION_HOURS);

    hours.checked_mul(3600).unwrap_or_else(|| {
        tracing::warn!("JWT_EXPIRATION of {} hours is out of range, using {}h", hours, DEFAULT_EXPIRATION_HOURS);
        DEFAULT_EXPIRATION_HOURS * 3600
    })
}
