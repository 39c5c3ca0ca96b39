use chrono::{DateTime, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use super::AuthError;
use crate::config::Config;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user: String,
    pub authorized: bool,
    pub exp: i64,
}

/// Mints and validates stateless HS256 bearer tokens.
///
/// Holds only immutable key material, so clones are cheap to hand out to
/// the access gate and to handlers.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: chrono::Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: std::time::Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Any HMAC variant signed with our secret is acceptable; every other
        // family (and `none`) is refused before the signature is checked.
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            // Lifetimes chrono cannot represent saturate; issuing then fails
            // cleanly in `generate_at` instead of wrapping negative.
            ttl: i64::try_from(ttl.as_secs())
                .ok()
                .and_then(chrono::Duration::try_seconds)
                .unwrap_or(chrono::Duration::MAX),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.jwt_secret.as_bytes(), config.jwt_expiration())
    }

    pub fn generate(&self, user_name: &str) -> Result<String, AuthError> {
        self.generate_at(user_name, Utc::now())
    }

    /// Issues a token as if it were minted at `issued_at`.
    pub fn generate_at(&self, user_name: &str, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let exp = issued_at
            .checked_add_signed(self.ttl)
            .ok_or(AuthError::SigningFailure)?
            .timestamp();

        let claims = Claims {
            user: user_name.to_owned(),
            authorized: true,
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign token for {}: {}", user_name, e);
            AuthError::SigningFailure
        })
    }

    /// Returns the user name carried by a valid, unexpired token.
    pub fn validate(&self, token: &str) -> Result<String, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredCredential,
                kind => {
                    tracing::debug!("Rejected token: {:?}", kind);
                    AuthError::InvalidCredential
                }
            }
        })?;

        if !data.claims.authorized {
            return Err(AuthError::InvalidCredential);
        }

        Ok(data.claims.user)
    }
}
