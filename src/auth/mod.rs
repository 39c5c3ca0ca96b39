//! Credential issuance and validation.

mod password;
mod token;

pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};

use thiserror::Error;

/// Reasons a request fails authentication. Every variant maps to HTTP 401.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing auth token")]
    MissingCredential,

    #[error("invalid auth token")]
    InvalidCredential,

    #[error("auth token expired")]
    ExpiredCredential,

    #[error("failed to sign auth token")]
    SigningFailure,
}
