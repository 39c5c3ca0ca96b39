mod auth;
mod error_handler;

pub use auth::{AUTH_TOKEN_HEADER, AccessGate, GateOutcome, Identity, require_auth};
pub use error_handler::log_errors;
