use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthError, TokenService};
use crate::error::AppError;

// Header names are case-insensitive; clients may send `X-Auth-Token`.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// The user resolved from a valid token, attached to the request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_name: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum GateOutcome {
    Admitted(Identity),
    Rejected(AuthError),
}

/// Decides whether a request may reach a protected handler.
#[derive(Clone)]
pub struct AccessGate {
    tokens: TokenService,
}

impl AccessGate {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }

    pub fn check(&self, headers: &HeaderMap) -> GateOutcome {
        let token = match headers.get(AUTH_TOKEN_HEADER).map(|v| v.to_str()) {
            None => return GateOutcome::Rejected(AuthError::MissingCredential),
            Some(Ok("")) => return GateOutcome::Rejected(AuthError::MissingCredential),
            Some(Ok(token)) => token,
            Some(Err(_)) => return GateOutcome::Rejected(AuthError::InvalidCredential),
        };

        match self.tokens.validate(token) {
            Ok(user_name) => GateOutcome::Admitted(Identity { user_name }),
            Err(e) => GateOutcome::Rejected(e),
        }
    }
}

pub async fn require_auth(
    State(gate): State<AccessGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    match gate.check(req.headers()) {
        GateOutcome::Admitted(identity) => {
            tracing::debug!("Admitted {} to {}", identity.user_name, req.uri().path());
            req.extensions_mut().insert(identity);
            Ok(next.run(req).await)
        }
        GateOutcome::Rejected(reason) => {
            tracing::info!("Rejected request to {}: {}", req.uri().path(), reason);
            Err(reason.into())
        }
    }
}
