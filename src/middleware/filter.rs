//! Authorization filter.
//!
//! Runs once per request, after the origin guard and CORS layer:
//!
//! 1. A request that already carries a [`SecurityContext`] has been decided
//!    and passes straight through.
//! 2. A public path gets an anonymous context; any token on it is ignored.
//! 3. A protected path needs `Authorization: Bearer <token>` with a token the
//!    [`TokenService`](sno_auth::TokenService) accepts. On success the
//!    authenticated context is inserted and the next layer is called once; on
//!    failure the entry point answers and the next layer is never called.

use axum::{
    extract::{OriginalUri, Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::metrics::track_auth_decision;
use crate::middleware::context::SecurityContext;
use crate::middleware::entry_point;
use crate::state::AppState;
use sno_auth::{Subject, TokenError, TokenService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    Protected,
}

/// Why a protected request was turned away. Logged, never returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    MissingCredential,
    Token(TokenError),
}

impl AuthFailure {
    pub fn reason(&self) -> &'static str {
        match self {
            AuthFailure::MissingCredential => "missing",
            AuthFailure::Token(e) => e.reason(),
        }
    }
}

pub fn classify(state: &AppState, path: &str) -> RouteClass {
    if state.security_config.is_public(path) {
        RouteClass::Public
    } else {
        RouteClass::Protected
    }
}

/// Pulls the token out of `Authorization: Bearer <token>`. The scheme is
/// matched case-insensitively; anything else counts as no credential.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> Result<Subject, AuthFailure> {
    let token = bearer_token(headers).ok_or(AuthFailure::MissingCredential)?;
    tokens.validate(token).map_err(AuthFailure::Token)
}

/// Path as the client sent it, before any nesting stripped a prefix.
fn request_path(req: &Request) -> String {
    req.extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.0.path().to_string())
        .unwrap_or_else(|| req.uri().path().to_string())
}

pub async fn authorize(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    if req.extensions().get::<SecurityContext>().is_some() {
        return next.run(req).await;
    }

    let path = request_path(&req);
    match classify(&state, &path) {
        RouteClass::Public => {
            req.extensions_mut().insert(SecurityContext::anonymous());
            next.run(req).await
        }
        RouteClass::Protected => match authenticate(req.headers(), &state.tokens) {
            Ok(subject) => {
                debug!(subject = %subject, %path, "Request authenticated");
                track_auth_decision(true, "valid");
                req.extensions_mut()
                    .insert(SecurityContext::authenticated(subject));
                next.run(req).await
            }
            Err(failure) => {
                debug!(reason = failure.reason(), %path, "Request rejected");
                track_auth_decision(false, failure.reason());
                entry_point::handle(&req)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&headers("bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("Bearer")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_failure_reasons() {
        assert_eq!(AuthFailure::MissingCredential.reason(), "missing");
        assert_eq!(AuthFailure::Token(TokenError::Expired).reason(), "expired");
    }
}
