use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};

use crate::middleware::entry_point::Unauthorized;
use sno_auth::Subject;

/// Per-request record of who is calling, inserted by the authorization
/// filter and dropped with the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityContext {
    subject: Option<Subject>,
}

impl SecurityContext {
    pub fn anonymous() -> Self {
        Self { subject: None }
    }

    pub fn authenticated(subject: Subject) -> Self {
        Self {
            subject: Some(subject),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.subject.is_some()
    }

    pub fn subject(&self) -> Option<&Subject> {
        self.subject.as_ref()
    }
}

/// Extractor for the authenticated subject.
///
/// Reads the context the filter left behind and never looks at the token
/// again. Rejects with the same 401 as the filter when the request is
/// anonymous.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Subject);

impl AuthUser {
    pub fn login(&self) -> &str {
        self.0.as_str()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Unauthorized;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SecurityContext>()
            .and_then(SecurityContext::subject)
            .cloned()
            .map(AuthUser)
            .ok_or(Unauthorized)
    }
}
