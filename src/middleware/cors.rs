//! Cross-origin policy.
//!
//! Two pieces, applied in this order ahead of authorization:
//!
//! - [`reject_disallowed_origin`] turns away requests whose `Origin` is not
//!   in the allowed set with a 403, before any credential is looked at.
//! - [`cors_layer`] adds the CORS response headers and answers preflight
//!   `OPTIONS` requests itself.

use std::time::Duration;

use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::warn;

use crate::metrics::track_cors_rejection;
use crate::state::AppState;
use sno_config::CorsConfig;

pub const INVALID_CORS_MESSAGE: &str = "Invalid CORS request";

/// Builds the header-emitting layer from the policy table.
///
/// A `*` origin or header list is mirrored from the request rather than
/// sent literally, which browsers refuse together with credentials.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = if config.allows_any_origin() {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(
            config
                .allowed_origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        )
    };

    let headers = if config.allows_any_header() {
        AllowHeaders::mirror_request()
    } else {
        AllowHeaders::list(
            config
                .allowed_headers
                .iter()
                .filter_map(|h| HeaderName::try_from(h.as_str()).ok()),
        )
    };

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(config.allow_credentials)
        .max_age(Duration::from_secs(config.max_age_secs))
}

/// True when `origin` names the host the request was sent to, in which case
/// the request is not cross-origin at all.
fn is_same_origin(origin: &str, headers: &HeaderMap) -> bool {
    let Some(host) = headers.get(header::HOST).and_then(|h| h.to_str().ok()) else {
        return false;
    };
    origin
        .split_once("://")
        .is_some_and(|(_, authority)| authority.eq_ignore_ascii_case(host))
}

pub async fn reject_disallowed_origin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    if let Some(origin) = req.headers().get(header::ORIGIN) {
        let allowed = origin.to_str().is_ok_and(|o| {
            state.cors_config.allows_origin(o) || is_same_origin(o, req.headers())
        });

        if !allowed {
            warn!(
                origin = ?origin,
                method = %req.method(),
                path = %req.uri().path(),
                "Rejected cross-origin request"
            );
            track_cors_rejection();
            return (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": INVALID_CORS_MESSAGE })),
            )
                .into_response();
        }
    }

    next.run(req).await
}
