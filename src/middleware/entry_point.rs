//! Terminal response for unauthenticated requests to protected paths.
//!
//! The response is the same whatever went wrong with the credential, so a
//! caller cannot tell a missing token from an expired or forged one.

use axum::{
    Json,
    extract::Request,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Builds the uniform 401.
pub fn unauthorized_response() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        Json(json!({ "error": UNAUTHORIZED_MESSAGE })),
    )
        .into_response()
}

/// Ends `request` with the uniform 401. Nothing downstream runs.
pub fn handle(request: &Request) -> Response {
    debug!(
        method = %request.method(),
        path = %request.uri().path(),
        "Rejecting unauthenticated request"
    );
    unauthorized_response()
}

/// Rejection of extractors that need an authenticated subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unauthorized;

impl IntoResponse for Unauthorized {
    fn into_response(self) -> Response {
        unauthorized_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_uniform_unauthorized_response() {
        let request = Request::builder()
            .uri("/api/lectures")
            .body(Body::empty())
            .unwrap();
        let response = handle(&request);

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, json!({ "error": "Unauthorized" }));
    }

    #[test]
    fn test_extractor_rejection_matches_handler() {
        let from_handler = unauthorized_response();
        let from_rejection = Unauthorized.into_response();
        assert_eq!(from_handler.status(), from_rejection.status());
        assert_eq!(
            from_handler.headers().get(header::WWW_AUTHENTICATE),
            from_rejection.headers().get(header::WWW_AUTHENTICATE)
        );
    }
}
