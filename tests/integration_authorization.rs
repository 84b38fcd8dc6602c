mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::json;
use tower::ServiceExt;

use common::{body_json, get, get_with_token, json_request, setup_test_app, setup_test_app_with};
use sno_api::middleware::SecurityContext;
use sno_auth::{Subject, TokenService};
use sno_config::{CorsConfig, JwtConfig, SecurityConfig};

const PROTECTED: &[(&str, &str)] = &[
    ("GET", "/api/lectures"),
    ("GET", "/api/lectures/filter?title=intro"),
    ("GET", "/api/lectures/1"),
    ("DELETE", "/api/lectures/1"),
    ("PUT", "/api/lectures/1/forum/2"),
    ("GET", "/api/auth/me"),
    ("GET", "/api/does-not-exist"),
    ("GET", "/"),
];

fn request(method: &str, uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::from_bytes(method.as_bytes()).unwrap())
        .uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

async fn assert_uniform_unauthorized(response: axum::http::Response<Body>) {
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
    assert_eq!(body_json(response).await, json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn test_protected_paths_without_token_are_unauthorized() {
    let app = setup_test_app();

    for (method, uri) in PROTECTED {
        let response = app
            .router
            .clone()
            .oneshot(request(method, uri, None))
            .await
            .unwrap();
        assert_uniform_unauthorized(response).await;
    }
}

#[tokio::test]
async fn test_expired_token_is_indistinguishable_from_missing() {
    let app = setup_test_app();
    let expired = format!("Bearer {}", app.expired_token_for("jdoe"));

    for (method, uri) in PROTECTED {
        let response = app
            .router
            .clone()
            .oneshot(request(method, uri, Some(&expired)))
            .await
            .unwrap();
        assert_uniform_unauthorized(response).await;
    }
}

#[tokio::test]
async fn test_malformed_credentials_are_unauthorized() {
    let app = setup_test_app();
    let foreign = TokenService::new(&JwtConfig {
        secret: "some-other-deployment-secret-value".to_string(),
        access_token_expiry: 3600,
    })
    .issue(&Subject::new("jdoe"))
    .unwrap();
    let foreign = format!("Bearer {}", foreign.access_token);
    let tampered = format!("Bearer {}x", app.token_for("jdoe"));

    for header_value in [
        "Bearer not-a-jwt",
        "Bearer a.b.c",
        "Basic dXNlcjpwYXNz",
        "Bearer",
        "",
        foreign.as_str(),
        tampered.as_str(),
    ] {
        let response = app
            .router
            .clone()
            .oneshot(request("GET", "/api/lectures", Some(header_value)))
            .await
            .unwrap();
        assert_uniform_unauthorized(response).await;
    }
}

#[tokio::test]
async fn test_valid_token_reaches_handler() {
    let app = setup_test_app();
    let token = app.token_for("jdoe");

    let response = app
        .router
        .clone()
        .oneshot(get_with_token("/api/lectures", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["meta"]["total"], 0);
}

#[tokio::test]
async fn test_valid_token_on_unknown_path_is_not_found() {
    let app = setup_test_app();
    let token = app.token_for("jdoe");

    let response = app
        .router
        .oneshot(get_with_token("/api/does-not-exist", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_paths_ignore_tokens() {
    let app = setup_test_app();

    for uri in ["/health", "/api-docs/openapi.json"] {
        let without = app.router.clone().oneshot(get(uri)).await.unwrap();
        let with_garbage = app
            .router
            .clone()
            .oneshot(get_with_token(uri, "garbage"))
            .await
            .unwrap();

        assert_eq!(without.status(), StatusCode::OK, "{uri}");
        assert_eq!(with_garbage.status(), without.status(), "{uri}");
    }
}

#[tokio::test]
async fn test_public_login_with_garbage_token_is_decided_by_handler() {
    let app = setup_test_app();
    let body = json!({ "login": "nobody", "password": "whatever1" });

    let without = app
        .router
        .clone()
        .oneshot(json_request("POST", "/api/auth/login", None, &body))
        .await
        .unwrap();
    let with_garbage = app
        .router
        .clone()
        .oneshot(json_request("POST", "/api/auth/login", Some("garbage"), &body))
        .await
        .unwrap();

    // Both reach the handler, which rejects the credentials.
    assert_eq!(without.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(with_garbage.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(without).await, json!({ "error": "Invalid login or password" }));
    assert_eq!(body_json(with_garbage).await, json!({ "error": "Invalid login or password" }));
}

#[tokio::test]
async fn test_garbage_token_on_public_path_is_anonymous() {
    // Making /api/auth/me public shows that the token is not used to
    // populate the security context there.
    let app = setup_test_app_with(
        CorsConfig::default(),
        SecurityConfig::with_public_paths(["/health", "/api/auth/me"]),
    );

    let response = app
        .router
        .oneshot(get_with_token("/api/auth/me", "garbage"))
        .await
        .unwrap();
    assert_uniform_unauthorized(response).await;
}

#[tokio::test]
async fn test_public_path_list_is_configurable() {
    let app = setup_test_app_with(
        CorsConfig::default(),
        SecurityConfig::with_public_paths(["/api/auth/login"]),
    );

    let response = app.router.oneshot(get("/health")).await.unwrap();
    assert_uniform_unauthorized(response).await;
}

#[tokio::test]
async fn test_already_decided_request_is_not_decided_again() {
    let app = setup_test_app();

    let mut req = get("/api/lectures");
    req.extensions_mut()
        .insert(SecurityContext::authenticated(Subject::new("jdoe")));

    let response = app.router.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_rejection_never_reaches_handler() {
    let app = setup_test_app();
    app.seed_lectures().await;

    let response = app
        .router
        .clone()
        .oneshot(request("DELETE", "/api/lectures/1", Some("Bearer forged")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Still there.
    let token = app.token_for("jdoe");
    let response = app
        .router
        .oneshot(get_with_token("/api/lectures/1", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
