use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router, middleware};
use serde_json::json;
use tower::ServiceBuilder;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};

use crate::docs::{ApiDoc, openapi_json};
use crate::logging::logging_middleware;
use crate::metrics::{metrics_middleware, render_metrics};
use crate::middleware::cors::{cors_layer, reject_disallowed_origin};
use crate::middleware::filter::authorize;
use crate::modules::auth::router::init_auth_router;
use crate::modules::health::health;
use crate::modules::lectures::router::init_lectures_router;
use crate::state::AppState;

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

/// Builds the application.
///
/// Every request, including ones no route matches, passes through this
/// stack from top to bottom:
///
/// 1. request logging and HTTP metrics
/// 2. origin guard: 403 for an `Origin` outside the policy
/// 3. CORS headers; preflight requests are answered here
/// 4. authorization filter: 401 from the entry point, or on to the router
pub fn init_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_config);

    Router::new()
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/lectures", init_lectures_router()),
        )
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(logging_middleware))
                .layer(middleware::from_fn(metrics_middleware))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    reject_disallowed_origin,
                ))
                .layer(cors)
                .layer(middleware::from_fn_with_state(state.clone(), authorize)),
        )
        .with_state(state)
}
