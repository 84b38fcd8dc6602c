#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::Value;

use sno_api::repository::{InMemoryCredentialStore, InMemoryLectureRepository};
use sno_api::router::init_router;
use sno_api::state::AppState;
use sno_auth::{Subject, TokenService};
use sno_config::{CorsConfig, JwtConfig, SecurityConfig};
use sno_models::{Lecture, LectureId, UserId};

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes";
pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        access_token_expiry: 3600,
    }
}

pub struct TestApp {
    pub router: Router,
    pub lectures: Arc<InMemoryLectureRepository>,
    pub tokens: TokenService,
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(CorsConfig::default(), SecurityConfig::default())
}

pub fn setup_test_app_with(cors: CorsConfig, security: SecurityConfig) -> TestApp {
    let lectures = Arc::new(InMemoryLectureRepository::new());
    let state = AppState::new(
        lectures.clone(),
        Arc::new(InMemoryCredentialStore::new()),
        &test_jwt_config(),
        cors,
        security,
    );

    TestApp {
        router: init_router(state.clone()),
        lectures,
        tokens: state.tokens,
    }
}

impl TestApp {
    pub fn token_for(&self, login: &str) -> String {
        self.tokens
            .issue(&Subject::new(login))
            .unwrap()
            .access_token
    }

    pub fn expired_token_for(&self, login: &str) -> String {
        let long_ago = Utc::now().timestamp() - 7200;
        self.tokens
            .issue_at(&Subject::new(login), long_ago)
            .unwrap()
            .access_token
    }

    pub async fn seed_lectures(&self) {
        for lecture in reference_lectures() {
            self.lectures.seed(lecture).await;
        }
    }
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

pub fn lecture(
    id: i64,
    title: &str,
    lecturer: Option<i64>,
    date: Option<DateTime<Utc>>,
) -> Lecture {
    Lecture {
        id: LectureId(id),
        course_id: None,
        lecturer_id: lecturer.map(UserId),
        title: title.to_string(),
        description: format!("About {}", title),
        date,
        summary_id: None,
        forum_id: None,
        file_id: None,
    }
}

/// Reference dataset for listing tests.
pub fn reference_lectures() -> Vec<Lecture> {
    vec![
        lecture(1, "Intro to Rust", Some(10), Some(at(2024, 1, 10, 9))),
        lecture(2, "Advanced Rust", Some(11), Some(at(2024, 2, 1, 0))),
        lecture(3, "Intro to Databases", Some(11), Some(at(2024, 2, 29, 23))),
        lecture(4, "Networks", Some(10), None),
        lecture(5, "Compilers", None, Some(at(2024, 3, 1, 12))),
    ]
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn titles(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|l| l["title"].as_str().unwrap().to_string())
        .collect()
}
