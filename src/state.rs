use std::fmt;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;

use crate::repository::{
    CredentialStore, LectureRepository, PgCredentialStore, PgLectureRepository,
};
use sno_auth::TokenService;
use sno_config::{CorsConfig, JwtConfig, SecurityConfig};

/// Shared, read-only after startup. Cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub lectures: Arc<dyn LectureRepository>,
    pub users: Arc<dyn CredentialStore>,
    pub tokens: TokenService,
    pub cors_config: Arc<CorsConfig>,
    pub security_config: Arc<SecurityConfig>,
    pub metrics: Option<PrometheusHandle>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("cors_config", &self.cors_config)
            .field("security_config", &self.security_config)
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        lectures: Arc<dyn LectureRepository>,
        users: Arc<dyn CredentialStore>,
        jwt_config: &JwtConfig,
        cors_config: CorsConfig,
        security_config: SecurityConfig,
    ) -> Self {
        Self {
            lectures,
            users,
            tokens: TokenService::new(jwt_config),
            cors_config: Arc::new(cors_config),
            security_config: Arc::new(security_config),
            metrics: None,
        }
    }

    #[must_use]
    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}

/// Production state: Postgres repositories and configuration from the
/// environment.
pub fn init_app_state(db: PgPool) -> AppState {
    AppState::new(
        Arc::new(PgLectureRepository::new(db.clone())),
        Arc::new(PgCredentialStore::new(db)),
        &JwtConfig::from_env(),
        CorsConfig::from_env(),
        SecurityConfig::from_env(),
    )
}
