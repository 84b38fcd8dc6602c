//! # SNO DB
//!
//! PostgreSQL connection pool setup.
//!
//! ```ignore
//! let pool = sno_db::init_db_pool(&std::env::var("DATABASE_URL")?).await?;
//! ```

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub use sqlx::PgPool;

/// Opens a connection pool against `database_url`.
///
/// `DATABASE_MAX_CONNECTIONS` overrides the pool size (default 10).
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    tracing::info!(max_connections, "Database pool ready");
    Ok(pool)
}
