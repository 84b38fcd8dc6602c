//! # SNO Config
//!
//! Process-wide configuration, loaded once from the environment at startup
//! and then shared read-only:
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`cors`]: cross-origin policy table
//! - [`security`]: public path allow-list used by the authorization filter
//! - [`server`]: listen address and log output settings
//!
//! Every `from_env` falls back to development defaults when a variable is
//! missing or unparseable.
//!
//! ```ignore
//! use sno_config::{CorsConfig, JwtConfig, SecurityConfig};
//!
//! let jwt = JwtConfig::from_env();
//! let cors = CorsConfig::from_env();
//! let security = SecurityConfig::from_env();
//! assert!(security.is_public("/api/auth/login"));
//! ```

pub mod cors;
pub mod jwt;
pub mod security;
pub mod server;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use security::SecurityConfig;
pub use server::ServerConfig;

/// Splits a comma-separated value into trimmed, non-empty entries.
pub(crate) fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
