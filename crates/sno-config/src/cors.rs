//! Cross-origin policy table.
//!
//! Mirrors a single global registration: one set of origins, methods and
//! headers applies to every path. `*` in the origin or header list means
//! "any"; with credentials enabled the server echoes the request's value
//! instead of sending a literal `*`.

use std::env;

use crate::parse_list;

pub const WILDCARD: &str = "*";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub allow_credentials: bool,
    /// Preflight cache lifetime in seconds.
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
            allowed_methods: ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            allowed_headers: vec![WILDCARD.to_string()],
            allow_credentials: true,
            max_age_secs: 3600,
        }
    }
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let list_or = |key: &str, fallback: Vec<String>| {
            env::var(key)
                .ok()
                .map(|v| parse_list(&v))
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
        };

        Self {
            allowed_origins: list_or("ALLOWED_ORIGINS", defaults.allowed_origins),
            allowed_methods: list_or("CORS_ALLOWED_METHODS", defaults.allowed_methods)
                .into_iter()
                .map(|m| m.to_ascii_uppercase())
                .collect(),
            allowed_headers: list_or("CORS_ALLOWED_HEADERS", defaults.allowed_headers),
            allow_credentials: env::var("CORS_ALLOW_CREDENTIALS")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(defaults.allow_credentials),
            max_age_secs: env::var("CORS_MAX_AGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_age_secs),
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == WILDCARD)
    }

    pub fn allows_any_header(&self) -> bool {
        self.allowed_headers.iter().any(|h| h == WILDCARD)
    }

    /// Exact, case-sensitive origin match (scheme, host and port).
    pub fn allows_origin(&self, origin: &str) -> bool {
        self.allows_any_origin() || self.allowed_origins.iter().any(|o| o == origin)
    }
}
