use std::env;

const DEV_SECRET: &str = "sno-dev-secret-change-in-production";
/// Longest accepted access token lifetime: one year.
const MAX_ACCESS_EXPIRY: i64 = 365 * 24 * 3600;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using the development secret");
            DEV_SECRET.to_string()
        });

        Self {
            secret,
            access_token_expiry: parse_expiry(env::var("JWT_ACCESS_EXPIRY").ok().as_deref()),
        }
    }
}

/// Unparsable, non-positive and over-long values fall back to one hour.
fn parse_expiry(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse().ok())
        .filter(|v: &i64| *v > 0 && *v <= MAX_ACCESS_EXPIRY)
        .unwrap_or(3600)
}
