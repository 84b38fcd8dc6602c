use std::env;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: String,
    /// Log verbosity for this service when `RUST_LOG` is not set.
    pub log_level: String,
    /// Emit JSON log lines instead of the compact console format.
    pub log_json: bool,
    /// Directory for daily rolling log files; console only when unset.
    pub log_dir: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_json: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            log_dir: env::var("LOG_DIR").ok().filter(|v| !v.trim().is_empty()),
        }
    }
}
