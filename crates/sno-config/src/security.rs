//! Public path allow-list.
//!
//! Patterns are either exact paths (`/api/auth/login`) or prefixes written
//! with a trailing `/**` (`/scalar/**` matches `/scalar` and everything
//! below it). Anything not matched is protected, so the classification is
//! total.

use std::env;

use crate::parse_list;

const DEFAULT_PUBLIC_PATHS: &[&str] = &[
    "/api/auth/login",
    "/api/auth/register",
    "/scalar/**",
    "/api-docs/**",
    "/favicon.ico",
    "/health",
    "/metrics",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathPattern {
    Exact(String),
    Prefix(String),
}

impl PathPattern {
    pub fn parse(raw: &str) -> Self {
        match raw.strip_suffix("/**") {
            Some(prefix) => PathPattern::Prefix(prefix.trim_end_matches('/').to_string()),
            None => PathPattern::Exact(raw.to_string()),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Exact(exact) => path == exact,
            // An empty prefix comes from "/**" and matches every path.
            PathPattern::Prefix(prefix) if prefix.is_empty() => true,
            PathPattern::Prefix(prefix) => {
                path == prefix
                    || path
                        .strip_prefix(prefix.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecurityConfig {
    pub public_paths: Vec<PathPattern>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::with_public_paths(DEFAULT_PUBLIC_PATHS.iter().copied())
    }
}

impl SecurityConfig {
    pub fn from_env() -> Self {
        match env::var("PUBLIC_PATHS") {
            Ok(raw) => {
                let paths = parse_list(&raw);
                if paths.iter().any(|p| p == "/**") {
                    tracing::warn!("PUBLIC_PATHS contains /** - every route is public");
                }
                Self::with_public_paths(paths.iter().map(String::as_str))
            }
            Err(_) => Self::default(),
        }
    }

    pub fn with_public_paths<'a>(paths: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            public_paths: paths.into_iter().map(PathPattern::parse).collect(),
        }
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|p| p.matches(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_public_paths() {
        let config = SecurityConfig::default();
        assert!(config.is_public("/api/auth/login"));
        assert!(config.is_public("/api/auth/register"));
        assert!(config.is_public("/scalar"));
        assert!(config.is_public("/api-docs/openapi.json"));
        assert!(config.is_public("/health"));
    }

    #[test]
    fn test_everything_else_is_protected() {
        let config = SecurityConfig::default();
        assert!(!config.is_public("/api/lectures"));
        assert!(!config.is_public("/api/auth/me"));
        assert!(!config.is_public("/api/auth/login/extra"));
        assert!(!config.is_public("/"));
    }

    #[test]
    fn test_prefix_does_not_match_sibling() {
        let pattern = PathPattern::parse("/scalar/**");
        assert!(pattern.matches("/scalar/index.html"));
        assert!(!pattern.matches("/scalarx"));
    }

    #[test]
    fn test_catch_all_pattern() {
        let config = SecurityConfig::with_public_paths(["/**"]);
        assert!(config.is_public("/api/lectures/1"));
    }

    #[test]
    fn test_empty_allow_list_protects_everything() {
        let config = SecurityConfig::with_public_paths([]);
        assert!(!config.is_public("/api/auth/login"));
    }
}
