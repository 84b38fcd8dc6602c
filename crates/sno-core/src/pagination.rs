//! Page-based pagination for list endpoints.
//!
//! Pages are zero-indexed: `?page=0&size=20` returns the first twenty rows.
//! `size` is clamped to `[1, 100]` and defaults to 20; a negative `page` is
//! treated as 0. Empty query values (`?page=`) count as absent.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Query parameters for page-based pagination.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Zero-based page index (default: 0)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Page size (1-100, default: 20)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub size: Option<i64>,
}

impl PaginationParams {
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(0).max(0)
    }

    #[must_use]
    pub fn size(&self) -> i64 {
        self.size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    /// Number of rows to skip before the requested page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        self.page().saturating_mul(self.size())
    }

    /// Builds the response metadata for a page of this request given the
    /// total row count.
    #[must_use]
    pub fn meta(&self, total: i64) -> PaginationMeta {
        PaginationMeta {
            total,
            page: self.page(),
            size: self.size(),
            has_more: self.offset().saturating_add(self.size()) < total,
        }
    }
}

/// Metadata returned alongside a page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of rows across all pages
    pub total: i64,
    /// Zero-based index of this page
    pub page: i64,
    /// Page size that was applied
    pub size: i64,
    /// Whether another page follows this one
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.page(), 0);
        assert_eq!(params.size(), DEFAULT_PAGE_SIZE);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_offset_from_page() {
        let params = PaginationParams {
            page: Some(3),
            size: Some(10),
        };
        assert_eq!(params.offset(), 30);
    }

    #[test]
    fn test_size_is_clamped() {
        let too_big = PaginationParams {
            page: None,
            size: Some(1000),
        };
        assert_eq!(too_big.size(), MAX_PAGE_SIZE);

        let zero = PaginationParams {
            page: None,
            size: Some(0),
        };
        assert_eq!(zero.size(), 1);
    }

    #[test]
    fn test_negative_page_is_first_page() {
        let params = PaginationParams {
            page: Some(-4),
            size: Some(5),
        };
        assert_eq!(params.page(), 0);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_meta_has_more() {
        let params = PaginationParams {
            page: Some(0),
            size: Some(10),
        };
        assert!(params.meta(11).has_more);
        assert!(!params.meta(10).has_more);
    }

    #[test]
    fn test_meta_on_last_possible_page() {
        let params = PaginationParams {
            page: Some(i64::MAX),
            size: Some(20),
        };
        assert_eq!(params.offset(), i64::MAX);
        let meta = params.meta(5);
        assert!(!meta.has_more);
        assert_eq!(meta.page, i64::MAX);
    }

    #[test]
    fn test_empty_query_values_are_absent() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"page": "", "size": " 15 "}"#).unwrap();
        assert_eq!(params.page, None);
        assert_eq!(params.size(), 15);
    }
}
