//! Pagination-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};

use crate::models::{DEFAULT_PAGE, DEFAULT_PER_PAGE, Page, PageRequest};

/// Raw `page` / `perPage` query parameters.
///
/// Kept as strings so that unparseable values fall back instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<String>,
    #[serde(rename = "perPage")]
    pub per_page: Option<String>,
}

impl PaginationParams {
    /// Resolve the parameters to a normalized `PageRequest`.
    ///
    /// An unparseable page counts as 0 and is clamped to 1; an unparseable
    /// or non-positive `perPage` becomes the default.
    pub fn page_request(&self) -> PageRequest {
        let page = match self.page.as_deref() {
            Some(raw) => raw.trim().parse::<i64>().unwrap_or(0),
            None => DEFAULT_PAGE,
        };
        let per_page = self
            .per_page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_PER_PAGE);

        PageRequest::new(page, per_page)
    }
}

/// The `data` payload of a list response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub per_page: i64,
    pub current_page: i64,
    pub total_pages: i64,
}

impl<T> From<Page<T>> for PagedResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            items: page.items,
            total: page.total,
            per_page: page.per_page,
            current_page: page.current_page,
            total_pages: page.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<&str>, per_page: Option<&str>) -> PaginationParams {
        PaginationParams {
            page: page.map(String::from),
            per_page: per_page.map(String::from),
        }
    }

    #[test]
    fn test_missing_params_use_defaults() {
        let request = PaginationParams::default().page_request();
        assert_eq!(request.page(), 1);
        assert_eq!(request.per_page(), 10);
    }

    #[test]
    fn test_unparseable_page_becomes_first_page() {
        assert_eq!(params(Some("abc"), None).page_request().page(), 1);
        assert_eq!(params(Some("-4"), None).page_request().page(), 1);
        assert_eq!(params(Some(" 3 "), None).page_request().page(), 3);
    }

    #[test]
    fn test_bad_per_page_uses_default() {
        assert_eq!(params(None, Some("zero")).page_request().per_page(), 10);
        assert_eq!(params(None, Some("0")).page_request().per_page(), 10);
        assert_eq!(params(None, Some("-5")).page_request().per_page(), 10);
        assert_eq!(params(None, Some("250")).page_request().per_page(), 250);
    }

    #[test]
    fn test_paged_response_is_camel_case() {
        let page = Page::new(vec!["a"], 3, PageRequest::new(2, 1));
        let body = serde_json::to_value(PagedResponse::from(page)).unwrap();
        assert_eq!(body["perPage"], 1);
        assert_eq!(body["currentPage"], 2);
        assert_eq!(body["totalPages"], 3);
        assert_eq!(body["total"], 3);
    }
}
