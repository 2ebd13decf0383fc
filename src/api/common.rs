//! Common API utilities and shared types

use axum::extract::{rejection::QueryRejection, Query};
use serde::Deserialize;

use crate::api::middleware::ApiError;
use crate::models::{PageRequest, DEFAULT_CURRENT_PAGE, DEFAULT_PAGE_SIZE};

fn default_current_page() -> i64 {
    DEFAULT_CURRENT_PAGE
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Raw pagination query parameters, validated by [`PaginationQuery::validate`]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationQuery {
    #[serde(default = "default_current_page")]
    pub current_page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            current_page: DEFAULT_CURRENT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationQuery {
    /// Validate for `operation`; violations name the operation and field,
    /// e.g. `getEventsPage.pageSize: Page size must be greater than zero`
    pub fn validate(&self, operation: &str) -> Result<PageRequest, ApiError> {
        PageRequest::new(self.current_page, self.page_size).map_err(|e| {
            ApiError::not_acceptable(format!("{}.{}: {}", operation, e.field(), e))
        })
    }
}

/// Extract and validate pagination parameters of a handler
pub fn page_request(
    query: Result<Query<PaginationQuery>, QueryRejection>,
    operation: &str,
) -> Result<PageRequest, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    query.validate(operation)
}
