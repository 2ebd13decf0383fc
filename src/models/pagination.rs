//! Pagination of in-memory listings

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use thiserror::Error;

/// Default page number (1-indexed)
pub const DEFAULT_CURRENT_PAGE: i64 = 1;

/// Default page size
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Constraint violated by a pagination parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    #[error("Current page must be greater than zero")]
    CurrentPage,
    #[error("Current page must not exceed {}", u32::MAX)]
    CurrentPageTooLarge,
    #[error("Page size must be greater than zero")]
    PageSize,
    #[error("Page size must not exceed {}", u32::MAX)]
    PageSizeTooLarge,
}

impl PageRequestError {
    /// Query parameter the constraint applies to
    pub fn field(&self) -> &'static str {
        match self {
            Self::CurrentPage | Self::CurrentPageTooLarge => "currentPage",
            Self::PageSize | Self::PageSizeTooLarge => "pageSize",
        }
    }
}

/// Validated one-based page number and positive page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    current_page: NonZeroU32,
    page_size: NonZeroU32,
}

impl PageRequest {
    /// Validate raw request values; `pageSize` is checked first.
    pub fn new(current_page: i64, page_size: i64) -> Result<Self, PageRequestError> {
        let page_size = to_non_zero(
            page_size,
            PageRequestError::PageSize,
            PageRequestError::PageSizeTooLarge,
        )?;
        let current_page = to_non_zero(
            current_page,
            PageRequestError::CurrentPage,
            PageRequestError::CurrentPageTooLarge,
        )?;

        Ok(Self {
            current_page,
            page_size,
        })
    }

    pub fn current_page(&self) -> u32 {
        self.current_page.get()
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.get()
    }

    /// Index of the first item on the requested page
    pub fn offset(&self) -> u64 {
        u64::from(self.current_page() - 1) * u64::from(self.page_size())
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            current_page: NonZeroU32::MIN,
            page_size: NonZeroU32::new(DEFAULT_PAGE_SIZE as u32).unwrap_or(NonZeroU32::MIN),
        }
    }
}

fn to_non_zero(
    value: i64,
    not_positive: PageRequestError,
    too_large: PageRequestError,
) -> Result<NonZeroU32, PageRequestError> {
    if value <= 0 {
        return Err(not_positive);
    }
    u32::try_from(value)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or(too_large)
}

/// Pagination metadata returned next to a page of items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_items: u64,
    pub total_pages: u64,
    pub current_page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData<T> {
    pub items: Vec<T>,
}

/// Slice an ordered collection. Pages past the end are empty, not errors.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> (PageData<T>, Pagination) {
    let total_items = items.len() as u64;
    let page_size = u64::from(request.page_size());

    let metadata = Pagination {
        total_items,
        total_pages: total_items.div_ceil(page_size),
        current_page: request.current_page(),
        page_size: request.page_size(),
    };

    let items = if request.offset() >= total_items {
        Vec::new()
    } else {
        items
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.page_size() as usize)
            .collect()
    };

    (PageData { items }, metadata)
}
