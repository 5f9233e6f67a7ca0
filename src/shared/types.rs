use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::{PAGE_SIZE, PAGE_WINDOW};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Page query parameter shared by the HTML table and the JSON listing.
/// Page size is fixed at [`PAGE_SIZE`].
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

/// Largest page whose OFFSET still fits in an `i64`
pub const MAX_PAGE: i64 = i64::MAX / PAGE_SIZE;

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl PageQuery {
    /// Page number clamped to `1..=MAX_PAGE`
    pub fn page(&self) -> i64 {
        self.page.clamp(1, MAX_PAGE)
    }

    /// Calculate SQL OFFSET from page number
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * PAGE_SIZE
    }

    pub fn limit(&self) -> i64 {
        PAGE_SIZE
    }
}

/// Number of pages needed for `total_items` rows
pub fn total_pages(total_items: i64) -> i64 {
    (total_items + PAGE_SIZE - 1) / PAGE_SIZE
}

/// Page links around `page`: `[page - 2, page + 2]` clamped to `[1, total_pages]`
pub fn page_window(page: i64, total_pages: i64) -> Vec<i64> {
    let start = page.saturating_sub(PAGE_WINDOW).max(1);
    let end = page.saturating_add(PAGE_WINDOW).min(total_pages);
    (start..=end).collect()
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}
