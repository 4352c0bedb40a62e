//! Pagination query parameters.

use serde::{Deserialize, Serialize};

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based, default 1).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page (default 25, max 100).
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    25
}

impl PaginationParams {
    /// Clamped (page, page_size) pair.
    pub fn clamped(&self) -> (u32, u32) {
        (self.page.max(1), self.per_page.clamp(1, 100))
    }
}
