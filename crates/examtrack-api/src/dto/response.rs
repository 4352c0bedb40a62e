//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T: Serialize> {
    /// Items in this page.
    pub items: Vec<T>,
    /// Total item count matching the filter.
    pub total: i64,
    /// Current page (1-based).
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Database status.
    pub database: String,
    /// Crate version.
    pub version: String,
}

/// Currently connected participants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineParticipantsResponse {
    /// Connected student ids.
    pub students: Vec<i64>,
    /// Connected teacher ids.
    pub teachers: Vec<i64>,
    /// Total connection count.
    pub total: usize,
}
