//! Notice management endpoints (teacher only).

use axum::extract::{Path, Query, State};
use axum::Json;

use examtrack_database::repositories::notice::NoticeFilter;
use examtrack_entity::notice::Notice;

use crate::dto::request::{CreateNoticeRequest, NoticeListParams};
use crate::dto::response::{ApiResponse, MessageResponse, PaginatedResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/notices — create a notice.
///
/// Immediate notices are delivered before the response is sent; the
/// returned row carries the delivery status.
pub async fn create_notice(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateNoticeRequest>,
) -> Result<Json<ApiResponse<Notice>>, ApiError> {
    auth.require_teacher()?;

    let notice = state
        .notice_service
        .create(req.into_new_notice(auth.user_id()))
        .await?;

    Ok(Json(ApiResponse::ok(notice)))
}

/// GET /api/notices — list notices with filters and pagination.
pub async fn list_notices(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
    Query(params): Query<NoticeListParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<Notice>>>, ApiError> {
    auth.require_teacher()?;

    let filter = NoticeFilter {
        notice_type: params.notice_type,
        status: params.status,
        keyword: params.keyword,
    };
    let (page, per_page) = pagination.clamped();
    let (items, total) = state.notice_service.list(&filter, page, per_page).await?;

    Ok(Json(ApiResponse::ok(PaginatedResponse {
        items,
        total,
        page,
        per_page,
    })))
}

/// GET /api/notices/{id}
pub async fn get_notice(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Notice>>, ApiError> {
    auth.require_teacher()?;
    let notice = state.notice_service.get(id).await?;
    Ok(Json(ApiResponse::ok(notice)))
}

/// POST /api/notices/{id}/cancel — cancel a pending notice.
pub async fn cancel_notice(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Notice>>, ApiError> {
    auth.require_teacher()?;
    let notice = state.notice_service.cancel(id).await?;
    Ok(Json(ApiResponse::ok(notice)))
}

/// DELETE /api/notices/{id}
pub async fn delete_notice(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    auth.require_teacher()?;
    state.notice_service.delete(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Notice deleted".to_string(),
    })))
}
