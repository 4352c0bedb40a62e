//! Online participants endpoint.

use axum::extract::State;
use axum::Json;

use examtrack_entity::role::Role;

use crate::dto::response::{ApiResponse, OnlineParticipantsResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/realtime/online — ids of currently connected participants.
pub async fn online_participants(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<OnlineParticipantsResponse>>, ApiError> {
    auth.require_teacher()?;

    let students = state.registry.online_ids(Role::Student).await;
    let teachers = state.registry.online_ids(Role::Teacher).await;
    let total = state.registry.connection_count().await;

    Ok(Json(ApiResponse::ok(OnlineParticipantsResponse {
        students,
        teachers,
        total,
    })))
}
