//! Timer history endpoint.

use axum::extract::{Path, State};
use axum::Json;

use examtrack_core::error::AppError;
use examtrack_entity::role::Role;
use examtrack_entity::store::TimerStore;
use examtrack_entity::timer::ExamTimer;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/students/{id}/timer-history — all attempts, newest first.
///
/// Teachers may query any student; a student may only query themself.
pub async fn timer_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(student_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<ExamTimer>>>, ApiError> {
    if auth.role()? == Role::Student && auth.user_id() != student_id {
        return Err(AppError::authorization("Cannot view another student's timers").into());
    }

    let timers = state.timer_repo.find_by_student(student_id).await?;
    Ok(Json(ApiResponse::ok(timers)))
}
