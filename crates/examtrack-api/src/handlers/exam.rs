//! Exam endpoints: live status and submission.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;

use examtrack_entity::store::TimerStore;
use examtrack_entity::timer::ExamTimer;
use examtrack_service::SubmissionOutcome;

use crate::dto::request::SubmitExamRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/exams/{id}/live-status — active timers with live elapsed time.
pub async fn live_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(exam_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<ExamTimer>>>, ApiError> {
    auth.require_teacher()?;

    let now = Utc::now().timestamp();
    let timers: Vec<ExamTimer> = state
        .timer_repo
        .find_all_active(exam_id)
        .await?
        .into_iter()
        .map(|t| t.with_live_time_used(now))
        .collect();

    Ok(Json(ApiResponse::ok(timers)))
}

/// POST /api/exams/{id}/submit — grade and record a student's answers.
pub async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(exam_id): Path<i64>,
    Json(req): Json<SubmitExamRequest>,
) -> Result<Json<ApiResponse<SubmissionOutcome>>, ApiError> {
    auth.require_student()?;

    let outcome = state
        .submission_service
        .submit(exam_id, auth.user_id(), &req.answers, req.time_used)
        .await?;

    Ok(Json(ApiResponse::ok(outcome)))
}
