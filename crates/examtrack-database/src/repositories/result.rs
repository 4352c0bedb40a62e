//! Exam result repository implementation.

use sqlx::PgPool;

use examtrack_core::error::{AppError, ErrorKind};
use examtrack_core::result::AppResult;
use examtrack_entity::result::{ExamResult, NewExamResult};

/// Repository for scored submission rows.
#[derive(Debug, Clone)]
pub struct ResultRepository {
    pool: PgPool,
}

impl ResultRepository {
    /// Create a new result repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a scored submission.
    pub async fn create(&self, new: NewExamResult) -> AppResult<ExamResult> {
        sqlx::query_as::<_, ExamResult>(
            "INSERT INTO exam_results (exam_id, student_id, score, answers, time_used) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(new.exam_id)
        .bind(new.student_id)
        .bind(new.score)
        .bind(&new.answers)
        .bind(new.time_used)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create result", e))
    }
}
