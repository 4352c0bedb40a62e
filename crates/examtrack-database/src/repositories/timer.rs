//! Session timer repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use examtrack_core::error::{AppError, ErrorKind};
use examtrack_core::result::AppResult;
use examtrack_entity::store::TimerStore;
use examtrack_entity::timer::{ExamTimer, NewExamTimer};

/// Repository for session timer rows.
#[derive(Debug, Clone)]
pub struct TimerRepository {
    pool: PgPool,
}

impl TimerRepository {
    /// Create a new timer repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimerStore for TimerRepository {
    async fn create(&self, new: NewExamTimer) -> AppResult<ExamTimer> {
        // The WHERE NOT EXISTS guard keeps the at-most-one-active
        // invariant for starts. A unique index cannot enforce it because
        // a bulk resume may legally reactivate several rows at once.
        let timer = sqlx::query_as::<_, ExamTimer>(
            "INSERT INTO exam_timers (exam_id, student_id, start_time, time_used, is_active) \
             SELECT $1, $2, $3, 0, TRUE \
             WHERE NOT EXISTS ( \
                 SELECT 1 FROM exam_timers \
                 WHERE exam_id = $1 AND student_id = $2 AND is_active \
             ) \
             RETURNING *",
        )
        .bind(new.exam_id)
        .bind(new.student_id)
        .bind(new.start_time)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create timer", e))?;

        timer.ok_or_else(|| {
            AppError::conflict(format!(
                "Student {} already has an active timer for exam {}",
                new.student_id, new.exam_id
            ))
        })
    }

    async fn find_active(&self, exam_id: i64, student_id: i64) -> AppResult<Option<ExamTimer>> {
        sqlx::query_as::<_, ExamTimer>(
            "SELECT * FROM exam_timers \
             WHERE exam_id = $1 AND student_id = $2 AND is_active",
        )
        .bind(exam_id)
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find active timer", e))
    }

    async fn find_all_active(&self, exam_id: i64) -> AppResult<Vec<ExamTimer>> {
        sqlx::query_as::<_, ExamTimer>(
            "SELECT * FROM exam_timers WHERE exam_id = $1 AND is_active",
        )
        .bind(exam_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list active timers", e))
    }

    async fn find_by_student(&self, student_id: i64) -> AppResult<Vec<ExamTimer>> {
        sqlx::query_as::<_, ExamTimer>(
            "SELECT * FROM exam_timers WHERE student_id = $1 ORDER BY start_time DESC",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list student timers", e)
        })
    }

    async fn save(&self, timer: &ExamTimer) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE exam_timers \
             SET time_used = $2, is_active = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(timer.id)
        .bind(timer.time_used)
        .bind(timer.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save timer", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Timer {} not found", timer.id)));
        }
        Ok(())
    }

    async fn bulk_set_active(&self, exam_id: i64, from: bool, to: bool) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE exam_timers \
             SET is_active = $3, updated_at = NOW() \
             WHERE exam_id = $1 AND is_active = $2",
        )
        .bind(exam_id)
        .bind(from)
        .bind(to)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to bulk flip timers", e)
        })?;

        Ok(result.rows_affected())
    }
}
