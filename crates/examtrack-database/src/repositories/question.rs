//! Question repository implementation (read-only).

use sqlx::PgPool;

use examtrack_core::error::{AppError, ErrorKind};
use examtrack_core::result::AppResult;
use examtrack_entity::question::Question;

/// Read-only access to question definitions.
///
/// Question authoring belongs to the exam-management side; this subsystem
/// only loads definitions to score submissions against.
#[derive(Debug, Clone)]
pub struct QuestionRepository {
    pool: PgPool,
}

impl QuestionRepository {
    /// Create a new question repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All questions of an exam.
    pub async fn find_by_exam(&self, exam_id: i64) -> AppResult<Vec<Question>> {
        sqlx::query_as::<_, Question>("SELECT * FROM questions WHERE exam_id = $1")
            .bind(exam_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to fetch questions", e)
            })
    }
}
