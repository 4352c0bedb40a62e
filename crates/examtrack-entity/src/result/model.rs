//! Exam result entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A scored submission.
///
/// The submitted answers are kept verbatim as an opaque JSON blob next to
/// the computed score, for later review.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExamResult {
    /// Unique result identifier.
    pub id: i64,
    /// Exam that was submitted.
    pub exam_id: i64,
    /// Student who submitted.
    pub student_id: i64,
    /// Total score awarded by the scoring engine.
    pub score: i32,
    /// Submitted answers, serialized verbatim.
    pub answers: String,
    /// Total time used in seconds, as reported by the client.
    pub time_used: i32,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
}

/// Data required to persist a new result row.
#[derive(Debug, Clone)]
pub struct NewExamResult {
    /// Exam that was submitted.
    pub exam_id: i64,
    /// Student who submitted.
    pub student_id: i64,
    /// Total score awarded.
    pub score: i32,
    /// Submitted answers, serialized verbatim.
    pub answers: String,
    /// Total time used in seconds.
    pub time_used: i32,
}
