//! Session timer entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One student's attempt clock for one exam.
///
/// Created when the student sends `start`, mutated by `update` events and
/// teacher pause/resume, finalized on `end`. Rows are never deleted; the
/// table doubles as the attempt history queryable per exam or per student.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExamTimer {
    /// Unique timer identifier.
    pub id: i64,
    /// Exam being taken.
    pub exam_id: i64,
    /// Student taking the exam.
    pub student_id: i64,
    /// Attempt start as epoch seconds.
    pub start_time: i64,
    /// Accumulated time used in seconds, as last reported by the client.
    pub time_used: i32,
    /// Whether the attempt clock is currently running.
    pub is_active: bool,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ExamTimer {
    /// Elapsed seconds recomputed from the start timestamp.
    ///
    /// The stored `time_used` of an active timer is only as fresh as the
    /// client's last `update`, so live views must derive elapsed time from
    /// `start_time` instead.
    pub fn elapsed_since_start(&self, now_epoch: i64) -> i32 {
        (now_epoch - self.start_time).max(0) as i32
    }

    /// Replace the stored `time_used` with the live elapsed value.
    pub fn with_live_time_used(mut self, now_epoch: i64) -> Self {
        self.time_used = self.elapsed_since_start(now_epoch);
        self
    }
}

/// Data required to create a new timer row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExamTimer {
    /// Exam being taken.
    pub exam_id: i64,
    /// Student taking the exam.
    pub student_id: i64,
    /// Attempt start as epoch seconds.
    pub start_time: i64,
}
