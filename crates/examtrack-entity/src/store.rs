//! Store contracts consumed by the realtime coordinator and the notice
//! dispatcher.
//!
//! The concrete implementations live in `examtrack-database`; tests inject
//! in-memory implementations so the protocol state machine can be exercised
//! without a database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use examtrack_core::result::AppResult;

use crate::notice::{Notice, NoticeStatus};
use crate::timer::{ExamTimer, NewExamTimer};

/// Persistence contract for session timers.
///
/// All operations are atomic at the row level; the bulk flip is a single
/// UPDATE, which is sufficient because this subsystem is the only writer
/// of the active flag.
#[async_trait]
pub trait TimerStore: Send + Sync {
    /// Insert a new timer row (time_used = 0, active = true).
    ///
    /// Returns a conflict error when an active timer already exists for
    /// the same (exam, student) pair, preserving the at-most-one-active
    /// invariant.
    async fn create(&self, new: NewExamTimer) -> AppResult<ExamTimer>;

    /// The unique active timer for (exam, student), if any.
    async fn find_active(&self, exam_id: i64, student_id: i64) -> AppResult<Option<ExamTimer>>;

    /// All active timers for an exam.
    async fn find_all_active(&self, exam_id: i64) -> AppResult<Vec<ExamTimer>>;

    /// All timers for a student, any exam and any active state,
    /// newest first.
    async fn find_by_student(&self, student_id: i64) -> AppResult<Vec<ExamTimer>>;

    /// Full overwrite of an existing row.
    async fn save(&self, timer: &ExamTimer) -> AppResult<()>;

    /// Flip the active flag for every timer of an exam currently in the
    /// `from` state. Returns the number of rows affected.
    async fn bulk_set_active(&self, exam_id: i64, from: bool, to: bool) -> AppResult<u64>;
}

/// Persistence contract for notice delivery bookkeeping.
#[async_trait]
pub trait NoticeStore: Send + Sync {
    /// Pending scheduled notices whose due time has passed.
    async fn find_due_scheduled(&self, now: DateTime<Utc>) -> AppResult<Vec<Notice>>;

    /// Record the delivery outcome of a notice.
    async fn mark_delivery(
        &self,
        id: i64,
        status: NoticeStatus,
        sent_at: DateTime<Utc>,
    ) -> AppResult<()>;
}
