//! Notice entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Delivery mode for a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "send_method", rename_all = "lowercase")]
pub enum SendMethod {
    /// Delivered synchronously at creation time.
    Immediate,
    /// Delivered by the dispatcher once `send_time` is due.
    Scheduled,
}

/// Lifecycle status of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "notice_status", rename_all = "lowercase")]
pub enum NoticeStatus {
    /// Awaiting delivery.
    Pending,
    /// Delivered to at least the intended target.
    Sent,
    /// Delivery attempted but the target was unreachable. Not retried.
    Failed,
    /// Cancelled before delivery.
    Cancelled,
}

/// A message targeted at one student, one exam's students, or all students.
///
/// Delivery is fire-and-forget: a disconnected recipient simply misses the
/// notice, there is no queued redelivery.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    /// Unique notice identifier.
    pub id: i64,
    /// Free-form category label (announcement, reminder, ...).
    pub notice_type: String,
    /// Target exam id; delivery fans out to student connections.
    pub target_exam: Option<i64>,
    /// Target class id (recorded for reporting; not a delivery scope).
    pub target_class: Option<i64>,
    /// Target student id; delivery goes to that one connection.
    pub target_student: Option<i64>,
    /// Short title shown to recipients.
    pub title: String,
    /// Message body.
    pub content: String,
    /// Immediate or scheduled delivery.
    pub send_method: SendMethod,
    /// Due time for scheduled notices.
    pub send_time: Option<DateTime<Utc>>,
    /// Current lifecycle status.
    pub status: NoticeStatus,
    /// Teacher who created the notice.
    pub created_by: i64,
    /// When delivery actually happened.
    pub sent_at: Option<DateTime<Utc>>,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Notice {
    /// Whether the notice can still be cancelled.
    pub fn is_cancellable(&self) -> bool {
        self.status == NoticeStatus::Pending
    }
}

/// Data required to create a new notice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotice {
    /// Free-form category label.
    pub notice_type: String,
    /// Target exam id, if exam-scoped.
    pub target_exam: Option<i64>,
    /// Target class id, if class-scoped.
    pub target_class: Option<i64>,
    /// Target student id, if student-scoped.
    pub target_student: Option<i64>,
    /// Short title.
    pub title: String,
    /// Message body.
    pub content: String,
    /// Immediate or scheduled delivery.
    pub send_method: SendMethod,
    /// Due time; required when `send_method` is scheduled.
    pub send_time: Option<DateTime<Utc>>,
    /// Teacher who created the notice.
    pub created_by: i64,
}
