//! Request DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use examtrack_entity::notice::{NewNotice, SendMethod};
use examtrack_entity::question::SubmittedAnswer;

/// Body of `POST /api/exams/{id}/submit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitExamRequest {
    /// Ordered answers, one per question.
    pub answers: Vec<SubmittedAnswer>,
    /// Total time used in seconds.
    #[serde(default)]
    pub time_used: i32,
}

/// Body of `POST /api/notices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoticeRequest {
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
    /// Due time; required when scheduled.
    pub send_time: Option<DateTime<Utc>>,
}

impl CreateNoticeRequest {
    /// Converts to the persistence shape with the creator filled in.
    pub fn into_new_notice(self, created_by: i64) -> NewNotice {
        NewNotice {
            notice_type: self.notice_type,
            target_exam: self.target_exam,
            target_class: self.target_class,
            target_student: self.target_student,
            title: self.title,
            content: self.content,
            send_method: self.send_method,
            send_time: self.send_time,
            created_by,
        }
    }
}

/// Filter parameters for `GET /api/notices`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeListParams {
    /// Match on notice type.
    pub notice_type: Option<String>,
    /// Match on status name (pending, sent, failed, cancelled).
    pub status: Option<examtrack_entity::notice::NoticeStatus>,
    /// Substring match on title or content.
    pub keyword: Option<String>,
}
