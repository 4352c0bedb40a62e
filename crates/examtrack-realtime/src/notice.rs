//! Notice delivery over the live channel.
//!
//! One delivery primitive shared by both paths: immediate notices go
//! through [`NoticeDispatcher::deliver_now`] at creation time, scheduled
//! notices are picked up by the worker loop calling
//! [`NoticeDispatcher::dispatch_due`] on its interval. Delivery is
//! fire-and-forget, at most once; a disconnected recipient misses the
//! notice.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use examtrack_core::result::AppResult;
use examtrack_entity::notice::{Notice, NoticeStatus};
use examtrack_entity::role::Role;
use examtrack_entity::store::NoticeStore;

use crate::message::ServerMessage;
use crate::registry::ConnectionRegistry;

/// Pushes notices to connected students and records the outcome.
pub struct NoticeDispatcher {
    registry: Arc<ConnectionRegistry>,
    notices: Arc<dyn NoticeStore>,
}

impl std::fmt::Debug for NoticeDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoticeDispatcher").finish()
    }
}

impl NoticeDispatcher {
    /// Creates a dispatcher over the shared registry and notice store.
    pub fn new(registry: Arc<ConnectionRegistry>, notices: Arc<dyn NoticeStore>) -> Self {
        Self { registry, notices }
    }

    /// Delivers all due scheduled notices. Returns how many were handled.
    ///
    /// Each notice is marked `sent` or `failed` individually; one failed
    /// delivery never blocks the rest of the batch.
    pub async fn dispatch_due(&self) -> AppResult<usize> {
        let due = self.notices.find_due_scheduled(Utc::now()).await?;
        let count = due.len();

        for notice in due {
            let status = self.deliver(&notice).await;
            self.notices
                .mark_delivery(notice.id, status, Utc::now())
                .await?;
        }

        Ok(count)
    }

    /// Delivers one notice synchronously and records the outcome.
    pub async fn deliver_now(&self, notice: &Notice) -> AppResult<NoticeStatus> {
        let status = self.deliver(notice).await;
        self.notices
            .mark_delivery(notice.id, status, Utc::now())
            .await?;
        Ok(status)
    }

    /// Pushes a notice through the registry, best-effort.
    ///
    /// A student target must be connected for the delivery to count as
    /// sent. Exam-targeted and untargeted notices fan out to every
    /// connected student; fan-out always counts as sent since individual
    /// recipients are best-effort by design.
    async fn deliver(&self, notice: &Notice) -> NoticeStatus {
        let frame = ServerMessage::Notice {
            id: notice.id,
            notice_type: notice.notice_type.clone(),
            title: notice.title.clone(),
            content: notice.content.clone(),
            timestamp: Utc::now().timestamp(),
        }
        .frame();

        match notice.target_student {
            Some(student_id) => {
                let key = Role::Student.connection_key(student_id);
                match self.registry.send_to(&key, frame).await {
                    Ok(()) => {
                        info!(notice_id = notice.id, %key, "notice delivered");
                        NoticeStatus::Sent
                    }
                    Err(err) => {
                        warn!(notice_id = notice.id, %key, error = %err, "notice delivery failed");
                        NoticeStatus::Failed
                    }
                }
            }
            None => {
                let sent = self.registry.broadcast_to_role(Role::Student, &frame).await;
                info!(notice_id = notice.id, sent, "notice broadcast to students");
                NoticeStatus::Sent
            }
        }
    }
}
