//! Notice management service.
//!
//! Teachers create notices over HTTP; immediate notices are pushed through
//! the realtime dispatcher at creation time, scheduled ones are left
//! pending for the worker loop.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use examtrack_core::error::AppError;
use examtrack_core::result::AppResult;
use examtrack_database::repositories::notice::{NoticeFilter, NoticeRepository};
use examtrack_entity::notice::{NewNotice, Notice, SendMethod};
use examtrack_realtime::NoticeDispatcher;

/// Creates, lists, and cancels notices, and triggers immediate delivery.
pub struct NoticeService {
    notices: Arc<NoticeRepository>,
    dispatcher: Arc<NoticeDispatcher>,
}

impl std::fmt::Debug for NoticeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoticeService").finish()
    }
}

impl NoticeService {
    /// Creates a new notice service.
    pub fn new(notices: Arc<NoticeRepository>, dispatcher: Arc<NoticeDispatcher>) -> Self {
        Self {
            notices,
            dispatcher,
        }
    }

    /// Validates and persists a notice; immediate notices are delivered
    /// synchronously before the call returns.
    pub async fn create(&self, new: NewNotice) -> AppResult<Notice> {
        if let SendMethod::Scheduled = new.send_method {
            let send_time = new
                .send_time
                .ok_or_else(|| AppError::validation("Scheduled notices require a send time"))?;
            if send_time <= Utc::now() {
                return Err(AppError::validation("Send time must be in the future"));
            }
        }

        let notice = self.notices.create(new).await?;
        info!(notice_id = notice.id, method = ?notice.send_method, "notice created");

        if notice.send_method == SendMethod::Immediate {
            self.dispatcher.deliver_now(&notice).await?;
            // Re-read to pick up the delivery status the dispatcher wrote.
            return self
                .notices
                .find_by_id(notice.id)
                .await?
                .ok_or_else(|| AppError::internal("Notice vanished after delivery"));
        }

        Ok(notice)
    }

    /// One page of notices, newest first, with the total match count.
    pub async fn list(
        &self,
        filter: &NoticeFilter,
        page: u32,
        page_size: u32,
    ) -> AppResult<(Vec<Notice>, i64)> {
        self.notices.list(filter, page, page_size).await
    }

    /// A single notice by id.
    pub async fn get(&self, id: i64) -> AppResult<Notice> {
        self.notices
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Notice {id} not found")))
    }

    /// Cancels a pending notice.
    pub async fn cancel(&self, id: i64) -> AppResult<Notice> {
        let notice = self.notices.cancel(id).await?;
        info!(notice_id = id, "notice cancelled");
        Ok(notice)
    }

    /// Deletes a notice outright.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.notices.delete(id).await? {
            return Err(AppError::not_found(format!("Notice {id} not found")));
        }
        info!(notice_id = id, "notice deleted");
        Ok(())
    }
}
