//! Notice repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use examtrack_core::error::{AppError, ErrorKind};
use examtrack_core::result::AppResult;
use examtrack_entity::notice::{NewNotice, Notice, NoticeStatus};
use examtrack_entity::store::NoticeStore;

/// Filters for the notice listing endpoint.
#[derive(Debug, Clone, Default)]
pub struct NoticeFilter {
    /// Match on notice type.
    pub notice_type: Option<String>,
    /// Match on status.
    pub status: Option<NoticeStatus>,
    /// Substring match on title or content.
    pub keyword: Option<String>,
}

/// Repository for notice rows.
#[derive(Debug, Clone)]
pub struct NoticeRepository {
    pool: PgPool,
}

impl NoticeRepository {
    /// Create a new notice repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new pending notice.
    pub async fn create(&self, new: NewNotice) -> AppResult<Notice> {
        sqlx::query_as::<_, Notice>(
            "INSERT INTO notices \
             (notice_type, target_exam, target_class, target_student, \
              title, content, send_method, send_time, status, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending', $9) \
             RETURNING *",
        )
        .bind(&new.notice_type)
        .bind(new.target_exam)
        .bind(new.target_class)
        .bind(new.target_student)
        .bind(&new.title)
        .bind(&new.content)
        .bind(new.send_method)
        .bind(new.send_time)
        .bind(new.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create notice", e))
    }

    /// Find a notice by id.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Notice>> {
        sqlx::query_as::<_, Notice>("SELECT * FROM notices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find notice", e))
    }

    /// List notices newest-first with optional filters and pagination.
    ///
    /// Returns the page of notices and the total count matching the filter.
    pub async fn list(
        &self,
        filter: &NoticeFilter,
        page: u32,
        page_size: u32,
    ) -> AppResult<(Vec<Notice>, i64)> {
        let keyword = filter.keyword.as_ref().map(|k| format!("%{k}%"));

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notices \
             WHERE ($1::text IS NULL OR notice_type = $1) \
               AND ($2::notice_status IS NULL OR status = $2) \
               AND ($3::text IS NULL OR title LIKE $3 OR content LIKE $3)",
        )
        .bind(&filter.notice_type)
        .bind(filter.status)
        .bind(&keyword)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count notices", e))?;

        let offset = (page.saturating_sub(1)) * page_size;
        let notices = sqlx::query_as::<_, Notice>(
            "SELECT * FROM notices \
             WHERE ($1::text IS NULL OR notice_type = $1) \
               AND ($2::notice_status IS NULL OR status = $2) \
               AND ($3::text IS NULL OR title LIKE $3 OR content LIKE $3) \
             ORDER BY created_at DESC LIMIT $4 OFFSET $5",
        )
        .bind(&filter.notice_type)
        .bind(filter.status)
        .bind(&keyword)
        .bind(page_size as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notices", e))?;

        Ok((notices, total))
    }

    /// Cancel a pending notice. Returns the updated row.
    pub async fn cancel(&self, id: i64) -> AppResult<Notice> {
        let notice = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Notice {id} not found")))?;

        if !notice.is_cancellable() {
            return Err(AppError::validation("Can only cancel pending notices"));
        }

        sqlx::query_as::<_, Notice>(
            "UPDATE notices SET status = 'cancelled', updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to cancel notice", e))?
        .ok_or_else(|| AppError::conflict("Notice was delivered before it could be cancelled"))
    }

    /// Delete a notice row.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete notice", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl NoticeStore for NoticeRepository {
    async fn find_due_scheduled(&self, now: DateTime<Utc>) -> AppResult<Vec<Notice>> {
        sqlx::query_as::<_, Notice>(
            "SELECT * FROM notices \
             WHERE status = 'pending' AND send_method = 'scheduled' AND send_time <= $1",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch due notices", e))
    }

    async fn mark_delivery(
        &self,
        id: i64,
        status: NoticeStatus,
        sent_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE notices SET status = $2, sent_at = $3, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .bind(sent_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update notice status", e)
        })?;
        Ok(())
    }
}
