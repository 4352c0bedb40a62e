//! In-memory store implementations for exercising the protocol without a
//! database.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use examtrack_core::error::AppError;
use examtrack_core::result::AppResult;
use examtrack_entity::notice::{Notice, NoticeStatus};
use examtrack_entity::store::{NoticeStore, TimerStore};
use examtrack_entity::timer::{ExamTimer, NewExamTimer};

/// TimerStore backed by a `Vec` behind a mutex.
#[derive(Debug, Default)]
pub struct InMemoryTimerStore {
    rows: Mutex<Vec<ExamTimer>>,
    next_id: Mutex<i64>,
}

impl InMemoryTimerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a row directly, bypassing the create-time conflict guard.
    pub fn seed(&self, timer: ExamTimer) {
        self.rows.lock().unwrap().push(timer);
    }

    pub fn snapshot(&self) -> Vec<ExamTimer> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl TimerStore for InMemoryTimerStore {
    async fn create(&self, new: NewExamTimer) -> AppResult<ExamTimer> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|t| t.exam_id == new.exam_id && t.student_id == new.student_id && t.is_active)
        {
            return Err(AppError::conflict("An exam attempt is already in progress"));
        }
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let now = Utc::now();
        let timer = ExamTimer {
            id: *next_id,
            exam_id: new.exam_id,
            student_id: new.student_id,
            start_time: new.start_time,
            time_used: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        rows.push(timer.clone());
        Ok(timer)
    }

    async fn find_active(&self, exam_id: i64, student_id: i64) -> AppResult<Option<ExamTimer>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.exam_id == exam_id && t.student_id == student_id && t.is_active)
            .cloned())
    }

    async fn find_all_active(&self, exam_id: i64) -> AppResult<Vec<ExamTimer>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.exam_id == exam_id && t.is_active)
            .cloned()
            .collect())
    }

    async fn find_by_student(&self, student_id: i64) -> AppResult<Vec<ExamTimer>> {
        let mut timers: Vec<ExamTimer> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.student_id == student_id)
            .cloned()
            .collect();
        timers.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(timers)
    }

    async fn save(&self, timer: &ExamTimer) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|t| t.id == timer.id)
            .ok_or_else(|| AppError::not_found("Timer not found"))?;
        *row = timer.clone();
        Ok(())
    }

    async fn bulk_set_active(&self, exam_id: i64, from: bool, to: bool) -> AppResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let mut affected = 0;
        for row in rows
            .iter_mut()
            .filter(|t| t.exam_id == exam_id && t.is_active == from)
        {
            row.is_active = to;
            affected += 1;
        }
        Ok(affected)
    }
}

/// NoticeStore that records delivery outcomes for assertions.
#[derive(Debug, Default)]
pub struct InMemoryNoticeStore {
    due: Mutex<Vec<Notice>>,
    pub outcomes: Mutex<Vec<(i64, NoticeStatus)>>,
}

impl InMemoryNoticeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_due(&self, notice: Notice) {
        self.due.lock().unwrap().push(notice);
    }
}

#[async_trait]
impl NoticeStore for InMemoryNoticeStore {
    async fn find_due_scheduled(&self, _now: DateTime<Utc>) -> AppResult<Vec<Notice>> {
        Ok(std::mem::take(&mut *self.due.lock().unwrap()))
    }

    async fn mark_delivery(
        &self,
        id: i64,
        status: NoticeStatus,
        _sent_at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.outcomes.lock().unwrap().push((id, status));
        Ok(())
    }
}

/// An active timer row with fixed timestamps, for seeding.
pub fn active_timer(id: i64, exam_id: i64, student_id: i64, start_time: i64) -> ExamTimer {
    ExamTimer {
        id,
        exam_id,
        student_id,
        start_time,
        time_used: 0,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
