//! Application state shared across all handlers.

use std::sync::Arc;

use examtrack_auth::JwtDecoder;
use examtrack_core::config::AppConfig;
use examtrack_database::repositories::timer::TimerRepository;
use examtrack_database::DatabasePool;
use examtrack_realtime::{ConnectionRegistry, SessionCoordinator};
use examtrack_service::{NoticeService, SubmissionService};

/// Shared dependencies passed to every Axum handler via `State`.
///
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db: DatabasePool,
    /// Bearer token decoder.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Live connection registry.
    pub registry: Arc<ConnectionRegistry>,
    /// Exam session protocol state machine.
    pub coordinator: Arc<SessionCoordinator>,
    /// Timer rows, for the non-realtime status endpoints.
    pub timer_repo: Arc<TimerRepository>,
    /// Notice creation and management.
    pub notice_service: Arc<NoticeService>,
    /// Grading and result persistence.
    pub submission_service: Arc<SubmissionService>,
}
