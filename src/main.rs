//! ExamTrack server — live exam-session coordination backend.
//!
//! Entry point that wires all crates together: configuration, logging,
//! database, the realtime coordinator, the notice dispatch worker, and
//! the Axum HTTP/WebSocket server.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{fmt, EnvFilter};

use examtrack_core::config::AppConfig;
use examtrack_core::error::AppError;
use examtrack_entity::store::{NoticeStore, TimerStore};

#[tokio::main]
async fn main() {
    let env = std::env::var("EXAMTRACK_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ExamTrack v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db = examtrack_database::DatabasePool::connect(&config.database).await?;
    examtrack_database::migration::run_migrations(db.pool()).await?;

    // ── Repositories ─────────────────────────────────────────────
    let timer_repo = Arc::new(examtrack_database::repositories::timer::TimerRepository::new(
        db.pool().clone(),
    ));
    let notice_repo = Arc::new(
        examtrack_database::repositories::notice::NoticeRepository::new(db.pool().clone()),
    );
    let question_repo = Arc::new(
        examtrack_database::repositories::question::QuestionRepository::new(db.pool().clone()),
    );
    let result_repo = Arc::new(
        examtrack_database::repositories::result::ResultRepository::new(db.pool().clone()),
    );

    // ── Realtime engine ──────────────────────────────────────────
    let jwt_decoder = Arc::new(examtrack_auth::JwtDecoder::new(&config.auth));
    let registry = Arc::new(examtrack_realtime::ConnectionRegistry::new());
    let coordinator = Arc::new(examtrack_realtime::SessionCoordinator::new(
        Arc::clone(&registry),
        Arc::clone(&timer_repo) as Arc<dyn TimerStore>,
        Arc::clone(&jwt_decoder),
    ));
    let dispatcher = Arc::new(examtrack_realtime::NoticeDispatcher::new(
        Arc::clone(&registry),
        Arc::clone(&notice_repo) as Arc<dyn NoticeStore>,
    ));

    // ── Services ─────────────────────────────────────────────────
    let notice_service = Arc::new(examtrack_service::NoticeService::new(
        Arc::clone(&notice_repo),
        Arc::clone(&dispatcher),
    ));
    let submission_service = Arc::new(examtrack_service::SubmissionService::new(
        Arc::clone(&question_repo),
        Arc::clone(&result_repo),
    ));

    // ── Notice dispatch worker ───────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let runner =
        examtrack_worker::NoticeRunner::new(Arc::clone(&dispatcher), config.worker.clone());
    let worker_handle = tokio::spawn(async move {
        runner.run(shutdown_rx).await;
    });

    // ── HTTP/WebSocket server ────────────────────────────────────
    let state = examtrack_api::AppState {
        config: Arc::new(config.clone()),
        db: db.clone(),
        jwt_decoder,
        registry,
        coordinator,
        timer_repo,
        notice_service,
        submission_service,
    };
    let app = examtrack_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("ExamTrack server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown");
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    let grace = std::time::Duration::from_secs(config.server.shutdown_grace_seconds);
    let _ = tokio::time::timeout(grace, worker_handle).await;
    db.close().await;

    tracing::info!("ExamTrack server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
