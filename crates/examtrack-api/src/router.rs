//! Route definitions for the ExamTrack HTTP API.
//!
//! REST endpoints are mounted under `/api`; the WebSocket upgrade lives at
//! `/ws`. The router receives the fully-constructed `AppState` and threads
//! it through every handler via Axum's `State` extractor.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/exams/{id}/live-status", get(handlers::exam::live_status))
        .route("/exams/{id}/submit", post(handlers::exam::submit))
        .route(
            "/students/{id}/timer-history",
            get(handlers::timer::timer_history),
        )
        .route(
            "/notices",
            post(handlers::notice::create_notice).get(handlers::notice::list_notices),
        )
        .route(
            "/notices/{id}",
            get(handlers::notice::get_notice).delete(handlers::notice::delete_notice),
        )
        .route("/notices/{id}/cancel", post(handlers::notice::cancel_notice))
        .route(
            "/realtime/online",
            get(handlers::presence::online_participants),
        );

    Router::new()
        .nest("/api", api_routes)
        .route("/ws", get(handlers::ws::ws_upgrade))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
