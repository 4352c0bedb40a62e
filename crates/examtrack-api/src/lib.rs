//! # examtrack-api
//!
//! HTTP API layer for ExamTrack built on Axum.
//!
//! Exposes the WebSocket upgrade for live exam sessions plus the
//! non-realtime endpoints: exam submission, live status, timer history,
//! notice management, online participants, and health.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
