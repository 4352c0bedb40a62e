//! # examtrack-worker
//!
//! The background task side of ExamTrack: a single periodic loop that
//! scans for due scheduled notices and pushes them through the realtime
//! registry.

pub mod runner;

pub use runner::NoticeRunner;
