//! # examtrack-service
//!
//! Business logic for ExamTrack: the pure answer-scoring engine, the
//! submission service that scores and persists incoming answers, and the
//! notice management service.

pub mod notice;
pub mod scoring;
pub mod submission;

pub use notice::NoticeService;
pub use submission::{SubmissionOutcome, SubmissionService};
