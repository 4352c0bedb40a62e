//! Exam result entity.

pub mod model;

pub use model::{ExamResult, NewExamResult};
