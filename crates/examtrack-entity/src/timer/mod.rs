//! Session timer entity.

pub mod model;

pub use model::{ExamTimer, NewExamTimer};
