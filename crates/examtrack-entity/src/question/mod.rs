//! Question reference data and submitted answers.

pub mod model;

pub use model::{BlankAnswer, Question, QuestionType, SubmittedAnswer};
