//! Question entity model and the submitted-answer input shape.
//!
//! Questions are owned by the exam-authoring side; the scoring engine only
//! reads them. Submitted answers are ephemeral scoring input that gets
//! persisted verbatim as a JSON blob on the result row.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Kind of question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "question_type", rename_all = "lowercase")]
pub enum QuestionType {
    /// Single-choice: one correct answer string, exact match.
    Single,
    /// Fill-in: N ordered blanks, each with a set of acceptable options.
    Fill,
}

/// Acceptable options for one blank of a fill-in question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlankAnswer {
    /// Strings accepted as correct for this blank.
    pub options: Vec<String>,
    /// Blank input kind hint for the client (text, number, ...).
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Immutable question definition used for scoring.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Unique question identifier.
    pub id: i64,
    /// Exam this question belongs to.
    pub exam_id: i64,
    /// Question kind.
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Question text.
    pub content: String,
    /// Score weight in integer points.
    pub score: i32,
    /// Correct answer string for single-choice questions.
    pub answer: String,
    /// Ordered per-blank acceptable options for fill-in questions.
    pub answers: Json<Vec<BlankAnswer>>,
}

/// One submitted answer, paired to a question by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    /// Question being answered.
    pub question_id: i64,
    /// Question kind the client believes it answered.
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Answer string for single-choice questions.
    #[serde(default)]
    pub answer: String,
    /// Ordered per-blank answer strings for fill-in questions.
    #[serde(default)]
    pub answers: Vec<String>,
}
