//! Exam submission service.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use examtrack_core::result::AppResult;
use examtrack_database::repositories::question::QuestionRepository;
use examtrack_database::repositories::result::ResultRepository;
use examtrack_entity::question::SubmittedAnswer;
use examtrack_entity::result::NewExamResult;

use crate::scoring;

/// Outcome of grading and persisting a submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    /// Points awarded to the student.
    pub score: i32,
    /// Sum of all question weights in the exam.
    pub total_score: i32,
}

/// Grades submitted answers against the exam's question bank and records
/// the result.
#[derive(Debug, Clone)]
pub struct SubmissionService {
    questions: Arc<QuestionRepository>,
    results: Arc<ResultRepository>,
}

impl SubmissionService {
    /// Creates a new submission service.
    pub fn new(questions: Arc<QuestionRepository>, results: Arc<ResultRepository>) -> Self {
        Self { questions, results }
    }

    /// Scores the submission and persists an exam result row.
    ///
    /// The raw answers are stored verbatim as a JSON blob alongside the
    /// computed score so that a grading dispute can be re-examined later.
    pub async fn submit(
        &self,
        exam_id: i64,
        student_id: i64,
        answers: &[SubmittedAnswer],
        time_used: i32,
    ) -> AppResult<SubmissionOutcome> {
        let questions = self.questions.find_by_exam(exam_id).await?;
        let total_score: i32 = questions.iter().map(|q| q.score).sum();
        let score = scoring::score(answers, &questions);

        let answers_blob = serde_json::to_string(answers)?;
        self.results
            .create(NewExamResult {
                exam_id,
                student_id,
                score,
                answers: answers_blob,
                time_used,
            })
            .await?;

        info!(exam_id, student_id, score, total_score, "exam submission graded");

        Ok(SubmissionOutcome { score, total_score })
    }
}
