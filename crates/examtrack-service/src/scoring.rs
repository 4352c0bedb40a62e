//! The answer-scoring engine.
//!
//! A pure function from (submitted answers, question definitions) to a
//! total integer score. Nothing here touches I/O; the submission service
//! feeds it and persists the outcome.

use std::collections::HashMap;

use examtrack_entity::question::{BlankAnswer, Question, QuestionType, SubmittedAnswer};

/// Compute the total score for a submission.
///
/// Answers referencing an unknown question id contribute zero. Single-choice
/// questions award full weight on exact, case-sensitive string equality.
/// Fill-in questions award `weight * correct_blanks / blank_count` with
/// truncating integer division; truncation (not rounding) is required to
/// keep parity with historically recorded scores.
pub fn score(answers: &[SubmittedAnswer], questions: &[Question]) -> i32 {
    let by_id: HashMap<i64, &Question> = questions.iter().map(|q| (q.id, q)).collect();

    let mut total = 0;
    for answer in answers {
        let Some(question) = by_id.get(&answer.question_id) else {
            continue;
        };

        match question.question_type {
            QuestionType::Single => {
                if answer.answer == question.answer {
                    total += question.score;
                }
            }
            QuestionType::Fill => {
                let blanks = &question.answers.0;
                if blanks.is_empty() {
                    continue;
                }
                let correct = matched_blanks(&answer.answers, blanks);
                if correct > 0 {
                    total += question.score * correct / blanks.len() as i32;
                }
            }
        }
    }

    total
}

/// Count blanks whose submitted answer matches an acceptable option at the
/// same index. Submitted answers past the last blank, or blanks past the
/// last submitted answer, never match.
fn matched_blanks(submitted: &[String], blanks: &[BlankAnswer]) -> i32 {
    submitted
        .iter()
        .enumerate()
        .filter(|(index, answer)| {
            blanks
                .get(*index)
                .is_some_and(|blank| blank.options.iter().any(|option| option == *answer))
        })
        .count() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json;

    fn single(id: i64, answer: &str, weight: i32) -> Question {
        Question {
            id,
            exam_id: 1,
            question_type: QuestionType::Single,
            content: String::new(),
            score: weight,
            answer: answer.to_string(),
            answers: Json(Vec::new()),
        }
    }

    fn fill(id: i64, blanks: &[&[&str]], weight: i32) -> Question {
        Question {
            id,
            exam_id: 1,
            question_type: QuestionType::Fill,
            content: String::new(),
            score: weight,
            answer: String::new(),
            answers: Json(
                blanks
                    .iter()
                    .map(|options| BlankAnswer {
                        options: options.iter().map(|o| o.to_string()).collect(),
                        kind: "text".to_string(),
                    })
                    .collect(),
            ),
        }
    }

    fn single_answer(question_id: i64, answer: &str) -> SubmittedAnswer {
        SubmittedAnswer {
            question_id,
            question_type: QuestionType::Single,
            answer: answer.to_string(),
            answers: Vec::new(),
        }
    }

    fn fill_answer(question_id: i64, answers: &[&str]) -> SubmittedAnswer {
        SubmittedAnswer {
            question_id,
            question_type: QuestionType::Fill,
            answer: String::new(),
            answers: answers.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_single_exact_match_awards_full_weight() {
        let questions = vec![single(1, "B", 10)];
        assert_eq!(score(&[single_answer(1, "B")], &questions), 10);
    }

    #[test]
    fn test_single_is_case_sensitive_and_untrimmed() {
        let questions = vec![single(1, "B", 10)];
        assert_eq!(score(&[single_answer(1, "b")], &questions), 0);
        assert_eq!(score(&[single_answer(1, " B")], &questions), 0);
        assert_eq!(score(&[single_answer(1, "")], &questions), 0);
    }

    #[test]
    fn test_fill_partial_credit_truncates() {
        // W=10, N=3, C=2 => floor(20/3) = 6, not 6.67 rounded to 7.
        let questions = vec![fill(1, &[&["a"], &["b"], &["c"]], 10)];
        assert_eq!(score(&[fill_answer(1, &["a", "b", "x"])], &questions), 6);
    }

    #[test]
    fn test_fill_all_blanks_correct_awards_full_weight() {
        let questions = vec![fill(1, &[&["4", "four"], &["8"]], 10)];
        assert_eq!(score(&[fill_answer(1, &["four", "8"])], &questions), 10);
    }

    #[test]
    fn test_fill_blank_matches_any_option_at_its_index() {
        let questions = vec![fill(1, &[&["a", "b"]], 5)];
        assert_eq!(score(&[fill_answer(1, &["b"])], &questions), 5);
        // Correct string at the wrong index does not count.
        let two = vec![fill(2, &[&["a"], &["b"]], 10)];
        assert_eq!(score(&[fill_answer(2, &["b", "a"])], &two), 0);
    }

    #[test]
    fn test_fill_short_submission_drops_missing_indices() {
        let questions = vec![fill(1, &[&["a"], &["b"], &["c"]], 9)];
        assert_eq!(score(&[fill_answer(1, &["a"])], &questions), 3);
    }

    #[test]
    fn test_fill_empty_submission_scores_zero() {
        let questions = vec![fill(1, &[&["a"], &["b"]], 10)];
        assert_eq!(score(&[fill_answer(1, &[])], &questions), 0);
    }

    #[test]
    fn test_fill_excess_answers_are_ignored() {
        let questions = vec![fill(1, &[&["a"]], 10)];
        assert_eq!(score(&[fill_answer(1, &["a", "b", "c"])], &questions), 10);
    }

    #[test]
    fn test_unknown_question_id_contributes_zero() {
        let questions = vec![single(1, "B", 10)];
        let answers = vec![single_answer(99, "B"), single_answer(1, "B")];
        assert_eq!(score(&answers, &questions), 10);
    }

    #[test]
    fn test_total_is_sum_across_questions() {
        let questions = vec![
            single(1, "A", 5),
            single(2, "B", 5),
            fill(3, &[&["x"], &["y"]], 10),
        ];
        let answers = vec![
            single_answer(1, "A"),
            single_answer(2, "C"),
            fill_answer(3, &["x", "z"]),
        ];
        assert_eq!(score(&answers, &questions), 10);
    }

    #[test]
    fn test_no_answers_scores_zero() {
        let questions = vec![single(1, "A", 5)];
        assert_eq!(score(&[], &questions), 0);
    }
}
