//! Handlers for the `/level-tests` resource.
//!
//! Serves randomized placement questions, grades submissions, and keeps the
//! assessed level on the user row in sync with the newest result.

use std::collections::{HashMap, HashSet};

use axum::extract::State;
use axum::Json;
use lingo_core::error::CoreError;
use lingo_core::levels::{level_for_percentage, score_percentage};
use lingo_core::statistics::round2;
use lingo_core::types::DbId;
use lingo_db::models::level_test::{LevelTestQuestionResponse, LevelTestResult};
use lingo_db::repositories::{LevelTestRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Number of questions served per test.
const QUESTIONS_PER_TEST: i64 = 10;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// One answer in a test submission.
#[derive(Debug, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: DbId,
    pub submitted_answer: String,
}

/// Request body for `POST /level-tests/submit`.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub answers: Vec<SubmittedAnswer>,
}

/// Grading outcome returned by `POST /level-tests/submit`.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub score: i32,
    pub total_questions: i32,
    pub percentage: f64,
    pub level: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/level-tests/questions
///
/// Serve a random set of questions. Correct answers are never included.
pub async fn questions(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<LevelTestQuestionResponse>>> {
    let questions = LevelTestRepo::random_questions(&state.pool, QUESTIONS_PER_TEST).await?;

    if questions.is_empty() {
        return Err(AppError::NotFound(
            "No level test questions available".into(),
        ));
    }

    Ok(Json(questions))
}

/// POST /api/v1/level-tests/submit
///
/// Grade the submitted answers, persist the result, and update the user's
/// assessed level. Answers are compared case-insensitively after trimming.
pub async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<SubmitRequest>,
) -> AppResult<Json<SubmitResponse>> {
    if input.answers.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one answer is required".into(),
        )));
    }

    // A question repeated in the submission scores at most once.
    let answers = dedup_by_question(&input.answers);

    let question_ids: Vec<DbId> = answers.iter().map(|a| a.question_id).collect();
    let questions = LevelTestRepo::find_by_ids(&state.pool, &question_ids).await?;
    let answer_key: HashMap<DbId, String> = questions
        .into_iter()
        .map(|q| (q.id, q.correct_answer))
        .collect();

    // Unknown question ids simply never match.
    let score = answers
        .iter()
        .filter(|a| {
            answer_key
                .get(&a.question_id)
                .is_some_and(|correct| is_correct(&a.submitted_answer, correct))
        })
        .count();

    let total = answers.len();
    let percentage = score_percentage(score, total);
    let level = level_for_percentage(percentage);

    LevelTestRepo::insert_result(&state.pool, auth.user_id, score as i32, total as i32, level)
        .await?;
    UserRepo::update_level(&state.pool, auth.user_id, level).await?;

    tracing::info!(
        user_id = auth.user_id,
        score,
        total,
        level,
        "Level test graded"
    );

    Ok(Json(SubmitResponse {
        score: score as i32,
        total_questions: total as i32,
        percentage: round2(percentage),
        level: level.to_string(),
    }))
}

/// GET /api/v1/level-tests/results
///
/// The caller's past results, newest first.
pub async fn results(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<LevelTestResult>>> {
    let results = LevelTestRepo::results_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(results))
}

// ---------------------------------------------------------------------------
// Grading helpers
// ---------------------------------------------------------------------------

/// Keep the first answer per question id, in submission order.
fn dedup_by_question(answers: &[SubmittedAnswer]) -> Vec<&SubmittedAnswer> {
    let mut seen = HashSet::with_capacity(answers.len());
    answers
        .iter()
        .filter(|a| seen.insert(a.question_id))
        .collect()
}

/// Case-insensitive comparison after trimming.
fn is_correct(submitted: &str, correct: &str) -> bool {
    correct.trim().eq_ignore_ascii_case(submitted.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(question_id: DbId, text: &str) -> SubmittedAnswer {
        SubmittedAnswer {
            question_id,
            submitted_answer: text.to_string(),
        }
    }

    #[test]
    fn repeated_question_ids_count_once() {
        let answers = vec![answer(1, "goes"), answer(1, "goes"), answer(2, "ate")];
        let unique = dedup_by_question(&answers);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].question_id, 1);
        assert_eq!(unique[1].question_id, 2);
    }

    #[test]
    fn first_answer_wins_for_a_repeated_question() {
        let answers = vec![answer(1, "go"), answer(1, "goes")];
        let unique = dedup_by_question(&answers);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].submitted_answer, "go");
    }

    #[test]
    fn comparison_trims_and_ignores_case() {
        assert!(is_correct("  Goes ", "goes"));
        assert!(is_correct("GOES", " goes"));
        assert!(!is_correct("go", "goes"));
    }
}
