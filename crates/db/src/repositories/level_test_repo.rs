//! Repository for level-test questions and results.

use sqlx::PgPool;

use lingo_core::types::DbId;

use crate::models::level_test::{LevelTestQuestion, LevelTestQuestionResponse, LevelTestResult};

const QUESTION_COLUMNS: &str = "id, question_text, correct_answer, difficulty";
const RESULT_COLUMNS: &str = "id, user_id, score, total_questions, level, created_at";

/// Provides question sampling and result persistence.
pub struct LevelTestRepo;

impl LevelTestRepo {
    /// Sample `count` random questions with the answers stripped.
    pub async fn random_questions(
        pool: &PgPool,
        count: i64,
    ) -> Result<Vec<LevelTestQuestionResponse>, sqlx::Error> {
        sqlx::query_as::<_, LevelTestQuestionResponse>(
            "SELECT id, question_text, difficulty FROM level_test_questions
             ORDER BY random()
             LIMIT $1",
        )
        .bind(count)
        .fetch_all(pool)
        .await
    }

    /// Fetch the full rows (with answers) for a set of submitted questions.
    pub async fn find_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<LevelTestQuestion>, sqlx::Error> {
        let query = format!(
            "SELECT {QUESTION_COLUMNS} FROM level_test_questions WHERE id = ANY($1)"
        );
        sqlx::query_as::<_, LevelTestQuestion>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Persist a graded result, returning the created row.
    pub async fn insert_result(
        pool: &PgPool,
        user_id: DbId,
        score: i32,
        total_questions: i32,
        level: &str,
    ) -> Result<LevelTestResult, sqlx::Error> {
        let query = format!(
            "INSERT INTO level_test_results (user_id, score, total_questions, level)
             VALUES ($1, $2, $3, $4)
             RETURNING {RESULT_COLUMNS}"
        );
        sqlx::query_as::<_, LevelTestResult>(&query)
            .bind(user_id)
            .bind(score)
            .bind(total_questions)
            .bind(level)
            .fetch_one(pool)
            .await
    }

    /// Past results for a user, newest first.
    pub async fn results_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<LevelTestResult>, sqlx::Error> {
        let query = format!(
            "SELECT {RESULT_COLUMNS} FROM level_test_results
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, LevelTestResult>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
