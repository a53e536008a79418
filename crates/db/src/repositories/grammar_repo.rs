//! Repository for the `grammar_sessions` table.

use sqlx::PgPool;

use lingo_core::grammar::{accuracy, accuracy_over, RECENT_WINDOW};
use lingo_core::types::DbId;

use crate::models::grammar::{CreateGrammarSession, GrammarSession, GrammarStatistics};

const COLUMNS: &str = "id, user_id, transcribed_text, corrected_text, \
                        grammar_feedback, vocabulary_suggestions, is_favorite, created_at";

/// A session counts as corrected when the corrected text differs from the
/// transcription, ignoring surrounding whitespace.
const CORRECTED_EXPR: &str = "TRIM(corrected_text) <> TRIM(transcribed_text)";

/// Provides grammar-session persistence and statistics.
pub struct GrammarRepo;

impl GrammarRepo {
    /// Record a session, returning the created row.
    pub async fn insert(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateGrammarSession,
    ) -> Result<GrammarSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO grammar_sessions
                (user_id, transcribed_text, corrected_text,
                 grammar_feedback, vocabulary_suggestions)
             VALUES ($1, $2, $3, COALESCE($4, '[]'::jsonb), COALESCE($5, '[]'::jsonb))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GrammarSession>(&query)
            .bind(user_id)
            .bind(&input.transcribed_text)
            .bind(&input.corrected_text)
            .bind(&input.grammar_feedback)
            .bind(&input.vocabulary_suggestions)
            .fetch_one(pool)
            .await
    }

    /// A user's sessions, newest first.
    pub async fn history_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<GrammarSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM grammar_sessions
             WHERE user_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, GrammarSession>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Accuracy statistics over the full history plus a rolling window of
    /// the most recent sessions.
    pub async fn statistics_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<GrammarStatistics, sqlx::Error> {
        let counts_query = format!(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE {CORRECTED_EXPR})
             FROM grammar_sessions
             WHERE user_id = $1"
        );
        let (total_count, corrected_count): (i64, i64) = sqlx::query_as(&counts_query)
            .bind(user_id)
            .fetch_one(pool)
            .await?;

        let recent_accuracy = if total_count >= RECENT_WINDOW as i64 {
            let window_query = format!(
                "SELECT {CORRECTED_EXPR} FROM grammar_sessions
                 WHERE user_id = $1
                 ORDER BY created_at DESC
                 LIMIT $2"
            );
            let flags: Vec<(bool,)> = sqlx::query_as(&window_query)
                .bind(user_id)
                .bind(RECENT_WINDOW as i64)
                .fetch_all(pool)
                .await?;
            let flags: Vec<bool> = flags.into_iter().map(|(c,)| c).collect();
            Some(accuracy_over(&flags))
        } else {
            None
        };

        Ok(GrammarStatistics {
            total_count,
            corrected_count,
            accuracy: accuracy(total_count, corrected_count),
            recent_accuracy,
        })
    }

    /// Flip the favorite flag on an owned session, returning the updated
    /// row.
    pub async fn toggle_favorite(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<GrammarSession>, sqlx::Error> {
        let query = format!(
            "UPDATE grammar_sessions SET is_favorite = NOT is_favorite
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GrammarSession>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// A user's favorite sessions, newest first.
    pub async fn favorites_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<GrammarSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM grammar_sessions
             WHERE user_id = $1 AND is_favorite = true
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, GrammarSession>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
