//! Repository for the `pronunciation_results` table.

use sqlx::PgPool;

use lingo_core::pronunciation::{recent_improvement, IMPROVEMENT_WINDOW};
use lingo_core::statistics::round2;
use lingo_core::types::DbId;

use crate::models::pronunciation::{
    PronunciationResult, PronunciationStatistics, PronunciationSummary,
};

const COLUMNS: &str = "id, user_id, session_id, target_text, overall_score, \
                        pitch_score, rhythm_score, stress_score, fluency_score, \
                        confidence, rate_status, fluency_status, misstressed_words, \
                        detailed_feedback, suggestions, phoneme_scores, created_at";

const SUMMARY_COLUMNS: &str = "id, session_id, target_text, overall_score, \
                                pitch_score, rhythm_score, stress_score, created_at";

/// Read-side access to results written by the speech analysis pipeline.
pub struct PronunciationRepo;

impl PronunciationRepo {
    /// History summaries, newest first. Detail payloads stay out of the
    /// list view.
    pub async fn history_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PronunciationSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM pronunciation_results
             WHERE user_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, PronunciationSummary>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// One owned result with its full detail payloads.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<PronunciationResult>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pronunciation_results WHERE id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, PronunciationResult>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an owned result. Returns `true` if deleted.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM pronunciation_results WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Per-dimension score averages. The improvement figure compares the
    /// latest five overall scores against the five before them, once ten
    /// results exist.
    pub async fn statistics_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<PronunciationStatistics, sqlx::Error> {
        let (total_count, overall, pitch, rhythm, stress, fluency): (
            i64,
            Option<f64>,
            Option<f64>,
            Option<f64>,
            Option<f64>,
            Option<f64>,
        ) = sqlx::query_as(
            "SELECT COUNT(*),
                    AVG(overall_score),
                    AVG(pitch_score),
                    AVG(rhythm_score),
                    AVG(stress_score),
                    AVG(COALESCE(fluency_score, 0))
             FROM pronunciation_results
             WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        if total_count == 0 {
            return Ok(PronunciationStatistics {
                total_count: 0,
                average_overall: 0.0,
                average_pitch: 0.0,
                average_rhythm: 0.0,
                average_stress: 0.0,
                average_fluency: 0.0,
                recent_improvement: None,
            });
        }

        // Newest first; the two comparison windows only need ten rows.
        let scores: Vec<(f64,)> = sqlx::query_as(
            "SELECT overall_score FROM pronunciation_results
             WHERE user_id = $1
             ORDER BY created_at DESC
             LIMIT $2",
        )
        .bind(user_id)
        .bind((IMPROVEMENT_WINDOW * 2) as i64)
        .fetch_all(pool)
        .await?;
        let scores: Vec<f64> = scores.into_iter().map(|(s,)| s).collect();

        Ok(PronunciationStatistics {
            total_count,
            average_overall: round2(overall.unwrap_or(0.0)),
            average_pitch: round2(pitch.unwrap_or(0.0)),
            average_rhythm: round2(rhythm.unwrap_or(0.0)),
            average_stress: round2(stress.unwrap_or(0.0)),
            average_fluency: round2(fluency.unwrap_or(0.0)),
            recent_improvement: recent_improvement(&scores),
        })
    }
}
