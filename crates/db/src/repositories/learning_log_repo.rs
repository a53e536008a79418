//! Repository for the `learning_logs` table.

use sqlx::PgPool;

use lingo_core::statistics::LogTotals;
use lingo_core::types::{DbId, Timestamp};

use crate::models::learning_log::{CreateLearningLog, LearningLog};

const COLUMNS: &str = "id, user_id, log_type, duration_minutes, item_count, created_at";

/// Conversation logs count minutes; the other types count items.
const VALUE_EXPR: &str = "CASE WHEN log_type = 'conversation'
                               THEN COALESCE(duration_minutes, 0)
                               ELSE COALESCE(item_count, 0) END";

/// Provides learning-log persistence and aggregation.
pub struct LearningLogRepo;

impl LearningLogRepo {
    /// Record one practice session, returning the created row.
    pub async fn insert(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateLearningLog,
    ) -> Result<LearningLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO learning_logs (user_id, log_type, duration_minutes, item_count)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LearningLog>(&query)
            .bind(user_id)
            .bind(&input.log_type)
            .bind(input.duration_minutes)
            .bind(input.item_count)
            .fetch_one(pool)
            .await
    }

    /// Sum all logged values per study style.
    pub async fn totals_for_user(pool: &PgPool, user_id: DbId) -> Result<LogTotals, sqlx::Error> {
        let query = format!(
            "SELECT log_type, COALESCE(SUM({VALUE_EXPR}), 0) AS total
             FROM learning_logs
             WHERE user_id = $1
             GROUP BY log_type"
        );
        let rows: Vec<(String, i64)> = sqlx::query_as(&query).bind(user_id).fetch_all(pool).await?;
        Ok(Self::fold(rows))
    }

    /// Sum logged values per study style for entries at or after `since`.
    /// Drives goal progress, which only counts activity after the goals
    /// were set.
    pub async fn totals_for_user_since(
        pool: &PgPool,
        user_id: DbId,
        since: Timestamp,
    ) -> Result<LogTotals, sqlx::Error> {
        let query = format!(
            "SELECT log_type, COALESCE(SUM({VALUE_EXPR}), 0) AS total
             FROM learning_logs
             WHERE user_id = $1 AND created_at >= $2
             GROUP BY log_type"
        );
        let rows: Vec<(String, i64)> = sqlx::query_as(&query)
            .bind(user_id)
            .bind(since)
            .fetch_all(pool)
            .await?;
        Ok(Self::fold(rows))
    }

    fn fold(rows: Vec<(String, i64)>) -> LogTotals {
        let mut totals = LogTotals::default();
        for (log_type, total) in rows {
            totals.add(&log_type, total);
        }
        totals
    }
}
