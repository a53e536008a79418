//! Repository for the `attendance_records` table.

use chrono::NaiveDate;
use sqlx::PgPool;

use lingo_core::types::DbId;

use crate::models::attendance::AttendanceRecord;

const COLUMNS: &str = "id, user_id, date, created_at";

/// Provides attendance check-in and history operations.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Record a check-in for the given date. A second check-in on the same
    /// date violates `uq_attendance_user_date`, which the API layer maps
    /// to a conflict.
    pub async fn insert(
        pool: &PgPool,
        user_id: DbId,
        date: NaiveDate,
    ) -> Result<AttendanceRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendance_records (user_id, date)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(user_id)
            .bind(date)
            .fetch_one(pool)
            .await
    }

    /// Full check-in history, oldest first.
    pub async fn history_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance_records
             WHERE user_id = $1
             ORDER BY date ASC"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Just the check-in dates, ascending. Input for the streak scan.
    pub async fn dates_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<NaiveDate>, sqlx::Error> {
        let rows: Vec<(NaiveDate,)> = sqlx::query_as(
            "SELECT date FROM attendance_records WHERE user_id = $1 ORDER BY date ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(date,)| date).collect())
    }
}
