//! Repository for the point balance and ledger.
//!
//! A transaction pairs the conditional balance update with the ledger
//! insert. The balance update refuses to go negative; the caller turns a
//! refused update into a validation error.

use sqlx::PgPool;

use lingo_core::types::DbId;

use crate::models::point::PointHistory;

const COLUMNS: &str = "id, user_id, change_amount, reason, created_at";

/// Outcome of a point transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointOutcome {
    /// Applied; carries the new balance.
    Applied(i32),
    /// The deduction would have taken the balance below zero.
    InsufficientPoints,
}

/// Provides atomic point transactions and ledger reads.
pub struct PointRepo;

impl PointRepo {
    /// Apply a signed point change and record it in the ledger, all in
    /// one transaction. The UPDATE's balance guard makes concurrent
    /// deductions safe.
    pub async fn apply_transaction(
        pool: &PgPool,
        user_id: DbId,
        amount: i32,
        reason: &str,
    ) -> Result<PointOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated: Option<(i32,)> = sqlx::query_as(
            "UPDATE users
             SET points = points + $2, updated_at = NOW()
             WHERE id = $1 AND points + $2 >= 0
             RETURNING points",
        )
        .bind(user_id)
        .bind(amount)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((balance,)) = updated else {
            tx.rollback().await?;
            return Ok(PointOutcome::InsufficientPoints);
        };

        sqlx::query("INSERT INTO point_history (user_id, change_amount, reason) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(amount)
            .bind(reason)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(PointOutcome::Applied(balance))
    }

    /// A user's ledger, newest first.
    pub async fn history_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<PointHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM point_history
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, PointHistory>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
