//! Point-ledger model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lingo_core::types::{DbId, Timestamp};

/// One ledger entry. `change_amount` is signed; the running balance lives
/// on the user row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PointHistory {
    pub id: DbId,
    pub user_id: DbId,
    pub change_amount: i32,
    pub reason: String,
    pub created_at: Timestamp,
}

/// DTO for a point transaction.
#[derive(Debug, Deserialize)]
pub struct PointTransaction {
    pub amount: i32,
    pub reason: String,
}
