//! Attendance check-in model.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use lingo_core::types::{DbId, Timestamp};

/// One check-in row. `(user_id, date)` is unique.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AttendanceRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub date: NaiveDate,
    pub created_at: Timestamp,
}
