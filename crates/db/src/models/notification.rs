//! Notification model.

use serde::Serialize;
use sqlx::FromRow;

use lingo_core::types::{DbId, Timestamp};

/// A row from the `notifications` table. Rows are created only by the
/// server in reaction to domain events.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub kind: String,
    pub content: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
