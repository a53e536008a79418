//! Learning-log model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lingo_core::types::{DbId, Timestamp};

/// One recorded practice session. Conversation logs carry a duration in
/// minutes; grammar and pronunciation logs carry an item count.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LearningLog {
    pub id: DbId,
    pub user_id: DbId,
    pub log_type: String,
    pub duration_minutes: Option<i32>,
    pub item_count: Option<i32>,
    pub created_at: Timestamp,
}

/// DTO for recording a log entry.
#[derive(Debug, Deserialize)]
pub struct CreateLearningLog {
    pub log_type: String,
    pub duration_minutes: Option<i32>,
    pub item_count: Option<i32>,
}
