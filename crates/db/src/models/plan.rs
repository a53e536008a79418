//! Learning-plan model.

use serde::Serialize;
use sqlx::FromRow;

use lingo_core::types::{DbId, Timestamp};

/// A persisted learning plan. `time_distribution` is the
/// `{style: minutes}` object produced at generation time.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LearningPlan {
    pub id: DbId,
    pub user_id: DbId,
    pub user_level: i32,
    pub goal_level: i32,
    pub estimated_days: i32,
    pub frequency_description: String,
    pub total_session_duration: i32,
    pub time_distribution: serde_json::Value,
    pub plan_summary: String,
    pub created_at: Timestamp,
}
