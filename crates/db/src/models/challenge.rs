//! Group-challenge models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lingo_core::types::{DbId, Timestamp};

/// A challenge row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GroupChallenge {
    pub id: DbId,
    pub group_id: DbId,
    pub created_by: DbId,
    pub title: String,
    pub description: Option<String>,
    pub challenge_type: String,
    pub target_value: i32,
    pub end_date: Timestamp,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// Challenge list item with the group's combined progress.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ChallengeWithProgress {
    pub id: DbId,
    pub group_id: DbId,
    pub created_by: DbId,
    pub title: String,
    pub description: Option<String>,
    pub challenge_type: String,
    pub target_value: i32,
    pub end_date: Timestamp,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub group_current_value: i64,
}

/// Leaderboard entry with the participant's name resolved.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LeaderboardEntry {
    pub user_id: DbId,
    pub name: Option<String>,
    pub current_value: i32,
    pub status: String,
    pub completed_at: Option<Timestamp>,
}

/// A proof submission row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ChallengeSubmission {
    pub id: DbId,
    pub challenge_id: DbId,
    pub user_id: DbId,
    pub proof_content: String,
    pub proof_image_url: Option<String>,
    pub status: String,
    pub submitted_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
}

/// DTO for creating a challenge.
#[derive(Debug, Deserialize)]
pub struct CreateChallenge {
    pub title: String,
    pub description: Option<String>,
    pub challenge_type: String,
    pub target_value: i32,
    pub duration_days: Option<i32>,
}

/// DTO for editing a challenge.
///
/// `description` is doubly optional: an absent field keeps the stored
/// value, an explicit `null` clears it.
#[derive(Debug, Deserialize)]
pub struct UpdateChallenge {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub target_value: Option<i32>,
}

/// Wraps any present value (including `null`) in `Some`, so a missing
/// field stays distinguishable from an explicit `null`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// DTO for submitting proof.
#[derive(Debug, Deserialize)]
pub struct CreateSubmission {
    pub proof_content: String,
    pub proof_image_url: Option<String>,
}
