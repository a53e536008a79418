//! Study-group models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lingo_core::types::{DbId, Timestamp};

/// A study-group row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StudyGroup {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_by: DbId,
    pub max_members: i32,
    pub requires_approval: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// Group list/detail item, joined with membership facts about the caller.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GroupSummary {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_by: DbId,
    pub creator_name: Option<String>,
    pub max_members: i32,
    pub requires_approval: bool,
    pub member_count: i64,
    pub is_member: bool,
    pub is_owner: bool,
    pub created_at: Timestamp,
}

/// Member list item with the display name resolved.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GroupMemberInfo {
    pub user_id: DbId,
    pub name: Option<String>,
    pub role: String,
    pub joined_at: Timestamp,
}

/// A join-request row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JoinRequest {
    pub id: DbId,
    pub group_id: DbId,
    pub user_id: DbId,
    pub status: String,
    pub created_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
}

/// Pending request as shown to the group owner.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JoinRequestInfo {
    pub id: DbId,
    pub user_id: DbId,
    pub requester_name: Option<String>,
    pub created_at: Timestamp,
}

/// A chat message row with the sender's name resolved.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GroupMessageInfo {
    pub id: DbId,
    pub group_id: DbId,
    pub user_id: DbId,
    pub sender_name: Option<String>,
    pub content: String,
    pub created_at: Timestamp,
}

/// DTO for creating a group.
#[derive(Debug, Deserialize)]
pub struct CreateGroup {
    pub name: String,
    pub description: Option<String>,
    pub max_members: Option<i32>,
    pub requires_approval: Option<bool>,
}
