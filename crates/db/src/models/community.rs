//! Community post, comment, and report models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lingo_core::types::{DbId, Timestamp};

/// A post row. Soft-deleted posts keep their row with `is_deleted` set.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommunityPost {
    pub id: DbId,
    pub user_id: DbId,
    pub category: String,
    pub title: String,
    pub content: String,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A comment row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PostComment {
    pub id: DbId,
    pub post_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A moderation report row. Exactly one of `post_id` / `comment_id` is set.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PostReport {
    pub id: DbId,
    pub reporter_id: DbId,
    pub post_id: Option<DbId>,
    pub comment_id: Option<DbId>,
    pub reason: String,
    pub created_at: Timestamp,
}

/// DTO for creating a post.
#[derive(Debug, Deserialize)]
pub struct CreatePost {
    pub category: String,
    pub title: String,
    pub content: String,
}

/// DTO for editing a post.
#[derive(Debug, Deserialize)]
pub struct UpdatePost {
    pub category: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}
