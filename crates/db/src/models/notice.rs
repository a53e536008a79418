//! Notice model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lingo_core::types::{DbId, Timestamp};

/// A notice row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Notice {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a notice.
#[derive(Debug, Deserialize)]
pub struct CreateNotice {
    pub title: String,
    pub content: String,
}

/// DTO for editing a notice.
#[derive(Debug, Deserialize)]
pub struct UpdateNotice {
    pub title: Option<String>,
    pub content: Option<String>,
}
