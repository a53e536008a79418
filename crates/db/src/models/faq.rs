//! FAQ model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lingo_core::types::{DbId, Timestamp};

/// An FAQ row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Faq {
    pub id: DbId,
    pub question: String,
    pub answer: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an FAQ entry.
#[derive(Debug, Deserialize)]
pub struct CreateFaq {
    pub question: String,
    pub answer: String,
}

/// DTO for editing an FAQ entry.
#[derive(Debug, Deserialize)]
pub struct UpdateFaq {
    pub question: Option<String>,
    pub answer: Option<String>,
}
