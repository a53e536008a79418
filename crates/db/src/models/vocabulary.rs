//! Wordbook and word models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lingo_core::types::{DbId, Timestamp};

/// A wordbook row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Wordbook {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// Wordbook list item with its word count.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WordbookWithCount {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub word_count: i64,
}

/// A word row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Word {
    pub id: DbId,
    pub wordbook_id: DbId,
    pub word: String,
    pub definition: String,
    pub pronunciation: Option<String>,
    pub english_example: Option<String>,
    pub is_memorized: bool,
    pub is_favorite: bool,
    pub created_at: Timestamp,
}

/// DTO for adding a word.
#[derive(Debug, Deserialize)]
pub struct CreateWord {
    pub word: String,
    pub definition: String,
    pub pronunciation: Option<String>,
    pub english_example: Option<String>,
}

/// DTO for editing a word's content.
#[derive(Debug, Deserialize)]
pub struct UpdateWord {
    pub word: Option<String>,
    pub definition: Option<String>,
    pub pronunciation: Option<String>,
    pub english_example: Option<String>,
}

/// Word counts for the stats endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct VocabularyStats {
    pub total_count: i64,
    pub memorized_count: i64,
    pub not_memorized_count: i64,
}
