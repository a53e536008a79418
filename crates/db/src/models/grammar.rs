//! Grammar-session model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lingo_core::types::{DbId, Timestamp};

/// A grammar practice session row. Feedback fields are JSON arrays of
/// strings produced by the speech pipeline.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GrammarSession {
    pub id: DbId,
    pub user_id: DbId,
    pub transcribed_text: String,
    pub corrected_text: String,
    pub grammar_feedback: serde_json::Value,
    pub vocabulary_suggestions: serde_json::Value,
    pub is_favorite: bool,
    pub created_at: Timestamp,
}

/// DTO for recording a session.
#[derive(Debug, Deserialize)]
pub struct CreateGrammarSession {
    pub transcribed_text: String,
    pub corrected_text: String,
    pub grammar_feedback: Option<serde_json::Value>,
    pub vocabulary_suggestions: Option<serde_json::Value>,
}

/// Aggregates for the statistics endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GrammarStatistics {
    pub total_count: i64,
    pub corrected_count: i64,
    pub accuracy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_accuracy: Option<f64>,
}
