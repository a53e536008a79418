//! Pronunciation-result models and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use lingo_core::types::{DbId, Timestamp};

/// Full pronunciation analysis row, including per-phoneme scores.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PronunciationResult {
    pub id: DbId,
    pub user_id: DbId,
    pub session_id: String,
    pub target_text: String,
    pub overall_score: f64,
    pub pitch_score: f64,
    pub rhythm_score: f64,
    pub stress_score: f64,
    pub fluency_score: Option<f64>,
    pub confidence: Option<f64>,
    pub rate_status: Option<String>,
    pub fluency_status: Option<String>,
    pub misstressed_words: Option<serde_json::Value>,
    pub detailed_feedback: serde_json::Value,
    pub suggestions: serde_json::Value,
    pub phoneme_scores: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// History list item without the bulky detail payloads.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PronunciationSummary {
    pub id: DbId,
    pub session_id: String,
    pub target_text: String,
    pub overall_score: f64,
    pub pitch_score: f64,
    pub rhythm_score: f64,
    pub stress_score: f64,
    pub created_at: Timestamp,
}

/// Aggregates for the statistics endpoint. All averages are 0.0 until the
/// user has at least one result.
#[derive(Debug, Clone, Serialize)]
pub struct PronunciationStatistics {
    pub total_count: i64,
    pub average_overall: f64,
    pub average_pitch: f64,
    pub average_rhythm: f64,
    pub average_stress: f64,
    pub average_fluency: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_improvement: Option<f64>,
}
