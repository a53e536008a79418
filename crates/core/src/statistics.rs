//! Learning-log aggregation and goal progress.

use serde::Serialize;

use crate::error::CoreError;
use crate::planning::LearningGoals;

/// Log type for conversation practice, measured in minutes.
pub const LOG_TYPE_CONVERSATION: &str = "conversation";
/// Log type for grammar practice, measured as a count of exercises.
pub const LOG_TYPE_GRAMMAR: &str = "grammar";
/// Log type for pronunciation practice, measured as a count of attempts.
pub const LOG_TYPE_PRONUNCIATION: &str = "pronunciation";

/// All valid learning-log types.
pub const VALID_LOG_TYPES: &[&str] = &[
    LOG_TYPE_CONVERSATION,
    LOG_TYPE_GRAMMAR,
    LOG_TYPE_PRONUNCIATION,
];

/// Validate a learning-log entry before it is recorded.
pub fn validate_log(log_type: &str, value: i32) -> Result<(), CoreError> {
    if !VALID_LOG_TYPES.contains(&log_type) {
        return Err(CoreError::Validation(format!(
            "Invalid log type '{log_type}'. Must be one of: {}",
            VALID_LOG_TYPES.join(", ")
        )));
    }
    if value <= 0 {
        return Err(CoreError::Validation(
            "Log value must be greater than zero".into(),
        ));
    }
    Ok(())
}

/// Round to two decimal places for percentage reporting.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Accumulated log totals per study style.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct LogTotals {
    pub conversation: i64,
    pub grammar: i64,
    pub pronunciation: i64,
}

impl LogTotals {
    pub fn total(&self) -> i64 {
        self.conversation + self.grammar + self.pronunciation
    }

    /// Add one log entry to the matching bucket. Unknown types are
    /// ignored; the write path already rejects them.
    pub fn add(&mut self, log_type: &str, value: i64) {
        match log_type {
            LOG_TYPE_CONVERSATION => self.conversation += value,
            LOG_TYPE_GRAMMAR => self.grammar += value,
            LOG_TYPE_PRONUNCIATION => self.pronunciation += value,
            _ => {}
        }
    }
}

/// Progress toward one study goal.
#[derive(Debug, Clone, Serialize)]
pub struct StyleProgress {
    pub current: i64,
    pub goal: i32,
    /// `current / goal * 100`, rounded to two decimals. Zero when no goal
    /// is set for the style.
    pub percentage: f64,
}

/// Progress across all study goals.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    pub conversation: StyleProgress,
    pub grammar: StyleProgress,
    pub pronunciation: StyleProgress,
    /// Mean of the per-style percentages over styles with a goal set.
    /// `None` when the user has no goals at all.
    pub overall_percentage: Option<f64>,
}

fn style_progress(current: i64, goal: i32) -> StyleProgress {
    let percentage = if goal <= 0 {
        0.0
    } else {
        round2(current as f64 / goal as f64 * 100.0)
    };
    StyleProgress {
        current,
        goal: goal.max(0),
        percentage,
    }
}

/// Compute goal progress from accumulated totals.
///
/// `goals` is `None` when the user has never generated a learning plan;
/// every percentage is then zero and the overall figure is absent.
pub fn compute_progress(totals: &LogTotals, goals: Option<&LearningGoals>) -> ProgressReport {
    let (conv_goal, gram_goal, pron_goal) = match goals {
        Some(g) => (g.conversation_goal, g.grammar_goal, g.pronunciation_goal),
        None => (0, 0, 0),
    };

    let conversation = style_progress(totals.conversation, conv_goal);
    let grammar = style_progress(totals.grammar, gram_goal);
    let pronunciation = style_progress(totals.pronunciation, pron_goal);

    let with_goal: Vec<f64> = [&conversation, &grammar, &pronunciation]
        .iter()
        .filter(|p| p.goal > 0)
        .map(|p| p.percentage)
        .collect();
    let overall_percentage = if with_goal.is_empty() {
        None
    } else {
        Some(round2(with_goal.iter().sum::<f64>() / with_goal.len() as f64))
    };

    ProgressReport {
        conversation,
        grammar,
        pronunciation,
        overall_percentage,
    }
}
