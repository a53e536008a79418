//! Learning-plan templates and generation heuristics.
//!
//! A plan is a closed-form projection from the user's current level, a goal
//! level, study frequency, and session length onto an estimated duration,
//! a per-style time split, and derived study goals. No I/O here; the api
//! layer persists the result and the goals document.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::statistics::{LOG_TYPE_CONVERSATION, LOG_TYPE_GRAMMAR, LOG_TYPE_PRONUNCIATION};
use crate::types::Timestamp;

/// Study frequency expressed as sessions per day.
pub const FREQUENCY_DAILY: &str = "daily";
/// Study frequency expressed as a gap of N days between sessions.
pub const FREQUENCY_INTERVAL: &str = "interval";

/// All valid frequency types.
pub const VALID_FREQUENCY_TYPES: &[&str] = &[FREQUENCY_DAILY, FREQUENCY_INTERVAL];

/// Valid study styles. These are the same labels used for learning logs
/// and challenge types.
pub const VALID_STYLES: &[&str] = &[
    LOG_TYPE_CONVERSATION,
    LOG_TYPE_GRAMMAR,
    LOG_TYPE_PRONUNCIATION,
];

/// Session length bounds in minutes.
pub const MIN_SESSION_MINUTES: i32 = 10;
pub const MAX_SESSION_MINUTES: i32 = 120;

/// A plan never estimates fewer days than this.
pub const MIN_ESTIMATED_DAYS: i32 = 7;

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// A predefined plan template selectable by id.
#[derive(Debug, Clone, Serialize)]
pub struct PlanTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    pub goal_level: i32,
    #[serde(skip)]
    pub frequency_type: &'static str,
    #[serde(skip)]
    pub frequency_value: i32,
    #[serde(skip)]
    pub session_duration_minutes: i32,
    #[serde(skip)]
    pub preferred_styles: &'static [&'static str],
}

/// The fixed template catalogue.
pub const PLAN_TEMPLATES: &[PlanTemplate] = &[
    PlanTemplate {
        id: "toeic_master",
        name: "TOEIC Master",
        description: "Intensive grammar and pronunciation drills for exam preparation.",
        goal_level: 8,
        frequency_type: FREQUENCY_DAILY,
        frequency_value: 1,
        session_duration_minutes: 60,
        preferred_styles: &[LOG_TYPE_GRAMMAR, LOG_TYPE_PRONUNCIATION],
    },
    PlanTemplate {
        id: "daily_conversation",
        name: "Daily Conversation",
        description: "Short daily speaking practice for everyday fluency.",
        goal_level: 5,
        frequency_type: FREQUENCY_DAILY,
        frequency_value: 1,
        session_duration_minutes: 20,
        preferred_styles: &[LOG_TYPE_CONVERSATION],
    },
    PlanTemplate {
        id: "balanced_growth",
        name: "Balanced Growth",
        description: "Conversation, grammar, and pronunciation in equal measure.",
        goal_level: 6,
        frequency_type: FREQUENCY_INTERVAL,
        frequency_value: 2,
        session_duration_minutes: 45,
        preferred_styles: &[
            LOG_TYPE_CONVERSATION,
            LOG_TYPE_GRAMMAR,
            LOG_TYPE_PRONUNCIATION,
        ],
    },
];

/// Look up a template by id.
pub fn find_template(id: &str) -> Option<&'static PlanTemplate> {
    PLAN_TEMPLATES.iter().find(|t| t.id == id)
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Input to plan generation, after template resolution.
#[derive(Debug, Clone)]
pub struct PlanInput {
    pub current_level: i32,
    pub goal_level: i32,
    pub frequency_type: String,
    pub frequency_value: i32,
    pub session_duration_minutes: i32,
    pub preferred_styles: Vec<String>,
}

/// Minutes allocated to one study style within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleAllocation {
    pub style: String,
    pub minutes: i32,
}

/// A generated plan ready for persistence.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPlan {
    pub user_level: i32,
    pub goal_level: i32,
    pub estimated_days: i32,
    pub frequency_description: String,
    pub total_session_duration: i32,
    pub time_distribution: Vec<StyleAllocation>,
    pub plan_summary: String,
}

/// Study goals derived from a plan's time distribution. Stored as a JSON
/// document on the user row and read back by progress statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningGoals {
    /// Conversation goal in minutes.
    pub conversation_goal: i32,
    /// Grammar goal as a practice count.
    pub grammar_goal: i32,
    /// Pronunciation goal as a practice count.
    pub pronunciation_goal: i32,
    pub created_at: Timestamp,
}

/// Validate the parts of a [`PlanInput`] that come from the client.
pub fn validate_plan_input(input: &PlanInput) -> Result<(), CoreError> {
    if !VALID_FREQUENCY_TYPES.contains(&input.frequency_type.as_str()) {
        return Err(CoreError::Validation(format!(
            "Invalid frequency type '{}'. Must be one of: {}",
            input.frequency_type,
            VALID_FREQUENCY_TYPES.join(", ")
        )));
    }
    if input.frequency_value < 1 {
        return Err(CoreError::Validation(
            "Frequency value must be at least 1".into(),
        ));
    }
    if input.session_duration_minutes < MIN_SESSION_MINUTES
        || input.session_duration_minutes > MAX_SESSION_MINUTES
    {
        return Err(CoreError::Validation(format!(
            "Session duration must be between {MIN_SESSION_MINUTES} and {MAX_SESSION_MINUTES} minutes"
        )));
    }
    if input.preferred_styles.is_empty() {
        return Err(CoreError::Validation(
            "At least one preferred style is required".into(),
        ));
    }
    for style in &input.preferred_styles {
        if !VALID_STYLES.contains(&style.as_str()) {
            return Err(CoreError::Validation(format!(
                "Invalid study style '{style}'. Must be one of: {}",
                VALID_STYLES.join(", ")
            )));
        }
    }
    Ok(())
}

/// Estimate the number of days the plan will take.
///
/// Base of 30 days, +10 per level of gap, adjusted down for more frequent
/// daily sessions and up for longer gaps between interval sessions, and
/// down for longer sessions. Floored at [`MIN_ESTIMATED_DAYS`].
pub fn estimated_days(
    current_level: i32,
    goal_level: i32,
    frequency_type: &str,
    frequency_value: i32,
    session_minutes: i32,
) -> i32 {
    let level_diff = (goal_level - current_level) as f64;
    let freq_adjust = if frequency_type == FREQUENCY_DAILY {
        frequency_value as f64 * -5.0
    } else {
        frequency_value as f64 * 5.0
    };
    let raw = 30.0 + level_diff * 10.0 + freq_adjust + session_minutes as f64 * -0.5;
    (raw.trunc() as i32).max(MIN_ESTIMATED_DAYS)
}

/// Split a session's minutes evenly across the preferred styles.
///
/// The integer remainder goes to the first style so the parts always sum
/// to the session duration.
pub fn distribute_session_time(total_minutes: i32, styles: &[String]) -> Vec<StyleAllocation> {
    if styles.is_empty() {
        return Vec::new();
    }
    let n = styles.len() as i32;
    let share = total_minutes / n;
    let remainder = total_minutes % n;

    styles
        .iter()
        .enumerate()
        .map(|(i, style)| StyleAllocation {
            style: style.clone(),
            minutes: if i == 0 { share + remainder } else { share },
        })
        .collect()
}

/// Derive study goals from a per-session time distribution.
///
/// Conversation keeps its minutes; grammar and pronunciation convert ten
/// minutes into one practice item.
pub fn derive_goals(distribution: &[StyleAllocation], now: Timestamp) -> LearningGoals {
    let minutes_for = |style: &str| {
        distribution
            .iter()
            .find(|a| a.style == style)
            .map(|a| a.minutes)
            .unwrap_or(0)
    };

    LearningGoals {
        conversation_goal: minutes_for(LOG_TYPE_CONVERSATION),
        grammar_goal: minutes_for(LOG_TYPE_GRAMMAR) / 10,
        pronunciation_goal: minutes_for(LOG_TYPE_PRONUNCIATION) / 10,
        created_at: now,
    }
}

/// Human-readable frequency label.
pub fn frequency_description(frequency_type: &str, frequency_value: i32) -> String {
    if frequency_type == FREQUENCY_DAILY {
        format!("{frequency_value}x per day")
    } else {
        format!("every {frequency_value} days")
    }
}

/// Build the full plan from validated input.
pub fn generate_plan(input: &PlanInput) -> Result<GeneratedPlan, CoreError> {
    validate_plan_input(input)?;

    let days = estimated_days(
        input.current_level,
        input.goal_level,
        &input.frequency_type,
        input.frequency_value,
        input.session_duration_minutes,
    );
    let distribution =
        distribute_session_time(input.session_duration_minutes, &input.preferred_styles);
    let freq_desc = frequency_description(&input.frequency_type, input.frequency_value);

    let plan_summary = format!(
        "Level {} to {} in about {} days, {}, {} minutes per session",
        input.current_level, input.goal_level, days, freq_desc, input.session_duration_minutes
    );

    Ok(GeneratedPlan {
        user_level: input.current_level,
        goal_level: input.goal_level,
        estimated_days: days,
        frequency_description: freq_desc,
        total_session_duration: input.session_duration_minutes,
        time_distribution: distribution,
        plan_summary,
    })
}

/// Serialize a time distribution as the `{style: minutes}` JSON object
/// stored in the `learning_plans` table.
pub fn distribution_to_json(distribution: &[StyleAllocation]) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for alloc in distribution {
        map.insert(alloc.style.clone(), serde_json::json!(alloc.minutes));
    }
    serde_json::Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(styles: &[&str]) -> PlanInput {
        PlanInput {
            current_level: 2,
            goal_level: 4,
            frequency_type: FREQUENCY_DAILY.to_string(),
            frequency_value: 1,
            session_duration_minutes: 30,
            preferred_styles: styles.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn estimated_days_never_below_floor() {
        // Large session + daily frequency pushes the raw estimate below 7.
        let days = estimated_days(5, 5, FREQUENCY_DAILY, 3, 120);
        assert_eq!(days, MIN_ESTIMATED_DAYS);
    }

    #[test]
    fn estimated_days_daily_vs_interval() {
        let daily = estimated_days(1, 3, FREQUENCY_DAILY, 2, 30);
        let interval = estimated_days(1, 3, FREQUENCY_INTERVAL, 2, 30);
        // 30 + 20 - 10 - 15 = 25 vs 30 + 20 + 10 - 15 = 45.
        assert_eq!(daily, 25);
        assert_eq!(interval, 45);
    }

    #[test]
    fn distribution_sums_to_total_with_remainder_on_first() {
        let styles: Vec<String> = vec![
            LOG_TYPE_CONVERSATION.into(),
            LOG_TYPE_GRAMMAR.into(),
            LOG_TYPE_PRONUNCIATION.into(),
        ];
        let dist = distribute_session_time(50, &styles);
        assert_eq!(dist.len(), 3);
        assert_eq!(dist[0].minutes, 18); // 16 + remainder 2
        assert_eq!(dist[1].minutes, 16);
        assert_eq!(dist[2].minutes, 16);
        assert_eq!(dist.iter().map(|a| a.minutes).sum::<i32>(), 50);
    }

    #[test]
    fn goals_follow_distribution() {
        let dist = vec![
            StyleAllocation {
                style: LOG_TYPE_CONVERSATION.into(),
                minutes: 20,
            },
            StyleAllocation {
                style: LOG_TYPE_GRAMMAR.into(),
                minutes: 25,
            },
        ];
        let goals = derive_goals(&dist, chrono::Utc::now());
        assert_eq!(goals.conversation_goal, 20);
        assert_eq!(goals.grammar_goal, 2);
        assert_eq!(goals.pronunciation_goal, 0);
    }

    #[test]
    fn generate_plan_rejects_unknown_style() {
        let bad = input(&["meditation"]);
        assert!(generate_plan(&bad).is_err());
    }

    #[test]
    fn generate_plan_rejects_out_of_range_duration() {
        let mut bad = input(&[LOG_TYPE_CONVERSATION]);
        bad.session_duration_minutes = 5;
        assert!(generate_plan(&bad).is_err());
        bad.session_duration_minutes = 121;
        assert!(generate_plan(&bad).is_err());
    }

    #[test]
    fn generate_plan_produces_consistent_output() {
        let plan = generate_plan(&input(&[LOG_TYPE_CONVERSATION, LOG_TYPE_GRAMMAR]))
            .expect("valid input");
        assert_eq!(plan.total_session_duration, 30);
        assert_eq!(plan.time_distribution.len(), 2);
        assert_eq!(
            plan.time_distribution
                .iter()
                .map(|a| a.minutes)
                .sum::<i32>(),
            30
        );
        assert!(plan.plan_summary.contains("Level 2 to 4"));
    }

    #[test]
    fn distribution_serializes_as_style_map() {
        let dist = vec![
            StyleAllocation {
                style: LOG_TYPE_GRAMMAR.into(),
                minutes: 15,
            },
            StyleAllocation {
                style: LOG_TYPE_PRONUNCIATION.into(),
                minutes: 15,
            },
        ];
        let json = distribution_to_json(&dist);
        assert_eq!(json[LOG_TYPE_GRAMMAR], 15);
        assert_eq!(json[LOG_TYPE_PRONUNCIATION], 15);
        assert!(json.get(LOG_TYPE_CONVERSATION).is_none());
    }

    #[test]
    fn templates_are_well_formed() {
        assert_eq!(PLAN_TEMPLATES.len(), 3);
        for template in PLAN_TEMPLATES {
            assert!(!template.preferred_styles.is_empty());
            assert!(template.session_duration_minutes >= MIN_SESSION_MINUTES);
            assert!(template.session_duration_minutes <= MAX_SESSION_MINUTES);
        }
        assert!(find_template("toeic_master").is_some());
        assert!(find_template("nope").is_none());
    }
}
