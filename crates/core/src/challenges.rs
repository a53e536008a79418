//! Group-challenge domain rules.
//!
//! Challenge types share the study-style labels so a logged practice
//! session can feed the matching challenges directly.

use crate::error::CoreError;
use crate::statistics::{round2, VALID_LOG_TYPES};

/// All valid challenge types. Same labels as the learning-log types.
pub const VALID_CHALLENGE_TYPES: &[&str] = VALID_LOG_TYPES;

/// Submission lifecycle states.
pub const SUBMISSION_STATUS_PENDING: &str = "pending";
pub const SUBMISSION_STATUS_APPROVED: &str = "approved";
pub const SUBMISSION_STATUS_REJECTED: &str = "rejected";

pub const CHALLENGE_TITLE_MIN: usize = 2;
pub const CHALLENGE_TITLE_MAX: usize = 100;
pub const CHALLENGE_DESCRIPTION_MAX: usize = 500;
pub const DEFAULT_DURATION_DAYS: i32 = 7;

/// Validate the client-supplied fields of a challenge create or update.
pub fn validate_challenge_fields(
    title: &str,
    description: Option<&str>,
    challenge_type: &str,
    target_value: i32,
    duration_days: i32,
) -> Result<(), CoreError> {
    let title_len = title.trim().chars().count();
    if title_len < CHALLENGE_TITLE_MIN || title_len > CHALLENGE_TITLE_MAX {
        return Err(CoreError::Validation(format!(
            "Challenge title must be between {CHALLENGE_TITLE_MIN} and {CHALLENGE_TITLE_MAX} characters"
        )));
    }
    if let Some(desc) = description {
        if desc.chars().count() > CHALLENGE_DESCRIPTION_MAX {
            return Err(CoreError::Validation(format!(
                "Challenge description must be at most {CHALLENGE_DESCRIPTION_MAX} characters"
            )));
        }
    }
    if !VALID_CHALLENGE_TYPES.contains(&challenge_type) {
        return Err(CoreError::Validation(format!(
            "Invalid challenge type '{challenge_type}'. Must be one of: {}",
            VALID_CHALLENGE_TYPES.join(", ")
        )));
    }
    if target_value <= 0 {
        return Err(CoreError::Validation(
            "Challenge target must be greater than zero".into(),
        ));
    }
    if duration_days <= 0 {
        return Err(CoreError::Validation(
            "Challenge duration must be at least one day".into(),
        ));
    }
    Ok(())
}

/// Validate a progress increment before it is applied.
pub fn validate_progress_delta(value: i32) -> Result<(), CoreError> {
    if value <= 0 {
        return Err(CoreError::Validation(
            "Progress value must be greater than zero".into(),
        ));
    }
    Ok(())
}

/// Completion percentage for a participant, rounded to two decimals.
/// Progress is clamped at the target so this never exceeds 100.
pub fn progress_percentage(current: i32, target: i32) -> f64 {
    if target <= 0 {
        return 0.0;
    }
    round2(current.min(target) as f64 / target as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::LOG_TYPE_GRAMMAR;

    #[test]
    fn title_bounds() {
        assert!(validate_challenge_fields("a", None, LOG_TYPE_GRAMMAR, 10, 7).is_err());
        assert!(validate_challenge_fields("ab", None, LOG_TYPE_GRAMMAR, 10, 7).is_ok());
        let long = "t".repeat(101);
        assert!(validate_challenge_fields(&long, None, LOG_TYPE_GRAMMAR, 10, 7).is_err());
    }

    #[test]
    fn type_and_target_rules() {
        assert!(validate_challenge_fields("drill", None, "jogging", 10, 7).is_err());
        assert!(validate_challenge_fields("drill", None, LOG_TYPE_GRAMMAR, 0, 7).is_err());
        assert!(validate_challenge_fields("drill", None, LOG_TYPE_GRAMMAR, 10, 0).is_err());
        assert!(validate_challenge_fields("drill", None, LOG_TYPE_GRAMMAR, 10, 7).is_ok());
    }

    #[test]
    fn progress_delta_must_be_positive() {
        assert!(validate_progress_delta(0).is_err());
        assert!(validate_progress_delta(-1).is_err());
        assert!(validate_progress_delta(1).is_ok());
    }

    #[test]
    fn percentage_caps_at_one_hundred() {
        assert_eq!(progress_percentage(5, 10), 50.0);
        assert_eq!(progress_percentage(10, 10), 100.0);
        assert_eq!(progress_percentage(15, 10), 100.0);
        assert_eq!(progress_percentage(1, 3), 33.33);
        assert_eq!(progress_percentage(3, 0), 0.0);
    }
}
