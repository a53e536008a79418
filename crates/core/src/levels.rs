//! Proficiency level labels and conversions.

/// Score below this percentage places the user at beginner.
pub const INTERMEDIATE_THRESHOLD_PCT: f64 = 40.0;
/// Score below this percentage (and at or above the beginner cutoff)
/// places the user at intermediate.
pub const ADVANCED_THRESHOLD_PCT: f64 = 70.0;

pub const LEVEL_BEGINNER: &str = "beginner";
pub const LEVEL_INTERMEDIATE: &str = "intermediate";
pub const LEVEL_ADVANCED: &str = "advanced";

/// Map a level-test score percentage onto a level label.
pub fn level_for_percentage(percentage: f64) -> &'static str {
    if percentage < INTERMEDIATE_THRESHOLD_PCT {
        LEVEL_BEGINNER
    } else if percentage < ADVANCED_THRESHOLD_PCT {
        LEVEL_INTERMEDIATE
    } else {
        LEVEL_ADVANCED
    }
}

/// Percentage of correct answers, 0.0 when the test had no questions.
pub fn score_percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (correct as f64 / total as f64) * 100.0
}

/// Map a stored level label onto the 1..6 numeric scale used by plan
/// generation. Accepts both CEFR codes (A1..C2) and the assessed labels
/// written by level-test grading. Unknown labels fall back to 1, matching
/// how an unassessed account is treated.
pub fn numeric_level(level: &str) -> i32 {
    match level {
        "A1" | LEVEL_BEGINNER => 1,
        "A2" => 2,
        "B1" | LEVEL_INTERMEDIATE => 3,
        "B2" => 4,
        "C1" | LEVEL_ADVANCED => 5,
        "C2" => 6,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_thresholds_at_boundaries() {
        assert_eq!(level_for_percentage(0.0), LEVEL_BEGINNER);
        assert_eq!(level_for_percentage(39.9), LEVEL_BEGINNER);
        assert_eq!(level_for_percentage(40.0), LEVEL_INTERMEDIATE);
        assert_eq!(level_for_percentage(69.9), LEVEL_INTERMEDIATE);
        assert_eq!(level_for_percentage(70.0), LEVEL_ADVANCED);
        assert_eq!(level_for_percentage(100.0), LEVEL_ADVANCED);
    }

    #[test]
    fn percentage_handles_empty_test() {
        assert_eq!(score_percentage(0, 0), 0.0);
        assert_eq!(score_percentage(7, 10), 70.0);
    }

    #[test]
    fn numeric_level_maps_cefr_codes() {
        assert_eq!(numeric_level("A1"), 1);
        assert_eq!(numeric_level("B2"), 4);
        assert_eq!(numeric_level("C2"), 6);
    }

    #[test]
    fn numeric_level_maps_assessed_labels() {
        assert_eq!(numeric_level(LEVEL_BEGINNER), 1);
        assert_eq!(numeric_level(LEVEL_INTERMEDIATE), 3);
        assert_eq!(numeric_level(LEVEL_ADVANCED), 5);
    }

    #[test]
    fn numeric_level_defaults_to_one() {
        assert_eq!(numeric_level(""), 1);
        assert_eq!(numeric_level("expert"), 1);
    }
}
