//! Grammar-session accuracy metrics.

use crate::statistics::round2;

/// Number of most-recent sessions the rolling accuracy window covers.
pub const RECENT_WINDOW: usize = 10;

/// Share of sessions that needed no correction, as a percentage rounded
/// to two decimals. Zero when there are no sessions.
pub fn accuracy(total_count: i64, corrected_count: i64) -> f64 {
    if total_count <= 0 {
        return 0.0;
    }
    let clean = (total_count - corrected_count).max(0);
    round2(clean as f64 / total_count as f64 * 100.0)
}

/// Accuracy over an explicit window of per-session corrected flags.
pub fn accuracy_over(corrected_flags: &[bool]) -> f64 {
    let total = corrected_flags.len() as i64;
    let corrected = corrected_flags.iter().filter(|c| **c).count() as i64;
    accuracy(total, corrected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_handles_empty_history() {
        assert_eq!(accuracy(0, 0), 0.0);
    }

    #[test]
    fn accuracy_rounds_to_two_decimals() {
        assert_eq!(accuracy(3, 1), 66.67);
        assert_eq!(accuracy(4, 0), 100.0);
        assert_eq!(accuracy(4, 4), 0.0);
    }

    #[test]
    fn windowed_accuracy_counts_flags() {
        let flags = [true, false, false, true];
        assert_eq!(accuracy_over(&flags), 50.0);
        assert_eq!(accuracy_over(&[]), 0.0);
    }
}
