//! Pronunciation score aggregation.

use crate::statistics::round2;

/// Window size for the improvement comparison. The metric compares the
/// latest window against the one before it.
pub const IMPROVEMENT_WINDOW: usize = 5;

/// Mean of a score list, rounded to two decimals. Zero when empty.
pub fn average_score(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    round2(scores.iter().sum::<f64>() / scores.len() as f64)
}

/// Difference between the latest five scores and the five before them.
///
/// `scores` must be ordered newest first. Returns `None` until at least
/// two full windows exist. Positive means the user is improving.
pub fn recent_improvement(scores: &[f64]) -> Option<f64> {
    if scores.len() < IMPROVEMENT_WINDOW * 2 {
        return None;
    }
    let recent = average_score(&scores[..IMPROVEMENT_WINDOW]);
    let older = average_score(&scores[IMPROVEMENT_WINDOW..IMPROVEMENT_WINDOW * 2]);
    Some(round2(recent - older))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_of_empty_is_zero() {
        assert_eq!(average_score(&[]), 0.0);
    }

    #[test]
    fn average_rounds() {
        assert_eq!(average_score(&[80.0, 85.0, 91.0]), 85.33);
    }

    #[test]
    fn improvement_requires_ten_results() {
        let nine = vec![80.0; 9];
        assert_eq!(recent_improvement(&nine), None);
    }

    #[test]
    fn improvement_compares_adjacent_windows() {
        // Newest first: five at 90, then five at 80, then noise.
        let mut scores = vec![90.0; 5];
        scores.extend(vec![80.0; 5]);
        scores.extend(vec![10.0; 3]);
        assert_eq!(recent_improvement(&scores), Some(10.0));
    }

    #[test]
    fn improvement_can_be_negative() {
        let mut scores = vec![70.0; 5];
        scores.extend(vec![85.0; 5]);
        assert_eq!(recent_improvement(&scores), Some(-15.0));
    }
}
