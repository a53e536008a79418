//! Attendance streak computation.

use chrono::NaiveDate;

/// Longest run of consecutive check-in dates.
///
/// Input order does not matter; duplicates count once. Returns zero for an
/// empty history.
pub fn longest_streak(dates: &[NaiveDate]) -> i32 {
    if dates.is_empty() {
        return 0;
    }

    let mut sorted: Vec<NaiveDate> = dates.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut longest = 1;
    let mut current = 1;
    for pair in sorted.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 1;
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(longest_streak(&[]), 0);
    }

    #[test]
    fn single_day_is_a_streak_of_one() {
        assert_eq!(longest_streak(&[d("2026-03-01")]), 1);
    }

    #[test]
    fn finds_longest_run_among_gaps() {
        let dates = vec![
            d("2026-03-01"),
            d("2026-03-02"),
            d("2026-03-04"),
            d("2026-03-05"),
            d("2026-03-06"),
            d("2026-03-10"),
        ];
        assert_eq!(longest_streak(&dates), 3);
    }

    #[test]
    fn unsorted_and_duplicated_input_is_tolerated() {
        let dates = vec![
            d("2026-03-03"),
            d("2026-03-01"),
            d("2026-03-02"),
            d("2026-03-02"),
        ];
        assert_eq!(longest_streak(&dates), 3);
    }
}
