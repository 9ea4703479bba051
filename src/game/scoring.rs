//! Score formula.
//!
//! `score = round(card_count² / (seconds × attempts) × 1000)`
//!
//! Faster games with fewer attempts on larger decks score higher.

use std::time::Duration;

/// Shortest duration the formula will divide by.
pub const MIN_SCORING_DURATION: Duration = Duration::from_millis(1);

/// Compute the score of a finished game.
///
/// `duration` is clamped to [`MIN_SCORING_DURATION`] and `attempts` to at
/// least one so the division is always defined.
///
/// ```
/// use std::time::Duration;
/// use memory_match::game::calculate_score;
///
/// assert_eq!(calculate_score(4, Duration::from_secs(10), 2), 800);
/// assert_eq!(calculate_score(4, Duration::from_secs(10), 3), 533);
/// ```
#[must_use]
pub fn calculate_score(card_count: usize, duration: Duration, attempts: u32) -> u64 {
    let seconds = duration.max(MIN_SCORING_DURATION).as_secs_f64();
    let attempts = f64::from(attempts.max(1));
    let cards = card_count as f64;

    (cards * cards / (seconds * attempts) * 1000.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scores() {
        assert_eq!(calculate_score(4, Duration::from_secs(10), 2), 800);
        assert_eq!(calculate_score(10, Duration::from_secs(20), 5), 1000);
        assert_eq!(calculate_score(4, Duration::from_secs(20), 2), 400);
        assert_eq!(calculate_score(4, Duration::from_secs(10), 3), 533);
    }

    #[test]
    fn test_rounds_to_nearest() {
        // 16 / (3 * 1) * 1000 = 5333.33
        assert_eq!(calculate_score(4, Duration::from_secs(3), 1), 5333);
        // 16 / (6 * 1) * 1000 = 2666.67
        assert_eq!(calculate_score(4, Duration::from_secs(6), 1), 2667);
    }

    #[test]
    fn test_zero_duration_is_clamped() {
        let score = calculate_score(4, Duration::ZERO, 2);
        assert_eq!(score, calculate_score(4, MIN_SCORING_DURATION, 2));
        assert_eq!(score, 8_000_000);
    }

    #[test]
    fn test_zero_attempts_treated_as_one() {
        assert_eq!(
            calculate_score(4, Duration::from_secs(10), 0),
            calculate_score(4, Duration::from_secs(10), 1)
        );
    }

    #[test]
    fn test_more_time_scores_less() {
        let fast = calculate_score(12, Duration::from_secs(30), 8);
        let slow = calculate_score(12, Duration::from_secs(60), 8);
        assert!(fast > slow);
    }
}
