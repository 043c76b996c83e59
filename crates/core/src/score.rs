//! Score formulas for both game modes.
//!
//! These are the authoritative formulas the backend leaderboard assumes;
//! changing either silently breaks score comparability.

/// Memory-game score: `max(0, pairs*100 - moves*5 - seconds*2)`.
#[must_use]
pub fn memory_score(pairs: u32, moves: u32, seconds: u32) -> u32 {
    let base = i64::from(pairs) * 100;
    let penalty = i64::from(moves) * 5 + i64::from(seconds) * 2;
    u32::try_from((base - penalty).max(0)).unwrap_or(u32::MAX)
}

/// Points for one correct quiz answer: `100 + max(0, 50 - seconds/3)`.
///
/// The speed bonus decays one point every 3 elapsed seconds and floors at 0,
/// so a late correct answer is still worth 100.
#[must_use]
pub fn quiz_answer_points(elapsed_seconds: u32) -> u32 {
    let bonus = 50_u32.saturating_sub(elapsed_seconds / 3);
    100 + bonus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_score_reference_case() {
        // 6*100 - 10*5 - 30*2 = 490
        assert_eq!(memory_score(6, 10, 30), 490);
    }

    #[test]
    fn memory_score_without_penalties_is_base() {
        assert_eq!(memory_score(6, 0, 0), 600);
        assert_eq!(memory_score(12, 0, 0), 1200);
    }

    #[test]
    fn memory_score_floors_at_zero() {
        assert_eq!(memory_score(6, 1000, 1000), 0);
        assert_eq!(memory_score(0, 0, 1), 0);
    }

    #[test]
    fn quiz_points_decay_every_three_seconds() {
        assert_eq!(quiz_answer_points(0), 150);
        assert_eq!(quiz_answer_points(2), 150);
        assert_eq!(quiz_answer_points(3), 149);
        assert_eq!(quiz_answer_points(9), 147);
    }

    #[test]
    fn quiz_points_never_drop_below_hundred() {
        assert_eq!(quiz_answer_points(150), 100);
        assert_eq!(quiz_answer_points(300), 100);
        assert_eq!(quiz_answer_points(u32::MAX), 100);
    }
}
