use std::cmp::Ordering;

pub const MAX_GUESSES: usize = 5;

/// Points awarded for a win, indexed by number of guesses used minus one.
const SCORE_TABLE: [i32; MAX_GUESSES] = [5, 4, 3, 2, 1];

pub struct ScoringEngine;

impl ScoringEngine {
    /// Score for a finished game. Losses and out-of-range counts score nothing.
    pub fn score_for(guesses_used: usize, won: bool) -> i32 {
        if !won || guesses_used == 0 {
            return 0;
        }
        SCORE_TABLE.get(guesses_used - 1).copied().unwrap_or(0)
    }
}

/// Sort key for a leaderboard entry.
///
/// Higher score first; among equal scores the earlier completion wins.
/// Both parts are kept separately so ordering is exact for any two timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankKey {
    pub score: i32,
    pub completed_at_ms: i64,
}

impl RankKey {
    pub fn new(score: i32, completed_at_ms: i64) -> Self {
        Self {
            score,
            completed_at_ms,
        }
    }
}

impl Ord for RankKey {
    /// `Less` means "ranks higher", so an ascending sort yields leaderboard order.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then(self.completed_at_ms.cmp(&other.completed_at_ms))
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table_for_wins() {
        let scores: Vec<i32> = (1..=5).map(|n| ScoringEngine::score_for(n, true)).collect();
        assert_eq!(scores, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_losses_score_zero() {
        for n in 0..=5 {
            assert_eq!(ScoringEngine::score_for(n, false), 0);
        }
    }

    #[test]
    fn test_out_of_range_counts() {
        assert_eq!(ScoringEngine::score_for(0, true), 0);
        assert_eq!(ScoringEngine::score_for(6, true), 0);
    }

    #[test]
    fn test_higher_score_ranks_first_regardless_of_time() {
        let fast_four = RankKey::new(4, 1_000);
        let slow_five = RankKey::new(5, 9_999_999_999);

        let mut keys = vec![fast_four, slow_five];
        keys.sort();
        assert_eq!(keys, vec![slow_five, fast_four]);
    }

    #[test]
    fn test_earlier_completion_breaks_ties() {
        let early = RankKey::new(3, 1_700_000_000_000);
        // 25 minutes apart, so millisecond wraparound must not matter.
        let late = RankKey::new(3, 1_700_000_000_000 + 1_500_000);

        assert!(early < late);
        let mut keys = vec![late, early];
        keys.sort();
        assert_eq!(keys[0], early);
    }
}
