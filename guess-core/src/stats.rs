use chrono::NaiveDate;
use guess_types::UserStats;

use crate::calendar::{date_key, previous_day};

/// Folds a completed game into a player's lifetime stats.
pub fn record_completion(stats: &mut UserStats, won: bool, score: i32, today: NaiveDate) {
    stats.games_played += 1;
    stats.total_score += score;

    if !won {
        stats.current_streak = 0;
        return;
    }

    let today_key = date_key(today);
    let yesterday_key = date_key(previous_day(today));
    match stats.last_win_date.as_deref() {
        Some(last) if last == yesterday_key => stats.current_streak += 1,
        // A second win on the same day leaves the streak alone.
        Some(last) if last == today_key => {}
        _ => stats.current_streak = 1,
    }

    stats.longest_streak = stats.longest_streak.max(stats.current_streak);
    stats.last_win_date = Some(today_key);
}
