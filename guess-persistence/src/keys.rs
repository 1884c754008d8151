//! Store key layout. Dates are UTC `YYYY-MM-DD`.

pub const PUZZLE_NUMBER_KEY: &str = "puzzle:number";

pub fn puzzle_key(date: &str) -> String {
    format!("puzzle:{}", date)
}

pub fn game_key(user_id: &str, date: &str) -> String {
    format!("user:{}:game:{}", user_id, date)
}

pub fn stats_key(user_id: &str) -> String {
    format!("user:{}:stats", user_id)
}

pub fn leaderboard_key(date: &str) -> String {
    format!("leaderboard:{}", date)
}
