use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::UserId;

/// One user's progress against one day's puzzle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GameState {
    pub guesses: Vec<String>,
    pub completed: bool,
    pub won: bool,
    pub score: i32,
    pub completed_at: Option<String>, // ISO 8601 string
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum GameStatus {
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub fn status(&self) -> GameStatus {
        match (self.completed, self.won, self.guesses.is_empty()) {
            (true, true, _) => GameStatus::Won,
            (true, false, _) => GameStatus::Lost,
            (false, _, true) => GameStatus::NotStarted,
            (false, _, false) => GameStatus::InProgress,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ClueKind {
    UpvoteRatio,
    TopComment,
    CommunityStats,
    SidebarRule,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RevealedClue {
    pub kind: ClueKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TimelineEntry {
    pub guess: String,
    pub attempt: i32,
    pub correct: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserStats {
    pub total_score: i32,
    pub games_played: i32,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_win_date: Option<String>, // YYYY-MM-DD
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: UserId,
    pub username: String,
    pub score: i32,
    pub completed_at: String,
}
