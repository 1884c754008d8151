use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{GameState, GameStatus, LeaderboardEntry, PublicPuzzle, RevealedClue, TimelineEntry, UserStats};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessRequest {
    pub guess: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InitResponse {
    pub username: String,
    pub puzzle: PublicPuzzle,
    pub game_state: GameState,
    pub clues: Vec<RevealedClue>,
    pub timeline: Vec<TimelineEntry>,
    pub stats: UserStats,
    pub share_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PuzzleResponse {
    pub puzzle: PublicPuzzle,
    pub game_state: GameState,
    pub clues: Vec<RevealedClue>,
    pub timeline: Vec<TimelineEntry>,
    pub share_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GuessResponse {
    pub correct: bool,
    pub status: GameStatus,
    pub guesses_remaining: u32,
    pub game_state: GameState,
    pub clues: Vec<RevealedClue>,
    pub timeline: Vec<TimelineEntry>,
    pub answer: Option<String>,
    pub share_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LeaderboardResponse {
    pub date: String,
    pub entries: Vec<LeaderboardEntry>,
    pub user_rank: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StatsResponse {
    pub stats: UserStats,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SubredditsResponse {
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PuzzleSetResponse {
    pub date: String,
    pub puzzle_number: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ResetResponse {
    pub date: String,
}

/// Every JSON body the API returns, discriminated by `type`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum ApiResponse {
    Init(InitResponse),
    Puzzle(PuzzleResponse),
    Guess(GuessResponse),
    Leaderboard(LeaderboardResponse),
    Stats(StatsResponse),
    Subreddits(SubredditsResponse),
    PuzzleSet(PuzzleSetResponse),
    Reset(ResetResponse),
    PuzzleRefreshed(PuzzleSetResponse),
    Error { message: String },
}
