use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The four hints attached to a puzzle, revealed one per wrong guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Clues {
    pub upvote_ratio: String,
    pub top_comment: String,
    pub community_stats: String,
    pub sidebar_rule: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Puzzle {
    pub post_title: String,
    pub post_body: String,
    pub correct_subreddit: String,
    pub clues: Clues,
    #[serde(default)]
    pub puzzle_number: i32,
}

/// Puzzle as served to players. The answer is withheld until their game is over.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PublicPuzzle {
    pub post_title: String,
    pub post_body: String,
    pub puzzle_number: i32,
    pub date: String,
    pub correct_subreddit: Option<String>,
}

impl PublicPuzzle {
    pub fn new(puzzle: &Puzzle, date: &str, reveal_answer: bool) -> Self {
        PublicPuzzle {
            post_title: puzzle.post_title.clone(),
            post_body: puzzle.post_body.clone(),
            puzzle_number: puzzle.puzzle_number,
            date: date.to_string(),
            correct_subreddit: reveal_answer.then(|| puzzle.correct_subreddit.clone()),
        }
    }
}

/// Body of `POST /api/admin/set-puzzle`, also the shape of remote feed documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PuzzlePayload {
    pub post_title: String,
    pub post_body: String,
    pub correct_subreddit: String,
    pub clues: Clues,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub puzzle_number: Option<i32>,
}

impl PuzzlePayload {
    /// Converts into a stored puzzle. A missing number is left at 0 for the caller to assign.
    pub fn into_puzzle(self) -> Puzzle {
        Puzzle {
            post_title: self.post_title,
            post_body: self.post_body,
            correct_subreddit: self.correct_subreddit,
            clues: self.clues,
            puzzle_number: self.puzzle_number.unwrap_or(0),
        }
    }
}
