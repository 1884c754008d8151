use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Rule violations when submitting a guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    EmptyGuess,
    GameAlreadyCompleted,
    NoGuessesRemaining { max_guesses: u32 },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::EmptyGuess => write!(f, "Guess must be a non-empty string"),
            GameError::GameAlreadyCompleted => write!(f, "Game already completed"),
            GameError::NoGuessesRemaining { max_guesses } => {
                write!(f, "All {} guesses have been used", max_guesses)
            }
        }
    }
}

impl std::error::Error for GameError {}
