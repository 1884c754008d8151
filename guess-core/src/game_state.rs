use chrono::{DateTime, Utc};
use guess_types::{GameError, GameState};

use crate::scoring::{MAX_GUESSES, ScoringEngine};

/// Result of applying one guess to a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessOutcome {
    pub correct: bool,
    /// True only for the guess that moved the game into its completed state.
    pub completed_now: bool,
    pub score: i32,
}

/// Removes a leading `r/` or `/r/` marker, keeping the original case.
pub fn strip_subreddit_prefix(input: &str) -> &str {
    let trimmed = input.trim();
    let without_slash = trimmed.strip_prefix('/').unwrap_or(trimmed);
    match without_slash.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("r/") => without_slash[2..].trim(),
        _ if without_slash.is_empty() => without_slash,
        _ => trimmed,
    }
}

/// Comparison form of a subreddit name.
pub fn normalize_subreddit(input: &str) -> String {
    strip_subreddit_prefix(input).to_lowercase()
}

pub fn is_correct_guess(guess: &str, answer: &str) -> bool {
    normalize_subreddit(guess) == normalize_subreddit(answer)
}

pub fn guesses_remaining(state: &GameState) -> usize {
    MAX_GUESSES.saturating_sub(state.guesses.len())
}

/// Validates and records a guess, completing the game when it is correct or the last one.
///
/// On error the state is left untouched.
pub fn apply_guess(
    state: &mut GameState,
    guess: &str,
    answer: &str,
    now: DateTime<Utc>,
) -> Result<GuessOutcome, GameError> {
    let stripped = strip_subreddit_prefix(guess);
    if stripped.is_empty() {
        return Err(GameError::EmptyGuess);
    }
    if state.completed {
        return Err(GameError::GameAlreadyCompleted);
    }
    if state.guesses.len() >= MAX_GUESSES {
        return Err(GameError::NoGuessesRemaining {
            max_guesses: MAX_GUESSES as u32,
        });
    }

    let correct = is_correct_guess(stripped, answer);
    state.guesses.push(stripped.to_string());

    let completed_now = correct || state.guesses.len() == MAX_GUESSES;
    if completed_now {
        state.completed = true;
        state.won = correct;
        state.score = ScoringEngine::score_for(state.guesses.len(), correct);
        state.completed_at = Some(now.to_rfc3339());
        tracing::debug!(
            "Game completed after {} guesses (won: {}, score: {})",
            state.guesses.len(),
            correct,
            state.score
        );
    }

    Ok(GuessOutcome {
        correct,
        completed_now,
        score: state.score,
    })
}
