use guess_types::{GameState, TimelineEntry};

use crate::scoring::MAX_GUESSES;

const HIT: &str = "🟩";
const MISS: &str = "🟥";
const UNUSED: &str = "⬜";

/// Past guesses in order. Only a winning final guess carries the correct marker.
pub fn build_timeline(state: &GameState) -> Vec<TimelineEntry> {
    let last = state.guesses.len().saturating_sub(1);
    state
        .guesses
        .iter()
        .enumerate()
        .map(|(i, guess)| TimelineEntry {
            guess: guess.clone(),
            attempt: i as i32 + 1,
            correct: state.won && i == last,
        })
        .collect()
}

/// Spoiler-free result grid, available once the game is over.
pub fn share_text(puzzle_number: i32, state: &GameState) -> Option<String> {
    if !state.completed {
        return None;
    }

    let used = state.guesses.len().min(MAX_GUESSES);
    let tally = if state.won {
        format!("{}/{}", used, MAX_GUESSES)
    } else {
        format!("X/{}", MAX_GUESSES)
    };

    let grid: String = (0..MAX_GUESSES)
        .map(|slot| {
            if slot >= used {
                UNUSED
            } else if state.won && slot == used - 1 {
                HIT
            } else {
                MISS
            }
        })
        .collect();

    Some(format!("Subreddit Guess #{} {}\n{}", puzzle_number, tally, grid))
}
