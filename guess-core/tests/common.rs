#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use guess_core::parse_date_key;
use guess_types::{Clues, GameState, Puzzle};

/// Creates a puzzle with a known answer
pub fn create_test_puzzle(answer: &str) -> Puzzle {
    Puzzle {
        post_title: "I finally told my roommate about the [REDACTED]".to_string(),
        post_body: "It has been going on for months.".to_string(),
        correct_subreddit: answer.to_string(),
        clues: Clues {
            upvote_ratio: "91% upvoted".to_string(),
            top_comment: "\"You did the right thing\"".to_string(),
            community_stats: "8.1M members, founded 2013".to_string(),
            sidebar_rule: "Rule 1: Be civil".to_string(),
        },
        puzzle_number: 42,
    }
}

/// Noon UTC on the given day
pub fn noon(date: &str) -> DateTime<Utc> {
    let day = day(date);
    Utc.from_utc_datetime(&day.and_hms_opt(12, 0, 0).unwrap())
}

pub fn day(date: &str) -> NaiveDate {
    parse_date_key(date).unwrap()
}

/// Plays a full game, returning the final state
pub fn play(guesses: &[&str], answer: &str, at: DateTime<Utc>) -> GameState {
    let mut state = GameState::default();
    for guess in guesses {
        guess_core::apply_guess(&mut state, guess, answer, at).unwrap();
    }
    state
}
