mod common;

use common::*;
use guess_core::{GuessOutcome, build_timeline, record_completion, revealed_clues, share_text};
use guess_types::{GameError, GameState, GameStatus, UserStats};

#[test]
fn test_game_lifecycle_states() {
    let puzzle = create_test_puzzle("offmychest");
    let mut state = GameState::default();
    assert_eq!(state.status(), GameStatus::NotStarted);

    guess_core::apply_guess(&mut state, "confession", &puzzle.correct_subreddit, noon("2024-05-01"))
        .unwrap();
    assert_eq!(state.status(), GameStatus::InProgress);
    assert_eq!(revealed_clues(&puzzle.clues, state.guesses.len()).len(), 1);

    let outcome = guess_core::apply_guess(
        &mut state,
        "r/OffMyChest",
        &puzzle.correct_subreddit,
        noon("2024-05-01"),
    )
    .unwrap();
    assert_eq!(
        outcome,
        GuessOutcome {
            correct: true,
            completed_now: true,
            score: 4
        }
    );
    assert_eq!(state.status(), GameStatus::Won);
    assert_eq!(state.guesses, vec!["confession", "OffMyChest"]);
}

#[test]
fn test_losing_game_reveals_all_clues_and_shares_red_grid() {
    let puzzle = create_test_puzzle("offmychest");
    let state = play(
        &["a", "b", "c", "d", "e"],
        &puzzle.correct_subreddit,
        noon("2024-05-01"),
    );

    assert_eq!(state.status(), GameStatus::Lost);
    assert_eq!(revealed_clues(&puzzle.clues, state.guesses.len()).len(), 4);
    assert!(build_timeline(&state).iter().all(|entry| !entry.correct));
    assert_eq!(
        share_text(puzzle.puzzle_number, &state).unwrap(),
        "Subreddit Guess #42 X/5\n🟥🟥🟥🟥🟥"
    );

    let mut replay = state.clone();
    let result = guess_core::apply_guess(&mut replay, "offmychest", "offmychest", noon("2024-05-01"));
    assert_eq!(result, Err(GameError::GameAlreadyCompleted));
    assert_eq!(replay, state);
}

#[test]
fn test_week_of_play_updates_streaks() {
    let mut stats = UserStats::default();
    let days = [
        ("2024-05-01", true, 5),
        ("2024-05-02", true, 3),
        ("2024-05-03", true, 1),
        ("2024-05-04", false, 0),
        ("2024-05-05", true, 2),
        ("2024-05-07", true, 4),
        ("2024-05-08", true, 5),
    ];

    for (date, won, score) in days {
        record_completion(&mut stats, won, score, day(date));
    }

    assert_eq!(stats.games_played, 7);
    assert_eq!(stats.total_score, 20);
    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.longest_streak, 3);
    assert_eq!(stats.last_win_date.as_deref(), Some("2024-05-08"));
}
