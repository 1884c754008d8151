
use std::sync::Arc;

use guess_persistence::repositories::PuzzleRepository;
use guess_server::errors::ApiError;
use guess_server::puzzle_source::fallback_puzzle;
use guess_types::{ClueKind, GameStatus};
use test_helpers::*;

#[tokio::test]
async fn test_init_creates_game_and_hides_answer() {
    let setup = TestSetup::new().await;
    let alice = create_test_user("Alice");

    let init = setup.service().init(&alice).await.unwrap();
    assert_eq!(init.username, "Alice");
    assert_eq!(init.puzzle.date, TODAY);
    assert_eq!(init.puzzle.puzzle_number, 1);
    assert_eq!(init.puzzle.correct_subreddit, None);
    assert_eq!(init.game_state.status(), GameStatus::NotStarted);
    assert!(init.clues.is_empty());
    assert!(init.timeline.is_empty());
    assert_eq!(init.stats.games_played, 0);
    assert_eq!(init.share_text, None);
}

#[tokio::test]
async fn test_correct_first_guess_scores_five() {
    let setup = TestSetup::new().await;
    let alice = create_test_user("Alice");
    let service = setup.service();

    let response = service.submit_guess(&alice, "AskReddit").await.unwrap();
    assert!(response.correct);
    assert!(response.game_state.completed);
    assert!(response.game_state.won);
    assert_eq!(response.game_state.score, 5);
    assert_eq!(response.answer.as_deref(), Some(ANSWER));
    assert_eq!(
        response.share_text.as_deref(),
        Some("Subreddit Guess #1 1/5\n🟩⬜⬜⬜⬜")
    );
    assert_eq!(response.clues.len(), 1);
    assert_eq!(response.timeline.len(), 1);
    assert!(response.timeline[0].correct);

    let stats = service.stats(&alice).await.unwrap().stats;
    assert_eq!(stats.total_score, 5);
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.current_streak, 1);
    assert_eq!(stats.last_win_date.as_deref(), Some(TODAY));

    let board = service.leaderboard(&alice).await.unwrap();
    assert_eq!(board.entries.len(), 1);
    assert_eq!(board.entries[0].username, "Alice");
    assert_eq!(board.user_rank, Some(1));
}

#[tokio::test]
async fn test_five_misses_lose_the_game() {
    let setup = TestSetup::new().await;
    let bob = create_test_user("Bob");
    let service = setup.service();

    let misses = ["pics", "funny", "gaming", "todayilearned"];
    for (i, miss) in misses.iter().enumerate() {
        let response = service.submit_guess(&bob, miss).await.unwrap();
        assert!(!response.correct);
        assert!(!response.game_state.completed);
        assert_eq!(response.answer, None);
        assert_eq!(response.clues.len(), i + 1);
        assert_eq!(response.status, GameStatus::InProgress);
        assert_eq!(response.guesses_remaining as usize, 4 - i);
    }

    let last = service.submit_guess(&bob, "movies").await.unwrap();
    assert!(last.game_state.completed);
    assert!(!last.game_state.won);
    assert_eq!(last.game_state.score, 0);
    assert_eq!(last.game_state.status(), GameStatus::Lost);
    assert_eq!(last.status, GameStatus::Lost);
    assert_eq!(last.guesses_remaining, 0);
    assert_eq!(last.answer.as_deref(), Some(ANSWER));
    assert_eq!(last.clues.len(), 4);
    assert_eq!(last.clues[3].kind, ClueKind::SidebarRule);
    assert_eq!(
        last.share_text.as_deref(),
        Some("Subreddit Guess #1 X/5\n🟥🟥🟥🟥🟥")
    );

    let stats = service.stats(&bob).await.unwrap().stats;
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.current_streak, 0);

    // Losers are not on the board
    let board = service.leaderboard(&bob).await.unwrap();
    assert!(board.entries.is_empty());
    assert_eq!(board.user_rank, None);
}

#[tokio::test]
async fn test_guess_after_completion_is_rejected() {
    let setup = TestSetup::new().await;
    let alice = create_test_user("Alice");
    let service = setup.service();

    service.submit_guess(&alice, "pics").await.unwrap();
    service.submit_guess(&alice, "askreddit").await.unwrap();

    let result = service.submit_guess(&alice, "funny").await;
    match result {
        Err(ApiError::BadRequest(message)) => assert_eq!(message, "Game already completed"),
        other => panic!("Expected BadRequest, got {:?}", other.map(|r| r.game_state)),
    }

    let puzzle = service.puzzle(&alice).await.unwrap();
    assert_eq!(puzzle.game_state.guesses, vec!["pics", "askreddit"]);
    assert_eq!(puzzle.game_state.score, 4);
    assert_eq!(puzzle.puzzle.correct_subreddit.as_deref(), Some(ANSWER));

    let stats = service.stats(&alice).await.unwrap().stats;
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.total_score, 4);
}

#[tokio::test]
async fn test_prefixed_guess_matches() {
    let setup = TestSetup::new().await;
    let alice = create_test_user("Alice");

    let response = setup
        .service()
        .submit_guess(&alice, "  /r/askREDDIT ")
        .await
        .unwrap();
    assert!(response.correct);
    assert_eq!(response.game_state.guesses, vec!["askREDDIT"]);
}

#[tokio::test]
async fn test_empty_guess_is_rejected() {
    let setup = TestSetup::new().await;
    let alice = create_test_user("Alice");
    let service = setup.service();

    for guess in ["", "   ", "r/", "/", "/ "] {
        let result = service.submit_guess(&alice, guess).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    let puzzle = service.puzzle(&alice).await.unwrap();
    assert!(puzzle.game_state.guesses.is_empty());
}

#[tokio::test]
async fn test_leaderboard_orders_by_score_then_time() {
    let setup = TestSetup::new().await;
    let early_two = create_test_user("EarlyTwo");
    let late_one = create_test_user("LateOne");
    let early_one = create_test_user("EarlyOne");
    let fifth = create_test_user("Fifth");

    // Score 4 at 08:00
    let service = setup.service_at(at(TODAY, 8, 0));
    service.submit_guess(&early_two, "pics").await.unwrap();
    service.submit_guess(&early_two, ANSWER).await.unwrap();

    // Score 5 at 20:00
    setup
        .service_at(at(TODAY, 20, 0))
        .submit_guess(&late_one, ANSWER)
        .await
        .unwrap();

    // Score 5 at 09:00
    setup
        .service_at(at(TODAY, 9, 0))
        .submit_guess(&early_one, ANSWER)
        .await
        .unwrap();

    // Score 1 at 21:00, outside the top three
    let service = setup.service_at(at(TODAY, 21, 0));
    for miss in ["pics", "funny", "gaming", "movies"] {
        service.submit_guess(&fifth, miss).await.unwrap();
    }
    service.submit_guess(&fifth, ANSWER).await.unwrap();

    let board = setup.service().leaderboard(&fifth).await.unwrap();
    let order: Vec<&str> = board.entries.iter().map(|e| e.username.as_str()).collect();
    assert_eq!(order, vec!["EarlyOne", "LateOne", "EarlyTwo"]);
    assert_eq!(board.entries[2].rank, 3);
    assert_eq!(board.entries[2].score, 4);
    assert_eq!(board.user_rank, Some(4));
}

#[tokio::test]
async fn test_streaks_across_days() {
    let setup = TestSetup::new().await;
    let alice = create_test_user("Alice");
    let admin = admin();

    for date in ["2024-05-02", "2024-05-04"] {
        setup
            .service_at(at(TODAY, 1, 0))
            .set_puzzle(&admin, sample_payload("gardening", Some(date)))
            .await
            .unwrap();
    }

    setup.service().submit_guess(&alice, ANSWER).await.unwrap();
    let day_two = setup.service_at(at("2024-05-02", 7, 30));
    day_two.submit_guess(&alice, "gardening").await.unwrap();

    let stats = day_two.stats(&alice).await.unwrap().stats;
    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.longest_streak, 2);

    // Skipped the 3rd
    let day_four = setup.service_at(at("2024-05-04", 7, 30));
    day_four.submit_guess(&alice, "gardening").await.unwrap();

    let stats = day_four.stats(&alice).await.unwrap().stats;
    assert_eq!(stats.current_streak, 1);
    assert_eq!(stats.longest_streak, 2);
    assert_eq!(stats.games_played, 3);
    assert_eq!(stats.last_win_date.as_deref(), Some("2024-05-04"));
}

#[tokio::test]
async fn test_set_puzzle_round_trip() {
    let setup = TestSetup::new().await;
    let admin = admin();
    let service = setup.service();

    let set = service
        .set_puzzle(&admin, sample_payload("r/LifeProTips", Some("2024-06-10")))
        .await
        .unwrap();
    assert_eq!(set.date, "2024-06-10");
    assert_eq!(set.puzzle_number, 2);

    let stored = PuzzleRepository::new(setup.store.clone())
        .find_by_date("2024-06-10")
        .await
        .unwrap()
        .unwrap();
    let expected = sample_payload("LifeProTips", None);
    assert_eq!(stored.post_title, expected.post_title);
    assert_eq!(stored.post_body, expected.post_body);
    assert_eq!(stored.correct_subreddit, "LifeProTips");
    assert_eq!(stored.clues, expected.clues);

    let alice = create_test_user("Alice");
    let later = setup.service_at(at("2024-06-10", 10, 0));
    let view = later.puzzle(&alice).await.unwrap();
    assert_eq!(view.puzzle.post_title, expected.post_title);
    assert_eq!(view.puzzle.puzzle_number, 2);

    let guess = later.submit_guess(&alice, "lifeprotips").await.unwrap();
    assert_eq!(guess.answer.as_deref(), Some("LifeProTips"));
}

#[tokio::test]
async fn test_set_puzzle_keeps_existing_number() {
    let setup = TestSetup::new().await;
    let admin = admin();
    let service = setup.service();

    // Today's puzzle was published as #1 by the setup
    let replaced = service
        .set_puzzle(&admin, sample_payload("tifu", None))
        .await
        .unwrap();
    assert_eq!(replaced.date, TODAY);
    assert_eq!(replaced.puzzle_number, 1);

    let next = service
        .set_puzzle(&admin, sample_payload("tifu", Some("2024-05-02")))
        .await
        .unwrap();
    assert_eq!(next.puzzle_number, 2);
}

#[tokio::test]
async fn test_set_puzzle_validation() {
    let setup = TestSetup::new().await;
    let admin = admin();
    let service = setup.service();

    let bad_subreddit = service
        .set_puzzle(&admin, sample_payload("not a subreddit!", None))
        .await;
    assert!(matches!(bad_subreddit, Err(ApiError::BadRequest(_))));

    let bad_date = service
        .set_puzzle(&admin, sample_payload(ANSWER, Some("05/01/2024")))
        .await;
    assert!(matches!(bad_date, Err(ApiError::BadRequest(_))));

    let mut untitled = sample_payload(ANSWER, None);
    untitled.post_title = "  ".to_string();
    let result = service.set_puzzle(&admin, untitled).await;
    assert!(matches!(result, Err(ApiError::BadRequest(_))));
}

#[tokio::test]
async fn test_admin_routes_require_admin() {
    let setup = TestSetup::new().await;
    let mallory = create_test_user("Mallory");
    let service = setup.service();

    let set = service
        .set_puzzle(&mallory, sample_payload("pics", None))
        .await;
    assert!(matches!(set, Err(ApiError::Forbidden(_))));

    let refresh = service.refresh_puzzle(&mallory).await;
    assert!(matches!(refresh, Err(ApiError::Forbidden(_))));

    // Admins may be listed by username as well
    let mut config = test_config(true);
    config.admin_users = vec!["Mallory".to_string()];
    let service = guess_server::service::GameService::new(setup.store.clone(), None, &config);
    assert!(
        service
            .set_puzzle(&mallory, sample_payload("pics", Some("2024-07-01")))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_reset_clears_only_the_game() {
    let setup = TestSetup::new().await;
    let alice = create_test_user("Alice");
    let service = setup.service();

    service.submit_guess(&alice, ANSWER).await.unwrap();
    let reset = service.reset(&alice).await.unwrap();
    assert_eq!(reset.date, TODAY);

    let puzzle = service.puzzle(&alice).await.unwrap();
    assert_eq!(puzzle.game_state.status(), GameStatus::NotStarted);

    let stats = service.stats(&alice).await.unwrap().stats;
    assert_eq!(stats.games_played, 1);
    let board = service.leaderboard(&alice).await.unwrap();
    assert_eq!(board.user_rank, Some(1));
}

#[tokio::test]
async fn test_refresh_without_feed_serves_fallback() {
    let setup = TestSetup::new().await;
    let service = setup.service();

    let refreshed = service.refresh_puzzle(&admin()).await.unwrap();
    assert_eq!(refreshed.date, TODAY);
    assert_eq!(refreshed.puzzle_number, 0);

    let alice = create_test_user("Alice");
    let view = service.puzzle(&alice).await.unwrap();
    assert_eq!(view.puzzle.post_title, fallback_puzzle().post_title);

    let stored = PuzzleRepository::new(setup.store.clone())
        .find_by_date(TODAY)
        .await
        .unwrap();
    assert_eq!(stored, None);
}

#[tokio::test]
async fn test_missing_puzzle_without_fallback_is_not_found() {
    let setup = TestSetup::empty(false).await;
    let alice = create_test_user("Alice");
    let service = setup.service();

    assert!(matches!(service.init(&alice).await, Err(ApiError::NotFound(_))));
    assert!(matches!(
        service.submit_guess(&alice, ANSWER).await,
        Err(ApiError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_suggestions() {
    let setup = TestSetup::new().await;
    let suggestions = setup.service().suggestions("ask").suggestions;
    assert!(suggestions.contains(&"AskReddit".to_string()));
    assert!(suggestions.len() <= 8);
    assert!(suggestions.iter().all(|s| s.to_lowercase().contains("ask")));
}

#[tokio::test]
async fn test_concurrent_final_guesses_complete_once() {
    let setup = TestSetup::new().await;
    let alice = create_test_user("Alice");
    let service = Arc::new(setup.service());

    for miss in ["pics", "funny", "gaming", "movies"] {
        service.submit_guess(&alice, miss).await.unwrap();
    }

    let attempts = (0..2).map(|_| {
        let service = service.clone();
        let alice = alice.clone();
        tokio::spawn(async move { service.submit_guess(&alice, ANSWER).await })
    });
    let results: Vec<_> = futures::future::join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let accepted = results.iter().filter(|r| r.is_ok()).count();
    let rejected = results
        .iter()
        .filter(|r| matches!(r, Err(ApiError::BadRequest(_))))
        .count();
    assert_eq!(accepted, 1);
    assert_eq!(rejected, 1);

    let puzzle = service.puzzle(&alice).await.unwrap();
    assert_eq!(puzzle.game_state.guesses.len(), 5);
    assert_eq!(puzzle.game_state.score, 1);

    let stats = service.stats(&alice).await.unwrap().stats;
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.total_score, 1);

    let board = service.leaderboard(&alice).await.unwrap();
    assert_eq!(board.entries.len(), 1);
}
