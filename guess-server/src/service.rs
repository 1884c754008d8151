use std::sync::{Arc, LazyLock};

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

use guess_core::{
    SUBREDDITS, apply_guess, build_timeline, date_key, filter_subreddits, guesses_remaining,
    parse_date_key, puzzle_date, revealed_clues, share_text, strip_subreddit_prefix,
};
use guess_persistence::KeyValueStore;
use guess_persistence::repositories::{
    GameRepository, LeaderboardRepository, PuzzleRepository, StatsRepository,
};
use guess_types::{
    GameError, GameState, GuessResponse, Identity, InitResponse, LeaderboardResponse,
    PublicPuzzle, Puzzle, PuzzlePayload, PuzzleResponse, PuzzleSetResponse, ResetResponse,
    StatsResponse, SubredditsResponse,
};

use crate::config::Config;
use crate::errors::ApiError;
use crate::puzzle_source::{PuzzleFeed, PuzzleSource};

static SUBREDDIT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_]{1,20}$").expect("valid regex"));

static DATE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Source of the current time, swappable in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Game state, clues and presentation for one player's view of a puzzle.
struct GameView {
    puzzle: PublicPuzzle,
    game_state: GameState,
    clues: Vec<guess_types::RevealedClue>,
    timeline: Vec<guess_types::TimelineEntry>,
    share_text: Option<String>,
}

impl GameView {
    fn new(puzzle: &Puzzle, date: &str, game_state: GameState) -> Self {
        GameView {
            puzzle: PublicPuzzle::new(puzzle, date, game_state.completed),
            clues: revealed_clues(&puzzle.clues, game_state.guesses.len()),
            timeline: build_timeline(&game_state),
            share_text: share_text(puzzle.puzzle_number, &game_state),
            game_state,
        }
    }
}

pub struct GameService {
    source: PuzzleSource,
    puzzles: PuzzleRepository,
    games: GameRepository,
    stats: StatsRepository,
    leaderboard: LeaderboardRepository,
    clock: Arc<dyn Clock>,
    leaderboard_size: u64,
    admin_users: Vec<String>,
}

impl GameService {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        feed: Option<Arc<dyn PuzzleFeed>>,
        config: &Config,
    ) -> Self {
        Self {
            source: PuzzleSource::new(store.clone(), feed, config.use_fallback),
            puzzles: PuzzleRepository::new(store.clone()),
            games: GameRepository::new(store.clone()),
            stats: StatsRepository::new(store.clone()),
            leaderboard: LeaderboardRepository::new(store),
            clock: Arc::new(SystemClock),
            leaderboard_size: config.leaderboard_size,
            admin_users: config.admin_users.clone(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn today(&self) -> (DateTime<Utc>, NaiveDate, String) {
        let now = self.clock.now();
        let today = puzzle_date(now);
        (now, today, date_key(today))
    }

    async fn load_puzzle(&self, date: &str) -> Result<Puzzle, ApiError> {
        self.source
            .load(date)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("No puzzle available for {}", date)))
    }

    fn ensure_admin(&self, identity: &Identity) -> Result<(), ApiError> {
        let allowed = self
            .admin_users
            .iter()
            .any(|admin| admin == &identity.user_id || admin == &identity.username);
        if !allowed {
            tracing::warn!("Rejected admin request from {}", identity.user_id);
            return Err(ApiError::Forbidden("Admin access required".to_string()));
        }
        Ok(())
    }

    pub async fn init(&self, identity: &Identity) -> Result<InitResponse, ApiError> {
        let (_, _, date) = self.today();
        let puzzle = self.load_puzzle(&date).await?;
        let game_state = self.games.find_or_create(&identity.user_id, &date).await?;
        let stats = self.stats.find(&identity.user_id).await?;
        let view = GameView::new(&puzzle, &date, game_state);

        Ok(InitResponse {
            username: identity.username.clone(),
            puzzle: view.puzzle,
            game_state: view.game_state,
            clues: view.clues,
            timeline: view.timeline,
            stats,
            share_text: view.share_text,
        })
    }

    pub async fn puzzle(&self, identity: &Identity) -> Result<PuzzleResponse, ApiError> {
        let (_, _, date) = self.today();
        let puzzle = self.load_puzzle(&date).await?;
        let game_state = self.games.find_or_create(&identity.user_id, &date).await?;
        let view = GameView::new(&puzzle, &date, game_state);

        Ok(PuzzleResponse {
            puzzle: view.puzzle,
            game_state: view.game_state,
            clues: view.clues,
            timeline: view.timeline,
            share_text: view.share_text,
        })
    }

    /// Records a guess for today's puzzle.
    ///
    /// Stats and the leaderboard are only touched by the request whose write completed the game.
    pub async fn submit_guess(
        &self,
        identity: &Identity,
        guess: &str,
    ) -> Result<GuessResponse, ApiError> {
        if strip_subreddit_prefix(guess).is_empty() {
            return Err(GameError::EmptyGuess.into());
        }

        let (now, today, date) = self.today();
        let puzzle = self.load_puzzle(&date).await?;
        let answer = puzzle.correct_subreddit.clone();

        let (game_state, outcome) = self
            .games
            .update(&identity.user_id, &date, |state| {
                apply_guess(state, guess, &answer, now)
            })
            .await??;

        tracing::debug!(
            "User {} guessed {:?} for {} (correct: {})",
            identity.user_id,
            guess,
            date,
            outcome.correct
        );

        if outcome.completed_now {
            let stats = self
                .stats
                .record_completion(&identity.user_id, game_state.won, game_state.score, today)
                .await?;
            if game_state.won {
                self.leaderboard
                    .record_win(
                        &date,
                        &identity.user_id,
                        &identity.username,
                        game_state.score,
                        now,
                    )
                    .await?;
            }
            tracing::info!(
                "User {} finished puzzle #{} (won: {}, score: {}, streak: {})",
                identity.user_id,
                puzzle.puzzle_number,
                game_state.won,
                game_state.score,
                stats.current_streak
            );
        }

        let status = game_state.status();
        let remaining = guesses_remaining(&game_state) as u32;
        let view = GameView::new(&puzzle, &date, game_state);
        Ok(GuessResponse {
            correct: outcome.correct,
            status,
            guesses_remaining: remaining,
            answer: view.puzzle.correct_subreddit,
            game_state: view.game_state,
            clues: view.clues,
            timeline: view.timeline,
            share_text: view.share_text,
        })
    }

    pub async fn leaderboard(&self, identity: &Identity) -> Result<LeaderboardResponse, ApiError> {
        let (_, _, date) = self.today();
        let entries = self.leaderboard.top(&date, self.leaderboard_size).await?;

        let user_rank = match entries.iter().find(|e| e.user_id == identity.user_id) {
            Some(entry) => Some(entry.rank),
            None => self.leaderboard.rank_of(&date, &identity.user_id).await?,
        };

        Ok(LeaderboardResponse {
            date,
            entries,
            user_rank,
        })
    }

    pub async fn stats(&self, identity: &Identity) -> Result<StatsResponse, ApiError> {
        Ok(StatsResponse {
            stats: self.stats.find(&identity.user_id).await?,
        })
    }

    pub fn suggestions(&self, query: &str) -> SubredditsResponse {
        SubredditsResponse {
            suggestions: filter_subreddits(query, SUBREDDITS)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Stores a puzzle for a date (today when absent), keeping the date's existing number.
    pub async fn set_puzzle(
        &self,
        identity: &Identity,
        payload: PuzzlePayload,
    ) -> Result<PuzzleSetResponse, ApiError> {
        self.ensure_admin(identity)?;

        let date = match payload.date.as_deref().map(str::trim) {
            Some(date) if !date.is_empty() => validate_date(date)?,
            _ => self.today().2,
        };

        if payload.post_title.trim().is_empty() {
            return Err(ApiError::BadRequest("postTitle must not be empty".to_string()));
        }
        let subreddit = strip_subreddit_prefix(&payload.correct_subreddit).to_string();
        if !SUBREDDIT_NAME.is_match(&subreddit) {
            return Err(ApiError::BadRequest(format!(
                "Invalid subreddit name: {}",
                payload.correct_subreddit
            )));
        }

        let requested_number = payload.puzzle_number.filter(|n| *n > 0);
        let mut puzzle = payload.into_puzzle();
        puzzle.correct_subreddit = subreddit;
        puzzle.puzzle_number = match requested_number {
            Some(number) => number,
            None => match self.puzzles.find_by_date(&date).await? {
                Some(existing) if existing.puzzle_number > 0 => existing.puzzle_number,
                _ => self.puzzles.next_puzzle_number().await?,
            },
        };

        self.puzzles.save(&date, &puzzle).await?;
        tracing::info!(
            "Admin {} set puzzle #{} for {}",
            identity.user_id,
            puzzle.puzzle_number,
            date
        );

        Ok(PuzzleSetResponse {
            date,
            puzzle_number: puzzle.puzzle_number,
        })
    }

    /// Clears the caller's game for today. Stats and leaderboard entries are kept.
    pub async fn reset(&self, identity: &Identity) -> Result<ResetResponse, ApiError> {
        let (_, _, date) = self.today();
        self.games.delete(&identity.user_id, &date).await?;
        tracing::info!("User {} reset their game for {}", identity.user_id, date);
        Ok(ResetResponse { date })
    }

    /// Drops today's stored puzzle and loads it again through the normal source chain.
    pub async fn refresh_puzzle(&self, identity: &Identity) -> Result<PuzzleSetResponse, ApiError> {
        self.ensure_admin(identity)?;

        let (_, _, date) = self.today();
        self.puzzles.delete(&date).await?;
        let puzzle = self.load_puzzle(&date).await?;
        tracing::info!(
            "Admin {} refreshed puzzle for {} (now #{})",
            identity.user_id,
            date,
            puzzle.puzzle_number
        );

        Ok(PuzzleSetResponse {
            date,
            puzzle_number: puzzle.puzzle_number,
        })
    }
}

fn validate_date(date: &str) -> Result<String, ApiError> {
    if !DATE_KEY.is_match(date) {
        return Err(ApiError::BadRequest(format!(
            "Invalid date {}, expected YYYY-MM-DD",
            date
        )));
    }
    let parsed = parse_date_key(date)
        .map_err(|_| ApiError::BadRequest(format!("Invalid date {}", date)))?;
    Ok(date_key(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date() {
        assert_eq!(validate_date("2024-05-01").unwrap(), "2024-05-01");
        assert!(validate_date("2024-5-1").is_err());
        assert!(validate_date("2024-02-30").is_err());
        assert!(validate_date("tomorrow").is_err());
    }

    #[test]
    fn test_subreddit_name_pattern() {
        assert!(SUBREDDIT_NAME.is_match("AskReddit"));
        assert!(SUBREDDIT_NAME.is_match("explainlikeimfive"));
        assert!(SUBREDDIT_NAME.is_match("Damnthatsinteresting"));
        assert!(!SUBREDDIT_NAME.is_match("a"));
        assert!(!SUBREDDIT_NAME.is_match("has space"));
        assert!(!SUBREDDIT_NAME.is_match("_leading"));
    }
}
