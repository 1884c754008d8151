use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::Mutex;

use guess_persistence::KeyValueStore;
use guess_persistence::repositories::PuzzleRepository;
use guess_types::{Clues, Puzzle, PuzzlePayload};

/// Remote source of daily puzzle documents.
#[async_trait]
pub trait PuzzleFeed: Send + Sync {
    /// The document for `date`, or `None` when the feed has nothing usable.
    async fn fetch(&self, date: &str) -> Option<PuzzlePayload>;
}

/// Reads `{base}/{date}.json`, then `{base}/latest.json`.
pub struct HttpPuzzleFeed {
    client: Client,
    base_url: String,
}

impl HttpPuzzleFeed {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_document(&self, name: &str) -> Option<PuzzlePayload> {
        let url = format!("{}/{}", self.base_url, name);
        tracing::debug!("Fetching puzzle document from {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Failed to fetch puzzle from {}: {:?}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!("Puzzle fetch from {} returned status: {}", url, response.status());
            return None;
        }

        match response.json::<PuzzlePayload>().await {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::warn!("Failed to parse puzzle JSON from {}: {:?}", url, e);
                None
            }
        }
    }
}

#[async_trait]
impl PuzzleFeed for HttpPuzzleFeed {
    async fn fetch(&self, date: &str) -> Option<PuzzlePayload> {
        if let Some(payload) = self.fetch_document(&format!("{}.json", date)).await {
            return Some(payload);
        }
        self.fetch_document("latest.json").await
    }
}

/// Built-in puzzle served when nothing else is available. Never persisted.
pub fn fallback_puzzle() -> Puzzle {
    Puzzle {
        post_title: "What's a skill that everyone should learn but most people never do?"
            .to_string(),
        post_body: "I've been thinking about this lately. There are so many basic life skills \
                    that nobody teaches you. What's one you wish more people knew?"
            .to_string(),
        correct_subreddit: "AskReddit".to_string(),
        clues: Clues {
            upvote_ratio: "96% upvoted".to_string(),
            top_comment: "\"Cooking a handful of simple meals from scratch\"".to_string(),
            community_stats: "45M members, founded 2008".to_string(),
            sidebar_rule: "Rule 1: You must post a clear and direct question in the title"
                .to_string(),
        },
        puzzle_number: 0,
    }
}

/// Resolves the puzzle for a date: stored copy, then the remote feed, then the fallback.
pub struct PuzzleSource {
    puzzles: PuzzleRepository,
    feed: Option<Arc<dyn PuzzleFeed>>,
    use_fallback: bool,
    // Held while a feed document is fetched, numbered and stored
    fill_lock: Mutex<()>,
}

impl PuzzleSource {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        feed: Option<Arc<dyn PuzzleFeed>>,
        use_fallback: bool,
    ) -> Self {
        Self {
            puzzles: PuzzleRepository::new(store),
            feed,
            use_fallback,
            fill_lock: Mutex::new(()),
        }
    }

    pub async fn load(&self, date: &str) -> Result<Option<Puzzle>> {
        if let Some(cached) = self.puzzles.find_by_date(date).await? {
            return Ok(Some(cached));
        }

        if let Some(feed) = &self.feed {
            let _fill = self.fill_lock.lock().await;
            if let Some(cached) = self.puzzles.find_by_date(date).await? {
                return Ok(Some(cached));
            }

            if let Some(payload) = feed.fetch(date).await {
                let mut puzzle = payload.into_puzzle();
                if puzzle.puzzle_number <= 0 {
                    puzzle.puzzle_number = self.puzzles.next_puzzle_number().await?;
                }

                if self.puzzles.create(date, &puzzle).await? {
                    tracing::info!(
                        "Cached puzzle #{} for {} from remote feed",
                        puzzle.puzzle_number,
                        date
                    );
                    return Ok(Some(puzzle));
                }

                tracing::debug!("Puzzle for {} was stored by another writer", date);
                let stored = self.puzzles.find_by_date(date).await?;
                return Ok(Some(stored.unwrap_or(puzzle)));
            }
        }

        if self.use_fallback {
            tracing::warn!("No puzzle available for {}, serving fallback puzzle", date);
            return Ok(Some(fallback_puzzle()));
        }

        tracing::warn!("No puzzle available for {}", date);
        Ok(None)
    }
}
