use std::sync::Arc;

use anyhow::Result;
use guess_types::Puzzle;

use crate::keys::{puzzle_key, PUZZLE_NUMBER_KEY};
use crate::store::{get_json, set_json, KeyValueStore};

pub struct PuzzleRepository {
    store: Arc<dyn KeyValueStore>,
}

impl PuzzleRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn find_by_date(&self, date: &str) -> Result<Option<Puzzle>> {
        get_json(self.store.as_ref(), &puzzle_key(date)).await
    }

    pub async fn save(&self, date: &str, puzzle: &Puzzle) -> Result<()> {
        set_json(self.store.as_ref(), &puzzle_key(date), puzzle).await
    }

    /// Stores the puzzle only if the date has none yet. Returns whether it was written.
    pub async fn create(&self, date: &str, puzzle: &Puzzle) -> Result<bool> {
        let encoded = serde_json::to_string(puzzle)?;
        self.store
            .set_if_version(&puzzle_key(date), &encoded, None)
            .await
    }

    pub async fn delete(&self, date: &str) -> Result<()> {
        self.store.delete(&puzzle_key(date)).await
    }

    /// Claims the next sequential puzzle number.
    pub async fn next_puzzle_number(&self) -> Result<i32> {
        let next = self.store.increment(PUZZLE_NUMBER_KEY, 1).await?;
        Ok(i32::try_from(next)?)
    }
}
