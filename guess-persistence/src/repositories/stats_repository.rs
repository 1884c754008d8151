use std::convert::Infallible;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use guess_types::UserStats;

use crate::keys::stats_key;
use crate::store::{get_json, update_json, KeyValueStore};

pub struct StatsRepository {
    store: Arc<dyn KeyValueStore>,
}

impl StatsRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Lifetime stats, zeroed for players who have never finished a game.
    pub async fn find(&self, user_id: &str) -> Result<UserStats> {
        Ok(get_json(self.store.as_ref(), &stats_key(user_id))
            .await?
            .unwrap_or_default())
    }

    pub async fn record_completion(
        &self,
        user_id: &str,
        won: bool,
        score: i32,
        today: NaiveDate,
    ) -> Result<UserStats> {
        let updated = update_json(self.store.as_ref(), &stats_key(user_id), |stats: &mut UserStats| {
            guess_core::record_completion(stats, won, score, today);
            Ok::<_, Infallible>(())
        })
        .await?;

        match updated {
            Ok((stats, ())) => Ok(stats),
            Err(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use guess_core::parse_date_key;

    #[tokio::test]
    async fn test_unknown_user_has_empty_stats() {
        let repo = StatsRepository::new(Arc::new(MemoryStore::new()));
        assert_eq!(repo.find("t2_new").await.unwrap(), UserStats::default());
    }

    #[tokio::test]
    async fn test_record_completion_accumulates() {
        let repo = StatsRepository::new(Arc::new(MemoryStore::new()));

        let day1 = parse_date_key("2024-05-01").unwrap();
        let day2 = parse_date_key("2024-05-02").unwrap();
        repo.record_completion("t2_alice", true, 5, day1).await.unwrap();
        let stats = repo.record_completion("t2_alice", true, 3, day2).await.unwrap();

        assert_eq!(stats.total_score, 8);
        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.current_streak, 2);
        assert_eq!(repo.find("t2_alice").await.unwrap(), stats);
    }
}
