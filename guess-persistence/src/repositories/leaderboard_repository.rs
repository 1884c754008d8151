use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use guess_types::LeaderboardEntry;
use serde::{Deserialize, Serialize};

use crate::keys::leaderboard_key;
use crate::store::{KeyValueStore, RankedMember};

/// Member payload stored alongside each ranked entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeaderboardRecord {
    username: String,
    score: i32,
    completed_at: String,
}

/// Daily boards of winning players.
pub struct LeaderboardRepository {
    store: Arc<dyn KeyValueStore>,
}

impl LeaderboardRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn member_to_entry(member: RankedMember, rank: u32) -> Result<LeaderboardEntry> {
        let record: LeaderboardRecord = serde_json::from_str(&member.payload)?;
        Ok(LeaderboardEntry {
            rank,
            user_id: member.member,
            username: record.username,
            score: record.score,
            completed_at: record.completed_at,
        })
    }

    /// Inserts or replaces the player's entry for the day.
    pub async fn record_win(
        &self,
        date: &str,
        user_id: &str,
        username: &str,
        score: i32,
        completed_at: DateTime<Utc>,
    ) -> Result<()> {
        let record = LeaderboardRecord {
            username: username.to_string(),
            score,
            completed_at: completed_at.to_rfc3339(),
        };

        self.store
            .rank_upsert(
                &leaderboard_key(date),
                RankedMember {
                    member: user_id.to_string(),
                    score,
                    completed_at_ms: completed_at.timestamp_millis(),
                    payload: serde_json::to_string(&record)?,
                },
            )
            .await
    }

    pub async fn top(&self, date: &str, limit: u64) -> Result<Vec<LeaderboardEntry>> {
        let members = self
            .store
            .rank_range(&leaderboard_key(date), Some(limit))
            .await?;

        members
            .into_iter()
            .enumerate()
            .map(|(index, member)| Self::member_to_entry(member, (index + 1) as u32))
            .collect()
    }

    /// 1-based position of the player on the day's board, scanning the whole set.
    pub async fn rank_of(&self, date: &str, user_id: &str) -> Result<Option<u32>> {
        let members = self.store.rank_range(&leaderboard_key(date), None).await?;
        Ok(members
            .iter()
            .position(|member| member.member == user_id)
            .map(|index| (index + 1) as u32))
    }
}
