use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use guess_core::RankKey;
use tokio::sync::RwLock;

use super::{KeyValueStore, RankedMember, VersionedValue};

/// Process-local store, used by tests and single-instance development runs.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, VersionedValue>>,
    ranked_sets: RwLock<HashMap<String, HashMap<String, RankedMember>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<VersionedValue>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set_if_version(
        &self,
        key: &str,
        value: &str,
        expected_version: Option<i64>,
    ) -> Result<bool> {
        let mut entries = self.entries.write().await;
        let current_version = entries.get(key).map(|entry| entry.version);
        if current_version != expected_version {
            return Ok(false);
        }

        entries.insert(
            key.to_string(),
            VersionedValue {
                value: value.to_string(),
                version: current_version.unwrap_or(0) + 1,
            },
        );
        Ok(true)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }

    async fn rank_upsert(&self, set_key: &str, member: RankedMember) -> Result<()> {
        let mut sets = self.ranked_sets.write().await;
        sets.entry(set_key.to_string())
            .or_default()
            .insert(member.member.clone(), member);
        Ok(())
    }

    async fn rank_range(&self, set_key: &str, limit: Option<u64>) -> Result<Vec<RankedMember>> {
        let sets = self.ranked_sets.read().await;
        let mut members: Vec<RankedMember> = sets
            .get(set_key)
            .map(|set| set.values().cloned().collect())
            .unwrap_or_default();

        members.sort_by(|a, b| {
            RankKey::new(a.score, a.completed_at_ms)
                .cmp(&RankKey::new(b.score, b.completed_at_ms))
                .then_with(|| a.member.cmp(&b.member))
        });

        if let Some(limit) = limit {
            members.truncate(limit as usize);
        }
        Ok(members)
    }
}
