//! Key-value capability the game is written against.
//!
//! Values are opaque strings with a store-maintained version stamp. Every
//! write that depends on a previous read goes through [`KeyValueStore::set_if_version`],
//! so two requests racing on the same key cannot both apply their change.
//! Ranked sets hold one entry per member, ordered by score descending and
//! then by completion time ascending.

mod memory;
mod sql;

pub use memory::MemoryStore;
pub use sql::SqlStore;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

/// Attempts before a contended read-modify-write gives up.
pub const MAX_WRITE_ATTEMPTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedValue {
    pub value: String,
    pub version: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedMember {
    pub member: String,
    pub score: i32,
    pub completed_at_ms: i64,
    pub payload: String,
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<VersionedValue>>;

    /// Writes `value` only if the stored version equals `expected_version`.
    /// `None` means the key must not exist yet. Returns whether the write happened.
    async fn set_if_version(
        &self,
        key: &str,
        value: &str,
        expected_version: Option<i64>,
    ) -> Result<bool>;

    async fn delete(&self, key: &str) -> Result<()>;

    /// Inserts or replaces `member` in the ranked set at `set_key`.
    async fn rank_upsert(&self, set_key: &str, member: RankedMember) -> Result<()>;

    /// Members in rank order, at most `limit` of them when given.
    async fn rank_range(&self, set_key: &str, limit: Option<u64>) -> Result<Vec<RankedMember>>;

    /// Unconditional write.
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        for _ in 0..MAX_WRITE_ATTEMPTS {
            let version = self.get(key).await?.map(|current| current.version);
            if self.set_if_version(key, value, version).await? {
                return Ok(());
            }
        }
        Err(anyhow!("Write contention on key '{}'", key))
    }

    /// Atomically adds `delta` to an integer counter, starting from zero.
    async fn increment(&self, key: &str, delta: i64) -> Result<i64> {
        for _ in 0..MAX_WRITE_ATTEMPTS {
            let current = self.get(key).await?;
            let (value, version) = match current {
                Some(current) => (current.value.trim().parse::<i64>()?, Some(current.version)),
                None => (0, None),
            };
            let next = value + delta;
            if self.set_if_version(key, &next.to_string(), version).await? {
                return Ok(next);
            }
        }
        Err(anyhow!("Write contention on counter '{}'", key))
    }
}

pub async fn get_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key).await? {
        Some(current) => Ok(Some(serde_json::from_str(&current.value)?)),
        None => Ok(None),
    }
}

pub async fn set_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    store.set(key, &serde_json::to_string(value)?).await
}

/// Optimistic read-modify-write of a JSON document.
///
/// `apply` sees the current value (or `T::default()` when absent) and may
/// reject the change; a rejection is returned as the inner `Err` and nothing
/// is written. When another writer gets in first the value is re-read and
/// `apply` runs again on the fresh copy.
pub async fn update_json<T, R, E, F>(
    store: &dyn KeyValueStore,
    key: &str,
    mut apply: F,
) -> Result<std::result::Result<(T, R), E>>
where
    T: Serialize + DeserializeOwned + Default,
    F: FnMut(&mut T) -> std::result::Result<R, E>,
{
    for attempt in 1..=MAX_WRITE_ATTEMPTS {
        let (mut value, version) = match store.get(key).await? {
            Some(current) => (serde_json::from_str::<T>(&current.value)?, Some(current.version)),
            None => (T::default(), None),
        };

        let outcome = match apply(&mut value) {
            Ok(outcome) => outcome,
            Err(rejection) => return Ok(Err(rejection)),
        };

        let encoded = serde_json::to_string(&value)?;
        if store.set_if_version(key, &encoded, version).await? {
            return Ok(Ok((value, outcome)));
        }
        tracing::debug!("Version conflict on '{}' (attempt {}), retrying", key, attempt);
    }

    Err(anyhow!("Write contention on key '{}'", key))
}
