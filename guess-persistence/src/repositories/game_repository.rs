use std::sync::Arc;

use anyhow::Result;
use guess_types::GameState;

use crate::keys::game_key;
use crate::store::{get_json, update_json, KeyValueStore};

/// Per (user, day) game records.
pub struct GameRepository {
    store: Arc<dyn KeyValueStore>,
}

impl GameRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn find(&self, user_id: &str, date: &str) -> Result<Option<GameState>> {
        get_json(self.store.as_ref(), &game_key(user_id, date)).await
    }

    /// Returns the existing game, or records and returns an empty one.
    pub async fn find_or_create(&self, user_id: &str, date: &str) -> Result<GameState> {
        let key = game_key(user_id, date);
        if let Some(existing) = get_json(self.store.as_ref(), &key).await? {
            return Ok(existing);
        }

        let fresh = GameState::default();
        let created = self
            .store
            .set_if_version(&key, &serde_json::to_string(&fresh)?, None)
            .await?;
        if created {
            tracing::debug!("Created game record {}", key);
            return Ok(fresh);
        }

        // Lost a creation race; the other request's record wins
        Ok(get_json(self.store.as_ref(), &key).await?.unwrap_or(fresh))
    }

    /// Applies a change to the game under optimistic concurrency.
    ///
    /// The closure may run more than once if another request writes in between.
    pub async fn update<R, E, F>(
        &self,
        user_id: &str,
        date: &str,
        apply: F,
    ) -> Result<std::result::Result<(GameState, R), E>>
    where
        F: FnMut(&mut GameState) -> std::result::Result<R, E>,
    {
        update_json(self.store.as_ref(), &game_key(user_id, date), apply).await
    }

    pub async fn delete(&self, user_id: &str, date: &str) -> Result<()> {
        self.store.delete(&game_key(user_id, date)).await
    }
}
