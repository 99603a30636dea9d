use super::{
    db_structs::{LeaderboardEntry, PlayerRecord, PlayerUpdate},
    store::{PlayerStore, StoreError}
};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local player store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    players: RwLock<HashMap<i64, PlayerRecord>>
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// Seeds the store with existing records.
    pub fn with_players(players: impl IntoIterator<Item = PlayerRecord>) -> MemoryStore {
        MemoryStore {
            players: RwLock::new(players.into_iter().map(|p| (p.id, p)).collect())
        }
    }

    pub async fn len(&self) -> usize {
        self.players.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.players.read().await.is_empty()
    }
}

impl PlayerStore for MemoryStore {
    async fn get(&self, id: i64) -> Result<Option<PlayerRecord>, StoreError> {
        Ok(self.players.read().await.get(&id).cloned())
    }

    async fn create(&self, id: i64, name: &str) -> Result<PlayerRecord, StoreError> {
        let player = PlayerRecord::new(id, name);
        self.players.write().await.insert(id, player.clone());

        Ok(player)
    }

    async fn update(&self, id: i64, update: &PlayerUpdate) -> Result<bool, StoreError> {
        match self.players.write().await.get_mut(&id) {
            Some(player) => {
                player.apply(update);
                Ok(true)
            }
            None => Ok(false)
        }
    }

    async fn top(&self, n: usize) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let players = self.players.read().await;
        let mut ranked: Vec<&PlayerRecord> = players.values().collect();
        ranked.sort_by(|a, b| b.rating.cmp(&a.rating));

        Ok(ranked
            .into_iter()
            .take(n)
            .map(|p| LeaderboardEntry {
                name: p.name.clone(),
                rating: p.rating
            })
            .collect())
    }
}
