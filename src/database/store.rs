use super::db_structs::{LeaderboardEntry, PlayerRecord, PlayerUpdate};
use std::future::Future;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("Invalid last_play value '{value}' for player {player_id}")]
    InvalidDate { player_id: i64, value: String }
}

/// Durable mapping from player id to [`PlayerRecord`].
///
/// Each call is atomic on its own; no cross-call transactions are offered.
pub trait PlayerStore: Send + Sync {
    /// `Ok(None)` when the player does not exist.
    fn get(&self, id: i64) -> impl Future<Output = Result<Option<PlayerRecord>, StoreError>> + Send;

    /// Inserts a player with default rating, streak and last-play date,
    /// replacing any existing record with the same id.
    fn create(&self, id: i64, name: &str) -> impl Future<Output = Result<PlayerRecord, StoreError>> + Send;

    /// Writes the fields present in `update` in one statement.
    /// Returns `Ok(false)` when the player does not exist.
    fn update(&self, id: i64, update: &PlayerUpdate) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// At most `n` players ordered by rating, highest first.
    fn top(&self, n: usize) -> impl Future<Output = Result<Vec<LeaderboardEntry>, StoreError>> + Send;

    fn get_or_create(&self, id: i64, name: &str) -> impl Future<Output = Result<PlayerRecord, StoreError>> + Send {
        async move {
            if let Some(player) = self.get(id).await? {
                return Ok(player);
            }

            debug!("Player {} not found, creating", id);
            self.create(id, name).await
        }
    }
}
