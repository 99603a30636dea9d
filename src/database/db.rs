use super::{
    db_structs::{LeaderboardEntry, PlayerRecord, PlayerUpdate},
    store::{PlayerStore, StoreError}
};
use chrono::NaiveDate;
use postgres_types::ToSql;
use std::sync::Arc;
use tokio_postgres::{Client, Error, NoTls, Row};
use tracing::{error, info};

/// `last_play` is stored as an ISO `YYYY-MM-DD` string.
pub const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS players (
        user_id BIGINT PRIMARY KEY,
        name TEXT NOT NULL,
        mmr INTEGER NOT NULL,
        last_play TEXT NOT NULL,
        streak INTEGER NOT NULL
    );";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone)]
pub struct DbClient {
    client: Arc<Client>
}

impl DbClient {
    // Connect to the database and return a DbClient instance
    pub async fn connect(connection_str: &str) -> Result<Self, Error> {
        let (client, connection) = tokio_postgres::connect(connection_str, NoTls).await?;

        // Spawn the connection object to run in the background
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("connection error: {}", e);
            }
        });

        Ok(DbClient {
            client: Arc::new(client)
        })
    }

    /// Creates the players table if it does not exist yet.
    pub async fn init_schema(&self) -> Result<(), Error> {
        self.client.batch_execute(SCHEMA).await?;

        info!("Players table ready");
        Ok(())
    }

    fn player_from_row(row: &Row) -> Result<PlayerRecord, StoreError> {
        let id: i64 = row.get("user_id");
        let last_play: String = row.get("last_play");
        let last_play_date =
            NaiveDate::parse_from_str(&last_play, DATE_FORMAT).map_err(|_| StoreError::InvalidDate {
                player_id: id,
                value: last_play.clone()
            })?;

        Ok(PlayerRecord {
            id,
            name: row.get("name"),
            rating: row.get("mmr"),
            last_play_date,
            streak: row.get("streak")
        })
    }
}

impl PlayerStore for DbClient {
    async fn get(&self, id: i64) -> Result<Option<PlayerRecord>, StoreError> {
        let row = self
            .client
            .query_opt(
                "SELECT user_id, name, mmr, last_play, streak FROM players WHERE user_id = $1",
                &[&id]
            )
            .await?;

        row.as_ref().map(Self::player_from_row).transpose()
    }

    async fn create(&self, id: i64, name: &str) -> Result<PlayerRecord, StoreError> {
        let player = PlayerRecord::new(id, name);
        let last_play = player.last_play_date.format(DATE_FORMAT).to_string();

        let query = "INSERT INTO players (user_id, name, mmr, last_play, streak) VALUES ($1, $2, $3, $4, $5) \
            ON CONFLICT (user_id) DO UPDATE SET name = EXCLUDED.name, mmr = EXCLUDED.mmr, \
            last_play = EXCLUDED.last_play, streak = EXCLUDED.streak";
        let values: &[&(dyn ToSql + Sync)] = &[&player.id, &player.name, &player.rating, &last_play, &player.streak];

        self.client.execute(query, values).await?;

        info!("Created player {} ({})", player.id, player.name);
        Ok(player)
    }

    async fn update(&self, id: i64, update: &PlayerUpdate) -> Result<bool, StoreError> {
        if update.is_empty() {
            return Ok(self.get(id).await?.is_some());
        }

        let last_play = update.last_play_date.map(|d| d.format(DATE_FORMAT).to_string());

        let mut assignments: Vec<String> = Vec::new();
        let mut values: Vec<&(dyn ToSql + Sync)> = Vec::new();

        if let Some(rating) = &update.rating {
            values.push(rating);
            assignments.push(format!("mmr = ${}", values.len()));
        }
        if let Some(last_play) = &last_play {
            values.push(last_play);
            assignments.push(format!("last_play = ${}", values.len()));
        }
        if let Some(streak) = &update.streak {
            values.push(streak);
            assignments.push(format!("streak = ${}", values.len()));
        }

        values.push(&id);
        let query = format!(
            "UPDATE players SET {} WHERE user_id = ${}",
            assignments.join(", "),
            values.len()
        );

        let updated = self.client.execute(query.as_str(), &values).await?;
        Ok(updated > 0)
    }

    async fn top(&self, n: usize) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let limit = n as i64;
        let rows = self
            .client
            .query("SELECT name, mmr FROM players ORDER BY mmr DESC LIMIT $1", &[&limit])
            .await?;

        Ok(rows
            .iter()
            .map(|row| LeaderboardEntry {
                name: row.get("name"),
                rating: row.get("mmr")
            })
            .collect())
    }
}
