use dota_mmr::database::{db::SCHEMA, PlayerRecord};
use lazy_static::lazy_static;
use std::sync::Arc;
use testcontainers::{clients::Cli, Container};
use testcontainers_modules::postgres::Postgres;
use tokio_postgres::{Client, NoTls};

pub struct TestDatabase {
    pub connection_string: String,
    _container: Container<'static, Postgres>
}

impl TestDatabase {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        // Create a static CLI instance
        lazy_static! {
            static ref DOCKER: Arc<Cli> = Arc::new(Cli::default());
        }

        // Start PostgreSQL container
        let container = DOCKER.run(Postgres::default());
        let port = container.get_host_port_ipv4(5432);

        let connection_string = format!(
            "host=localhost port={} user=postgres password=postgres dbname=postgres",
            port
        );

        let client = connect(&connection_string).await?;
        client.batch_execute(SCHEMA).await?;

        Ok(TestDatabase {
            connection_string,
            _container: container
        })
    }

    pub async fn get_client(&self) -> Result<Client, Box<dyn std::error::Error>> {
        connect(&self.connection_string).await
    }

    /// Inserts players directly, bypassing the store
    pub async fn seed_players(&self, players: &[PlayerRecord]) -> Result<(), Box<dyn std::error::Error>> {
        let client = self.get_client().await?;

        for player in players {
            client
                .execute(
                    "INSERT INTO players (user_id, name, mmr, last_play, streak) VALUES ($1, $2, $3, $4, $5)",
                    &[
                        &player.id,
                        &player.name,
                        &player.rating,
                        &player.last_play_date.format("%Y-%m-%d").to_string(),
                        &player.streak
                    ]
                )
                .await?;
        }

        Ok(())
    }
}

async fn connect(connection_string: &str) -> Result<Client, Box<dyn std::error::Error>> {
    let (client, connection) = tokio_postgres::connect(connection_string, NoTls).await?;

    // Spawn the connection handler
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            eprintln!("Database connection error: {}", e);
        }
    });

    Ok(client)
}
