use clap::Parser;
use dota_mmr::{
    api::{TelegramClient, TelegramError},
    args::Args,
    bot::{self, BotContext},
    database::{DbClient, MemoryStore, PlayerStore},
    keepalive::{liveness, ping},
    model::clock::UtcClock
};
use std::{io, time::Duration};
use thiserror::Error;
use tokio::signal::{self, ctrl_c};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum StartupError {
    #[error("Failed to connect to database: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("Failed to start web server: {0}")]
    Bind(#[from] io::Error),

    #[error("Failed to reach Telegram: {0}")]
    Telegram(#[from] TelegramError),

    #[error("CONNECTION_STRING must be set unless --in-memory is used")]
    MissingConnectionString
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log_level))
        .with_writer(io::stderr)
        .init();

    let result = if args.in_memory {
        warn!("Running with an in-memory player store, nothing will be persisted");
        run(MemoryStore::new(), &args).await
    } else {
        match connect(args.connection_string.as_deref()).await {
            Ok(db) => run(db, &args).await,
            Err(e) => Err(e)
        }
    };

    if let Err(e) = result {
        error!("{}", e);
        error!("Application cannot start, exiting");
        std::process::exit(1);
    }
}

async fn connect(connection_string: Option<&str>) -> Result<DbClient, StartupError> {
    let connection_string = connection_string.ok_or(StartupError::MissingConnectionString)?;
    let db = DbClient::connect(connection_string).await?;
    db.init_schema().await?;

    info!("Connected to database");
    Ok(db)
}

async fn run<S: PlayerStore>(store: S, args: &Args) -> Result<(), StartupError> {
    let listener = liveness::bind(args.port).await?;

    let telegram = TelegramClient::new(&args.api_token, Duration::from_secs(args.poll_timeout_secs))?;
    let me = telegram.get_me().await?;
    info!("Bot started as @{}", me.username.as_deref().unwrap_or(&me.first_name));

    let ctx = BotContext::new(store, UtcClock).with_username(me.username);

    let self_ping = async {
        match &args.ping_url {
            Some(url) => ping::ping_loop(url.clone(), Duration::from_secs(args.ping_interval_secs)).await,
            None => {
                info!("RENDER_EXTERNAL_URL not set, self-ping disabled");
                std::future::pending::<()>().await
            }
        }
    };

    tokio::select! {
        result = liveness::serve(listener) => result?,
        _ = bot::run(&ctx, &telegram) => {},
        _ = self_ping => {},
        _ = shutdown_signal() => {}
    }

    info!("Bot shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
