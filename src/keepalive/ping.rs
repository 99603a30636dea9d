use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

pub const DEFAULT_PING_INTERVAL: Duration = Duration::from_secs(300);
const PING_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum PingError {
    #[error("Ping request failed: {0}")]
    Request(#[from] reqwest::Error)
}

/// One GET of `url`. The body is not read.
pub async fn ping_once(client: &Client, url: &str) -> Result<StatusCode, PingError> {
    let response = client.get(url).send().await?;

    Ok(response.status())
}

/// Pings `url` every `period`, starting immediately. Failures are logged and the
/// loop waits for the next tick; it never returns.
pub async fn ping_loop(url: String, period: Duration) {
    let client = match Client::builder().timeout(PING_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => {
            warn!("Failed to build ping client, using defaults: {}", e);
            Client::new()
        }
    };

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("Self-ping enabled for {} every {}s", url, period.as_secs());

    loop {
        ticker.tick().await;

        match ping_once(&client, &url).await {
            Ok(status) => info!("Pinged self to stay awake ({})", status),
            Err(e) => warn!("Ping failed: {}", e)
        }
    }
}
