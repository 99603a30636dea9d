use axum::{routing::get, Router};
use std::io;
use tokio::net::TcpListener;
use tracing::info;

pub const ALIVE_BODY: &str = "✅ Bot is alive!";

async fn alive() -> &'static str {
    ALIVE_BODY
}

pub fn router() -> Router {
    Router::new().route("/", get(alive))
}

pub async fn bind(port: u16) -> io::Result<TcpListener> {
    let address = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&address).await?;

    info!("Web server started on {address}");
    Ok(listener)
}

/// Serves the liveness router until the task is dropped.
pub async fn serve(listener: TcpListener) -> io::Result<()> {
    axum::serve(listener, router()).await
}
