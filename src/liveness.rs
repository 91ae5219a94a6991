//! Minimal HTTP endpoint so hosting monitors see the process as up.

use std::net::SocketAddr;

use axum::{Router, routing::get};
use log::{error, info};
use tokio::net::TcpListener;

use crate::error::Result;

pub const ONLINE_MESSAGE: &str = "Bot is online!";

async fn home() -> &'static str {
    ONLINE_MESSAGE
}

#[must_use]
pub fn router() -> Router {
    Router::new().route("/", get(home))
}

/// Serve the liveness router on an already bound listener.
pub async fn serve_on(listener: TcpListener) -> Result<()> {
    axum::serve(listener, router()).await?;
    Ok(())
}

/// Bind `addr` and serve until the process exits.
pub async fn serve(addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Liveness endpoint listening on {addr}");
    serve_on(listener).await
}

/// Run the endpoint on its own task. Failures are logged, never fatal.
pub fn spawn(addr: SocketAddr) {
    tokio::spawn(async move {
        if let Err(e) = serve(addr).await {
            error!("Liveness endpoint on {addr} stopped: {e}");
        }
    });
}
