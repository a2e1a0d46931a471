//! Commute server - HTTP backend for commute fuel-cost comparisons

mod api;
mod config;
mod state;
mod trip;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("commute_server=debug".parse()?),
        )
        .init();

    tracing::info!("Starting commute server...");

    let config = Config::from_env();
    let port = config.server_port;
    if config.ors_api_key.is_empty() {
        tracing::warn!("ORS_API_KEY is empty; geocoding and routing will be rejected upstream");
    }
    let state = Arc::new(AppState::from_config(config));

    // The browser form is served from another origin.
    let app = api::routes()
        .with_state(state)
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
