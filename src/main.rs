// SPDX-License-Identifier: MIT

//! WHOOP summary backend server.
//!
//! Performs the WHOOP OAuth2 authorization-code flow and serves
//! aggregated recovery, workout and sleep metrics.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use whoop_bridge::{config::Config, routes, services::WhoopClient, store::TokenStore, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting WHOOP summary backend");

    let whoop = WhoopClient::new(&config);
    let tokens = TokenStore::new();

    let state = Arc::new(AppState {
        config: config.clone(),
        whoop,
        tokens,
    });

    let app = routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("whoop_bridge=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
