// SPDX-License-Identifier: MIT

use std::sync::Arc;
use whoop_bridge::config::Config;
use whoop_bridge::routes::create_router;
use whoop_bridge::services::WhoopClient;
use whoop_bridge::store::TokenStore;
use whoop_bridge::AppState;

/// Create a test app pointed at a mock WHOOP server.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(whoop_base_url: &str) -> (axum::Router, Arc<AppState>) {
    build_app(whoop_base_url, None)
}

/// Create a test app with CORS enabled for the given frontend origin.
#[allow(dead_code)]
pub fn create_test_app_with_origin(
    whoop_base_url: &str,
    frontend_origin: &str,
) -> (axum::Router, Arc<AppState>) {
    build_app(whoop_base_url, Some(frontend_origin.to_string()))
}

fn build_app(whoop_base_url: &str, frontend_origin: Option<String>) -> (axum::Router, Arc<AppState>) {
    let mut config = Config::test_default();
    config.whoop_base_url = whoop_base_url.trim_end_matches('/').to_string();
    config.frontend_origin = frontend_origin;

    let whoop = WhoopClient::new(&config);
    let tokens = TokenStore::new();

    let state = Arc::new(AppState {
        config,
        whoop,
        tokens,
    });

    (create_router(state.clone()), state)
}

/// Read a JSON response body.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
