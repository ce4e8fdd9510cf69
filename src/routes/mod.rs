// SPDX-License-Identifier: MIT

//! HTTP route handlers.

pub mod auth;
pub mod summary;

use crate::AppState;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Liveness check.
async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "backend running".to_string(),
    })
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/", get(root))
        .merge(auth::routes())
        .merge(summary::routes());

    // CORS only when a frontend origin is configured.
    if let Some(frontend_origin) = state.config.frontend_origin.clone() {
        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(
                move |origin: &axum::http::HeaderValue,
                      _request_parts: &axum::http::request::Parts| {
                    origin.to_str().is_ok_and(|o| o == frontend_origin)
                },
            ))
            .allow_methods(Any)
            .allow_headers(Any);
        router = router.layer(cors);
    }

    router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
