// SPDX-License-Identifier: MIT

//! Aggregated metrics endpoint.

use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use crate::error::Result;
use crate::services::summary::{build_summary, SummaryResponse};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/whoop/summary", get(get_summary))
}

/// Averages over the last recovery, workout and sleep records.
async fn get_summary(State(state): State<Arc<AppState>>) -> Result<Json<SummaryResponse>> {
    let summary = build_summary(&state.whoop, &state.tokens).await?;
    Ok(Json(summary))
}
