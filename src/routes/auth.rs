// SPDX-License-Identifier: MIT

//! WHOOP OAuth authentication routes.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Json, Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::AppState;

/// Hint returned when WHOOP redirects back without a code.
const MISSING_CODE_HINT: &str = "WHOOP redirected here without ?code=. This usually means \
     redirect_uri mismatch or invalid scope/client config.";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", get(login))
        .route("/callback", get(callback))
}

/// Fresh random state nonce, 16 bytes, URL-safe encoded.
fn state_nonce() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Start OAuth flow - redirect to WHOOP authorization.
async fn login(State(state): State<Arc<AppState>>) -> Redirect {
    let auth_url = state.whoop.authorize_url(&state_nonce());

    tracing::info!(
        client_id = %state.config.whoop_client_id,
        "Starting OAuth flow, redirecting to WHOOP"
    );

    Redirect::temporary(&auth_url)
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    state: Option<String>,
}

/// Callback response; every branch sets `connected` explicitly.
#[derive(Default, Serialize)]
pub struct CallbackResponse {
    connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token_error: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
}

/// OAuth callback - exchange code for a token and store it.
///
/// The `state` echoed by WHOOP is returned to the caller but never
/// compared against the nonce issued at `/login`; known gap kept from
/// the original flow.
async fn callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> Result<Json<CallbackResponse>> {
    // WHOOP sent an error instead of a code (user denial, config mismatch).
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from WHOOP");
        return Ok(Json(CallbackResponse {
            connected: false,
            error: Some(error),
            error_description: params.error_description,
            state: params.state,
            ..Default::default()
        }));
    }

    // Nothing came back at all.
    let Some(code) = params.code else {
        tracing::warn!("OAuth callback without code or error");
        return Ok(Json(CallbackResponse {
            connected: false,
            error: Some("missing_code".to_string()),
            hint: Some(MISSING_CODE_HINT),
            state: params.state,
            ..Default::default()
        }));
    };

    tracing::info!("Exchanging authorization code for token");

    match state.whoop.exchange_code(&code).await {
        Ok(token) => {
            state.tokens.set(token).await;
            tracing::info!("OAuth successful, token stored");
            Ok(Json(CallbackResponse {
                connected: true,
                ..Default::default()
            }))
        }
        // WHOOP rejected the code: status and raw body pass through verbatim.
        Err(AppError::TokenExchange { status, body }) => Ok(Json(CallbackResponse {
            connected: false,
            token_error: Some(status),
            body: Some(body),
            ..Default::default()
        })),
        Err(e) => Err(e),
    }
}
