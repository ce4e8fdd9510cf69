// SPDX-License-Identifier: MIT

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No token in the store: the OAuth flow has not completed.
    #[error("Not connected to WHOOP")]
    NotConnected,

    /// WHOOP rejected the authorization code. Carries the upstream status
    /// and raw body so the callback handler can pass them through verbatim.
    #[error("Token exchange rejected with status {status}")]
    TokenExchange { status: u16, body: String },

    #[error("WHOOP API error: {0}")]
    WhoopApi(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Hint returned with `NotConnected` responses.
    pub const NOT_CONNECTED_HINT: &'static str =
        "Not authenticated. Go to /login first, then approve, then come back.";
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::NotConnected => (
                StatusCode::UNAUTHORIZED,
                "not_connected",
                Some(Self::NOT_CONNECTED_HINT.to_string()),
            ),
            AppError::TokenExchange { status, body } => {
                // Normally consumed by the callback handler; render it
                // anyway in case it escapes through another path.
                tracing::error!(status, "Token exchange failure reached response layer");
                (
                    StatusCode::BAD_GATEWAY,
                    "token_exchange_failed",
                    Some(body.clone()),
                )
            }
            AppError::WhoopApi(msg) => (StatusCode::BAD_GATEWAY, "whoop_error", Some(msg.clone())),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
