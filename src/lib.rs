// SPDX-License-Identifier: MIT

//! WHOOP summary backend.
//!
//! Walks the WHOOP OAuth2 authorization-code flow and serves lightly
//! aggregated recovery, workout and sleep metrics to a frontend.

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod store;

use config::Config;
use services::WhoopClient;
use store::TokenStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub whoop: WhoopClient,
    pub tokens: TokenStore,
}
