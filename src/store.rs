// SPDX-License-Identifier: MIT

//! In-memory token store.
//!
//! Holds at most one WHOOP token for the whole process. Nothing persists
//! across restarts, and there is no expiry or refresh handling; a later
//! successful exchange simply overwrites the previous token.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Token payload returned by WHOOP's token endpoint.
///
/// Only `access_token` is ever read; the remaining provider fields
/// (expiry, refresh token, scope) are carried verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPayload {
    pub access_token: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Injectable single-token store shared across request handlers.
#[derive(Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Option<TokenPayload>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current token, if the OAuth flow has completed.
    pub async fn get(&self) -> Option<TokenPayload> {
        self.inner.read().await.clone()
    }

    /// Store a freshly exchanged token, replacing any previous one.
    pub async fn set(&self, token: TokenPayload) {
        *self.inner.write().await = Some(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(access_token: &str) -> TokenPayload {
        serde_json::from_value(serde_json::json!({
            "access_token": access_token,
            "token_type": "bearer",
            "expires_in": 3600,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_store_starts_empty() {
        let store = TokenStore::new();
        assert!(store.get().await.is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_token() {
        let store = TokenStore::new();

        store.set(payload("first")).await;
        assert_eq!(store.get().await.unwrap().access_token, "first");

        store.set(payload("second")).await;
        assert_eq!(store.get().await.unwrap().access_token, "second");
    }

    #[test]
    fn test_payload_keeps_extra_fields_verbatim() {
        let token = payload("abc");
        assert_eq!(token.extra.get("expires_in"), Some(&serde_json::json!(3600)));

        let round = serde_json::to_value(&token).unwrap();
        assert_eq!(round["token_type"], "bearer");
    }
}
