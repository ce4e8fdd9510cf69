// SPDX-License-Identifier: MIT

//! WHOOP API client.
//!
//! Handles:
//! - Authorization URL construction for the OAuth redirect
//! - Authorization-code exchange at the token endpoint
//! - Bearer-authenticated fetches from the developer API

use crate::config::Config;
use crate::error::AppError;
use crate::store::TokenPayload;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Scopes requested during the authorization redirect.
const OAUTH_SCOPES: &str = "read:recovery read:workout read:sleep";

/// Bound on every upstream call; there is no retry on top of it.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// WHOOP API client.
#[derive(Clone)]
pub struct WhoopClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl WhoopClient {
    /// Create a new WHOOP client with OAuth credentials.
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.whoop_base_url.trim_end_matches('/').to_string(),
            client_id: config.whoop_client_id.clone(),
            client_secret: config.whoop_client_secret.clone(),
            redirect_uri: config.whoop_redirect_uri.clone(),
        }
    }

    /// Build the authorization URL the browser is redirected to.
    pub fn authorize_url(&self, state: &str) -> String {
        format!(
            "{}/oauth/oauth2/auth?response_type=code&client_id={}&redirect_uri={}&scope={}&state={}",
            self.base_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(OAUTH_SCOPES),
            urlencoding::encode(state),
        )
    }

    /// Exchange an authorization code for a token payload.
    ///
    /// Upstream rejections (status >= 400) come back as
    /// `AppError::TokenExchange` with the raw body, so the caller can pass
    /// them through verbatim.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenPayload, AppError> {
        let response = self
            .http
            .post(format!("{}/oauth/oauth2/token", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::WhoopApi(format!("Token exchange request failed: {}", e)))?;

        let status = response.status();
        if status.as_u16() >= 400 {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "WHOOP token exchange failed");
            return Err(AppError::TokenExchange {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| AppError::WhoopApi(format!("Failed to parse token response: {}", e)))
    }

    /// Fetch a resource collection from the developer API.
    ///
    /// `path` is relative, e.g. `recovery` or `activity/workout`.
    /// Any non-2xx upstream response is a hard failure; no retry.
    pub async fn get_resource(
        &self,
        access_token: &str,
        path: &str,
    ) -> Result<RecordCollection, AppError> {
        let url = format!("{}/developer/v2/{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::WhoopApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WhoopApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::WhoopApi(format!("JSON parse error: {}", e)))
    }
}

/// Collection response from the developer API.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordCollection {
    #[serde(default)]
    pub records: Vec<ResourceRecord>,
}

/// Single provider record; only the nested score is ever read.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceRecord {
    #[serde(default)]
    pub score: Option<Value>,
}

impl ResourceRecord {
    /// Numeric `score.<field>` value, if present.
    pub fn score_field(&self, field: &str) -> Option<f64> {
        self.score.as_ref()?.get(field)?.as_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> WhoopClient {
        WhoopClient::new(&Config::test_default())
    }

    #[test]
    fn test_authorize_url_parameters() {
        let url = test_client().authorize_url("noncevalue");

        assert!(url.starts_with("https://api.prod.whoop.com/oauth/oauth2/auth?"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("client_id=test_client_id"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fcallback"));
        assert!(url.contains("scope=read%3Arecovery%20read%3Aworkout%20read%3Asleep"));
        assert!(url.contains("state=noncevalue"));
    }

    #[test]
    fn test_score_field_extraction() {
        let record: ResourceRecord = serde_json::from_value(serde_json::json!({
            "cycle_id": 1,
            "score": { "recovery_score": 88.0, "hrv_rmssd_milli": 52.3 }
        }))
        .unwrap();

        assert_eq!(record.score_field("recovery_score"), Some(88.0));
        assert_eq!(record.score_field("strain"), None);
    }

    #[test]
    fn test_record_without_score() {
        let record: ResourceRecord =
            serde_json::from_value(serde_json::json!({ "cycle_id": 2 })).unwrap();
        assert_eq!(record.score_field("recovery_score"), None);
    }

    #[test]
    fn test_collection_defaults_to_empty_records() {
        let collection: RecordCollection = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(collection.records.is_empty());
    }
}
