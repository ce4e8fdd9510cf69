// SPDX-License-Identifier: MIT

//! Summary aggregation over WHOOP resource collections.
//!
//! Fetches the recovery, workout and sleep collections, keeps the first 7
//! records of each in provider order, and averages the nested score field.

use crate::error::AppError;
use crate::services::whoop::{RecordCollection, WhoopClient};
use crate::store::TokenStore;
use serde::Serialize;

/// Records considered per collection.
const RECORD_CAP: usize = 7;

/// Aggregated metrics payload.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub recovery_last_7: Vec<f64>,
    pub avg_recovery_7d: Option<f64>,
    pub strain_last_7: Vec<f64>,
    pub avg_strain_7d: Option<f64>,
    pub sleep_performance_last_7: Vec<f64>,
    pub avg_sleep_performance_7d: Option<f64>,
}

/// Build the summary for the currently stored token.
///
/// Fails with `NotConnected` before any upstream call if the OAuth flow
/// has not completed. The three fetches are sequential: one user, three
/// small collections.
pub async fn build_summary(
    client: &WhoopClient,
    tokens: &TokenStore,
) -> Result<SummaryResponse, AppError> {
    let token = tokens.get().await.ok_or(AppError::NotConnected)?;
    let access_token = token.access_token.as_str();

    let recovery = client.get_resource(access_token, "recovery").await?;
    let workouts = client.get_resource(access_token, "activity/workout").await?;
    let sleep = client.get_resource(access_token, "activity/sleep").await?;

    let recovery_scores = extract_scores(&recovery, "recovery_score");
    let strain_scores = extract_scores(&workouts, "strain");
    let sleep_scores = extract_scores(&sleep, "sleep_performance_percentage");

    tracing::debug!(
        recovery = recovery_scores.len(),
        workouts = strain_scores.len(),
        sleep = sleep_scores.len(),
        "Aggregated WHOOP collections"
    );

    Ok(SummaryResponse {
        avg_recovery_7d: mean_1dp(&recovery_scores),
        recovery_last_7: recovery_scores,
        avg_strain_7d: mean_1dp(&strain_scores),
        strain_last_7: strain_scores,
        avg_sleep_performance_7d: mean_1dp(&sleep_scores),
        sleep_performance_last_7: sleep_scores,
    })
}

/// Numeric `score.<field>` values from the first 7 records.
///
/// Records without the field are dropped, not replaced: fewer than 7
/// scores can come out of a collection with more than 7 records.
fn extract_scores(collection: &RecordCollection, field: &str) -> Vec<f64> {
    collection
        .records
        .iter()
        .take(RECORD_CAP)
        .filter_map(|record| record.score_field(field))
        .collect()
}

/// Arithmetic mean rounded to one decimal place; `None` for an empty list.
fn mean_1dp(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(json: serde_json::Value) -> RecordCollection {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_mean_empty_is_none() {
        assert_eq!(mean_1dp(&[]), None);
    }

    #[test]
    fn test_mean_rounds_to_one_decimal() {
        assert_eq!(mean_1dp(&[1.0, 2.0]), Some(1.5));
        assert_eq!(mean_1dp(&[10.5, 15.25]), Some(12.9));
        assert_eq!(mean_1dp(&[33.0, 33.0, 34.0]), Some(33.3));
        assert_eq!(mean_1dp(&[88.0]), Some(88.0));
    }

    #[test]
    fn test_extract_caps_at_seven_records() {
        let records: Vec<serde_json::Value> = (0..10)
            .map(|i| serde_json::json!({ "score": { "strain": i as f64 } }))
            .collect();
        let collection = collection(serde_json::json!({ "records": records }));

        let scores = extract_scores(&collection, "strain");
        assert_eq!(scores, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_extract_drops_records_without_score() {
        let collection = collection(serde_json::json!({
            "records": [
                { "score": { "recovery_score": 90.0 } },
                { "cycle_id": 42 },
                { "score": { "hrv_rmssd_milli": 55.0 } },
                { "score": { "recovery_score": 70.0 } },
            ]
        }));

        let scores = extract_scores(&collection, "recovery_score");
        assert_eq!(scores, vec![90.0, 70.0]);
    }

    #[test]
    fn test_cap_applies_to_records_not_scores() {
        // 9 records, scores only in the last two: the cap keeps the first
        // 7 records, so both scored records fall outside it.
        let mut records: Vec<serde_json::Value> =
            (0..7).map(|i| serde_json::json!({ "cycle_id": i })).collect();
        records.push(serde_json::json!({ "score": { "strain": 12.0 } }));
        records.push(serde_json::json!({ "score": { "strain": 14.0 } }));
        let collection = collection(serde_json::json!({ "records": records }));

        assert!(extract_scores(&collection, "strain").is_empty());
    }
}
