//! Batch ingestion: unwrapping transport bodies and the claim source capability.

use crate::claims_client::ClaimsClient;
use crate::errors::AppError;
use crate::fixtures::FixtureSource;
use crate::models::{Claim, RawClaimRecord};
use crate::normalizer::normalize_claim;
use serde_json::Value;
use std::future::Future;

/// Pulls the raw claim records out of a response body.
///
/// Accepts a bare array or an object wrapping the array under `data`. Any
/// other shape yields an empty batch rather than an error.
pub fn extract_records(body: Value) -> Vec<RawClaimRecord> {
    let rows = match body {
        Value::Array(rows) => rows,
        Value::Object(mut wrapper) => match wrapper.remove("data") {
            Some(Value::Array(rows)) => rows,
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                tracing::warn!(
                    "Claims body has non-array `data` field ({}); treating as empty",
                    json_type_name(&other)
                );
                Vec::new()
            }
        },
        other => {
            tracing::warn!(
                "Claims body is neither an array nor a data wrapper ({}); treating as empty",
                json_type_name(&other)
            );
            Vec::new()
        }
    };

    rows.into_iter().map(RawClaimRecord::from).collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Normalizes each record independently, preserving input order.
pub fn normalize_batch(records: &[RawClaimRecord]) -> Vec<Claim> {
    records.iter().map(normalize_claim).collect()
}

/// Extracts and normalizes a whole response body.
pub fn ingest_body(body: Value) -> Vec<Claim> {
    let records = extract_records(body);
    let claims = normalize_batch(&records);
    tracing::debug!("Normalized {} claim records", claims.len());
    claims
}

/// Something that can supply the full, normalized claims collection.
pub trait ClaimSource {
    /// Fetches every claim. Either the whole batch is returned or the call fails.
    fn fetch_claims(&self) -> impl Future<Output = Result<Vec<Claim>, AppError>> + Send;

    /// Fetches the batch and returns the first claim with the given id.
    fn find_claim(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Claim>, AppError>> + Send
    where
        Self: Sync,
    {
        async move {
            let claims = self.fetch_claims().await?;
            Ok(claims.into_iter().find(|claim| claim.id == id))
        }
    }
}

/// The claim source chosen when the application is assembled.
#[derive(Clone)]
pub enum ClaimFeed {
    /// Fetches from the claims backend over HTTP.
    Live(ClaimsClient),
    /// Serves the built-in sample claims.
    Fixture(FixtureSource),
}

impl ClaimFeed {
    pub fn kind(&self) -> &'static str {
        match self {
            ClaimFeed::Live(_) => "live",
            ClaimFeed::Fixture(_) => "fixture",
        }
    }
}

impl ClaimSource for ClaimFeed {
    async fn fetch_claims(&self) -> Result<Vec<Claim>, AppError> {
        match self {
            ClaimFeed::Live(client) => client.fetch_claims().await,
            ClaimFeed::Fixture(fixtures) => fixtures.fetch_claims().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_bare_array() {
        let records = extract_records(json!([{"id": "a"}, {"id": "b"}]));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_extract_data_wrapper() {
        let records = extract_records(json!({"data": [{"id": "a"}], "count": 1}));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_malformed_bodies_degrade_to_empty() {
        assert!(extract_records(json!({"rows": [{"id": "a"}]})).is_empty());
        assert!(extract_records(json!({"data": null})).is_empty());
        assert!(extract_records(json!({"data": "oops"})).is_empty());
        assert!(extract_records(json!("claims")).is_empty());
        assert!(extract_records(Value::Null).is_empty());
    }

    #[test]
    fn test_batch_preserves_order_without_dedup() {
        let claims = ingest_body(json!([
            {"id": "b", "status": "paid"},
            {"id": "a", "status": "denied"},
            {"id": "b", "status": "paid"}
        ]));
        let ids: Vec<&str> = claims.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_non_object_row_normalizes_to_defaults() {
        let claims = ingest_body(json!([null, 7, {"id": "cl-1"}]));
        assert_eq!(claims.len(), 3);
        assert_eq!(claims[0].id, "");
        assert_eq!(claims[1].billed_amount, 0.0);
        assert_eq!(claims[2].id, "cl-1");
    }

    #[tokio::test]
    async fn test_find_claim_through_feed() {
        let feed = ClaimFeed::Fixture(FixtureSource::instant());
        assert_eq!(feed.kind(), "fixture");

        let found = feed.find_claim("cl-003").await.unwrap();
        assert_eq!(found.map(|c| c.patient_name), Some("Michael Chen".to_string()));

        assert!(feed.find_claim("cl-999").await.unwrap().is_none());
    }
}
