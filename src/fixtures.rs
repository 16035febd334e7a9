//! Built-in sample claims for running without a backend.
//!
//! The samples are kept in upstream (snake_case) shape and go through the
//! normalizer on every fetch, exactly like live data.

use crate::errors::AppError;
use crate::ingestion::{normalize_batch, ClaimSource};
use crate::models::{Claim, RawClaimRecord};
use serde_json::json;
use std::time::Duration;

/// Delay applied to each fixture fetch unless configured otherwise.
pub const DEFAULT_FIXTURE_DELAY: Duration = Duration::from_millis(600);

/// Serves a fixed set of sample claims after an artificial delay.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    records: Vec<RawClaimRecord>,
    delay: Duration,
}

impl FixtureSource {
    pub fn new(delay: Duration) -> Self {
        Self::with_records(sample_records(), delay)
    }

    /// Sample claims with no delay.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn with_records(records: Vec<RawClaimRecord>, delay: Duration) -> Self {
        Self { records, delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::new(DEFAULT_FIXTURE_DELAY)
    }
}

impl ClaimSource for FixtureSource {
    async fn fetch_claims(&self) -> Result<Vec<Claim>, AppError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        tracing::debug!("Serving {} fixture claims", self.records.len());
        Ok(normalize_batch(&self.records))
    }
}

/// The sample claims shown by the dashboard in mock mode.
pub fn sample_records() -> Vec<RawClaimRecord> {
    vec![
        json!({
            "claim_id": "cl-001",
            "patient_id": "pt-1234",
            "patient_name": "John Smith",
            "procedure_code": "99213",
            "procedure_name": "Office Visit - Level 3",
            "date_of_service": "2024-11-15",
            "billed_amount": 150.0,
            "expected_reimbursement": 120.0,
            "actual_reimbursement": 115.0,
            "status": "paid",
            "payer_name": "Blue Cross Blue Shield",
            "submitted_date": "2024-11-16T08:00:00Z"
        }),
        json!({
            "claim_id": "cl-002",
            "patient_id": "pt-5678",
            "patient_name": "Sarah Johnson",
            "procedure_code": "80053",
            "procedure_name": "Comprehensive Metabolic Panel",
            "date_of_service": "2024-11-18",
            "billed_amount": 85.0,
            "expected_reimbursement": 68.0,
            "actual_reimbursement": null,
            "status": "processing",
            "payer_name": "United Healthcare",
            "submitted_date": "2024-11-19T10:30:00Z"
        }),
        json!({
            "claim_id": "cl-003",
            "patient_id": "pt-9012",
            "patient_name": "Michael Chen",
            "procedure_code": "93000",
            "procedure_name": "Electrocardiogram",
            "date_of_service": "2024-11-20",
            "billed_amount": 120.0,
            "expected_reimbursement": 95.0,
            "actual_reimbursement": 85.0,
            "status": "paid",
            "payer_name": "Aetna",
            "submitted_date": "2024-11-21T09:00:00Z"
        }),
        json!({
            "claim_id": "cl-004",
            "patient_id": "pt-3456",
            "patient_name": "Emily Davis",
            "procedure_code": "99214",
            "procedure_name": "Office Visit - Level 4",
            "date_of_service": "2024-11-22",
            "billed_amount": 200.0,
            "expected_reimbursement": 160.0,
            "actual_reimbursement": null,
            "status": "denied",
            "payer_name": "Blue Cross Blue Shield",
            "submitted_date": "2024-11-23T11:00:00Z"
        }),
    ]
    .into_iter()
    .map(RawClaimRecord::from)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClaimStatus;

    #[tokio::test]
    async fn test_fixture_claims_match_samples() {
        let claims = FixtureSource::instant().fetch_claims().await.unwrap();

        assert_eq!(claims.len(), 4);
        assert_eq!(claims[0].id, "cl-001");
        assert_eq!(claims[0].variance, Some(-5.0));
        assert_eq!(claims[1].actual_reimbursement, None);
        assert_eq!(claims[1].variance, None);
        assert_eq!(claims[2].variance, Some(-10.0));
        assert_eq!(claims[3].status, Some(ClaimStatus::Denied));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixture_fetch_waits_for_delay() {
        let source = FixtureSource::default();
        assert_eq!(source.delay(), DEFAULT_FIXTURE_DELAY);

        let started = tokio::time::Instant::now();
        source.fetch_claims().await.unwrap();
        assert!(started.elapsed() >= DEFAULT_FIXTURE_DELAY);
    }

    #[tokio::test]
    async fn test_custom_records() {
        let source = FixtureSource::with_records(
            vec![RawClaimRecord::from(json!({"id": "x-1", "status": "appealed"}))],
            Duration::ZERO,
        );
        let claims = source.fetch_claims().await.unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].status, Some(ClaimStatus::Appealed));
    }
}
