use crate::models::{Claim, ClaimStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary figures over a batch of normalized claims.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimStats {
    pub claim_count: usize,
    pub total_billed: f64,
    pub total_expected: f64,
    /// Sum of actual reimbursement over paid claims only.
    pub total_actual: f64,
    /// Sum of variance over paid claims only. Negative means a shortfall.
    pub total_variance: f64,
    pub paid_count: usize,
    pub denied_count: usize,
    /// Submitted or processing.
    pub pending_count: usize,
    pub action_required_count: usize,
    /// Expected reimbursement as a percentage of billed; `None` when nothing was billed.
    pub expected_percent_of_billed: Option<f64>,
    /// Claim count keyed by status wire value, unknown statuses included.
    /// Claims without a status are not counted here.
    pub status_counts: BTreeMap<String, usize>,
}

impl ClaimStats {
    pub fn from_claims(claims: &[Claim]) -> Self {
        let mut stats = ClaimStats {
            claim_count: claims.len(),
            total_billed: 0.0,
            total_expected: 0.0,
            total_actual: 0.0,
            total_variance: 0.0,
            paid_count: 0,
            denied_count: 0,
            pending_count: 0,
            action_required_count: 0,
            expected_percent_of_billed: None,
            status_counts: BTreeMap::new(),
        };

        for claim in claims {
            stats.total_billed += claim.billed_amount;
            stats.total_expected += claim.expected_reimbursement;

            if let Some(actual) = claim.actual_reimbursement {
                stats.paid_count += 1;
                stats.total_actual += actual;
                stats.total_variance += claim.variance.unwrap_or(0.0);
            }

            let Some(status) = &claim.status else {
                continue;
            };
            if *status == ClaimStatus::Denied {
                stats.denied_count += 1;
            } else if status.is_pending() {
                stats.pending_count += 1;
            }

            *stats
                .status_counts
                .entry(status.as_str().to_string())
                .or_insert(0) += 1;
        }

        stats.action_required_count = stats.denied_count + stats.pending_count;
        if stats.total_billed > 0.0 {
            stats.expected_percent_of_billed =
                Some(stats.total_expected / stats.total_billed * 100.0);
        }

        stats
    }

    /// True when paid claims came in under what was expected.
    pub fn has_shortfall(&self) -> bool {
        self.total_variance < 0.0
    }
}
