use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// ============ Upstream Models ============

/// One claim exactly as received from an upstream system.
///
/// No schema is enforced: any key may be missing, `null`, or carry a value of
/// an unexpected JSON type. Lookups go through [`RawClaimRecord::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawClaimRecord(Map<String, Value>);

impl RawClaimRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`, if present and not `null`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Returns the first present value among `aliases`, most-preferred first.
    ///
    /// "Present" means the key exists and its value is not `null`. Falsy values
    /// such as `0`, `""` or `false` count as present.
    pub fn resolve(&self, aliases: &[&str]) -> Option<&Value> {
        aliases.iter().find_map(|key| self.get(key))
    }

    /// Inserts or replaces a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for RawClaimRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Value> for RawClaimRecord {
    /// Any non-object value yields an empty record.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

// ============ Canonical Models ============

/// Lifecycle status of a claim.
///
/// Upstream values outside the five known statuses are kept verbatim in
/// [`ClaimStatus::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClaimStatus {
    Submitted,
    Processing,
    Paid,
    Denied,
    Appealed,
    Unknown(String),
}

impl ClaimStatus {
    /// Parses an upstream wire value. Never fails.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "submitted" => ClaimStatus::Submitted,
            "processing" => ClaimStatus::Processing,
            "paid" => ClaimStatus::Paid,
            "denied" => ClaimStatus::Denied,
            "appealed" => ClaimStatus::Appealed,
            other => ClaimStatus::Unknown(other.to_string()),
        }
    }

    /// Wire representation of the status.
    pub fn as_str(&self) -> &str {
        match self {
            ClaimStatus::Submitted => "submitted",
            ClaimStatus::Processing => "processing",
            ClaimStatus::Paid => "paid",
            ClaimStatus::Denied => "denied",
            ClaimStatus::Appealed => "appealed",
            ClaimStatus::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ClaimStatus::Unknown(_))
    }

    /// Submitted or processing, i.e. still awaiting a payer decision.
    pub fn is_pending(&self) -> bool {
        matches!(self, ClaimStatus::Submitted | ClaimStatus::Processing)
    }
}

impl From<String> for ClaimStatus {
    fn from(raw: String) -> Self {
        ClaimStatus::parse(&raw)
    }
}

impl From<ClaimStatus> for String {
    fn from(status: ClaimStatus) -> Self {
        match status {
            ClaimStatus::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized reimbursement claim.
///
/// Built once by [`crate::normalizer::normalize_claim`] and never mutated;
/// `variance` is always `actual_reimbursement - expected_reimbursement`, or
/// `None` while the claim is unpaid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub procedure_code: String,
    pub procedure_name: String,
    pub date_of_service: String,
    pub billed_amount: f64,
    pub expected_reimbursement: f64,
    /// `None` until the payer has paid; `Some(0.0)` means paid zero dollars.
    pub actual_reimbursement: Option<f64>,
    /// `None` when the upstream record carries no status at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ClaimStatus>,
    pub payer_name: String,
    pub variance: Option<f64>,
    /// ISO-8601 submission timestamp.
    pub submitted_date: String,
}

impl From<&Claim> for RawClaimRecord {
    /// Re-keys a canonical claim into upstream alias keys.
    fn from(claim: &Claim) -> Self {
        let mut raw = RawClaimRecord::new();
        raw.insert("claim_id", claim.id.clone());
        raw.insert("patient_id", claim.patient_id.clone());
        raw.insert("patient_name", claim.patient_name.clone());
        raw.insert("procedure_code", claim.procedure_code.clone());
        raw.insert("procedure_name", claim.procedure_name.clone());
        raw.insert("date_of_service", claim.date_of_service.clone());
        raw.insert("billed_amount", claim.billed_amount);
        raw.insert("expected_reimbursement", claim.expected_reimbursement);
        raw.insert("actual_reimbursement", claim.actual_reimbursement);
        if let Some(status) = &claim.status {
            raw.insert("status", status.as_str());
        }
        raw.insert("payer_name", claim.payer_name.clone());
        raw.insert("submitted_date", claim.submitted_date.clone());
        raw
    }
}
