//! Maps heterogeneous upstream claim records onto the canonical [`Claim`].
//!
//! Normalization never fails. Every field degrades to a documented default
//! (empty string, zero, or `None`) so one bad record cannot abort a batch.

use crate::models::{Claim, ClaimStatus, RawClaimRecord};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

const ID_KEYS: &[&str] = &["claim_id", "id"];
const PATIENT_ID_KEY: &str = "patient_id";
const PATIENT_NAME_KEYS: &[&str] = &["patient", "patient_name"];
const PROCEDURE_CODE_KEYS: &[&str] = &["procedure_code", "procedureCode", "cpt_code", "cptCode"];
const PROCEDURE_NAME_KEYS: &[&str] = &["procedure_name", "procedureName"];
const DATE_OF_SERVICE_KEYS: &[&str] = &["date_of_service", "dateOfService"];
const BILLED_KEYS: &[&str] = &["billed_amount", "billedAmount", "billed"];
const EXPECTED_KEYS: &[&str] = &[
    "expected",
    "expected_reimbursement",
    "expectedReimbursement",
    "expected_reimbursement_amount",
];
const ACTUAL_KEYS: &[&str] = &["actual", "actual_reimbursement", "actualReimbursement"];
const STATUS_KEY: &str = "status";
const PAYER_KEYS: &[&str] = &["payer", "payer_name", "payerName"];
const SUBMITTED_KEYS: &[&str] = &["submitted_date", "created_at", "date_of_service"];

/// Renders a JSON value as display text.
///
/// Integers print without a fraction, so `150.0` becomes `"150"`. Very large
/// and very small magnitudes switch to exponent form (`"1e+21"`, `"1.5e-7"`).
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                n.as_f64().map(format_number).unwrap_or_default()
            }
        }
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Shortest round-trip decimal, in exponent form outside `[1e-6, 1e21)`.
fn format_number(n: f64) -> String {
    let magnitude = n.abs();
    if n == 0.0 || (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }

    let text = format!("{:e}", n);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

fn resolve_string(raw: &RawClaimRecord, aliases: &[&str]) -> String {
    raw.resolve(aliases).map(stringify).unwrap_or_default()
}

/// Parses numeric text, returning `None` for anything that is not a finite number.
///
/// Blank text reads as zero. Unsigned `0x`, `0o` and `0b` integer literals are
/// accepted alongside ordinary decimal and exponent notation.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        // No sign after the prefix; from_str_radix would accept "0x+1F".
        let digits = &trimmed[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
    }

    // f64's parser also accepts "inf" and "NaN" spellings.
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn lexical_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => parse_numeric(s),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Coerces a possibly-absent value to a finite number, defaulting to `0`.
pub fn coerce_to_zero(value: Option<&Value>) -> f64 {
    value.and_then(lexical_number).unwrap_or(0.0)
}

/// Coerces a possibly-absent value to a finite number.
///
/// Absent values and values that do not convert both yield `None`; a present
/// zero stays `Some(0.0)`.
pub fn coerce_to_nullable(value: Option<&Value>) -> Option<f64> {
    match value {
        None | Some(Value::Null) => None,
        Some(v) => lexical_number(v),
    }
}

/// `actual - expected`, or `None` while nothing has been paid.
pub fn compute_variance(actual: Option<f64>, expected: f64) -> Option<f64> {
    actual.map(|paid| paid - expected)
}

/// ISO-8601 form used for fallback submission dates, e.g. `2024-11-16T08:00:00.000Z`.
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Normalizes one upstream record, using the current time when the record
/// carries no submission date.
pub fn normalize_claim(raw: &RawClaimRecord) -> Claim {
    normalize_claim_at(raw, Utc::now())
}

/// Normalizes one upstream record against an explicit fallback clock.
pub fn normalize_claim_at(raw: &RawClaimRecord, now: DateTime<Utc>) -> Claim {
    let id = resolve_string(raw, ID_KEYS);

    let expected_reimbursement = coerce_to_zero(raw.resolve(EXPECTED_KEYS));
    let actual_reimbursement = coerce_to_nullable(raw.resolve(ACTUAL_KEYS));

    let status = raw
        .get(STATUS_KEY)
        .map(|value| ClaimStatus::parse(&stringify(value)));
    if let Some(unknown) = status.as_ref().filter(|s| !s.is_known()) {
        tracing::warn!(
            claim_id = %id,
            raw_status = %unknown,
            "Claim has unrecognized status; keeping it as unknown"
        );
    }

    let submitted_date = raw
        .resolve(SUBMITTED_KEYS)
        .map(stringify)
        .unwrap_or_else(|| format_timestamp(now));

    Claim {
        patient_id: raw.get(PATIENT_ID_KEY).map(stringify).unwrap_or_default(),
        patient_name: resolve_string(raw, PATIENT_NAME_KEYS),
        procedure_code: resolve_string(raw, PROCEDURE_CODE_KEYS),
        procedure_name: resolve_string(raw, PROCEDURE_NAME_KEYS),
        date_of_service: resolve_string(raw, DATE_OF_SERVICE_KEYS),
        billed_amount: coerce_to_zero(raw.resolve(BILLED_KEYS)),
        expected_reimbursement,
        actual_reimbursement,
        status,
        payer_name: resolve_string(raw, PAYER_KEYS),
        variance: compute_variance(actual_reimbursement, expected_reimbursement),
        submitted_date,
        id,
    }
}
