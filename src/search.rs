use crate::models::{Claim, ClaimStatus};
use serde::Deserialize;

/// Which statuses a listing should include.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ClaimStatus),
}

impl StatusFilter {
    /// `"all"` (or blank) keeps every claim; anything else matches one status.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "all" => StatusFilter::All,
            other => StatusFilter::Only(ClaimStatus::parse(other)),
        }
    }

    /// A claim with no status only passes `All`.
    pub fn matches(&self, status: Option<&ClaimStatus>) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => status == Some(wanted),
        }
    }
}

/// Query string accepted by the claims listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClaimQueryParams {
    /// Free-text search.
    pub q: Option<String>,
    /// Status filter, `all` by default.
    pub status: Option<String>,
}

/// Client-side search over a claims listing.
#[derive(Debug, Clone, Default)]
pub struct ClaimFilter {
    query: String,
    status: StatusFilter,
}

impl ClaimFilter {
    pub fn new(query: &str, status: StatusFilter) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            status,
        }
    }

    /// True when the claim's patient name, procedure code or id contains the
    /// query (case-insensitively) and its status passes the filter.
    pub fn matches(&self, claim: &Claim) -> bool {
        let matches_search = self.query.is_empty()
            || [&claim.patient_name, &claim.procedure_code, &claim.id]
                .iter()
                .any(|field| field.to_lowercase().contains(&self.query));

        matches_search && self.status.matches(claim.status.as_ref())
    }

    /// Keeps matching claims in their original order.
    pub fn apply<'a>(&self, claims: &'a [Claim]) -> Vec<&'a Claim> {
        claims.iter().filter(|claim| self.matches(claim)).collect()
    }
}

impl From<&ClaimQueryParams> for ClaimFilter {
    fn from(params: &ClaimQueryParams) -> Self {
        let status = params
            .status
            .as_deref()
            .map(StatusFilter::parse)
            .unwrap_or_default();
        ClaimFilter::new(params.q.as_deref().unwrap_or(""), status)
    }
}
