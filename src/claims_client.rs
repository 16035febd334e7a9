use crate::errors::AppError;
use crate::ingestion::{ingest_body, ClaimSource};
use crate::models::Claim;

/// Client for the claims backend.
///
/// Issues a single unauthenticated GET against `{base_url}/claims`. No retry,
/// no pagination: the full collection is fetched every time.
#[derive(Clone)]
pub struct ClaimsClient {
    client: reqwest::Client,
    base_url: String,
}

impl ClaimsClient {
    /// Creates a new `ClaimsClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the claims backend. A trailing `/` is dropped.
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().build().map_err(|e| {
            AppError::ExternalApiError(format!("Failed to create claims client: {}", e))
        })?;

        let mut base_url = base_url.into();
        if base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the claims collection.
    pub fn claims_url(&self) -> String {
        format!("{}/claims", self.base_url)
    }

    /// Fetches the raw response body of the claims collection.
    ///
    /// # Returns
    ///
    /// * `Result<serde_json::Value, AppError>` - The parsed JSON body, or
    ///   `AppError::Transport` when the backend answers with a non-2xx status.
    pub async fn fetch_raw(&self) -> Result<serde_json::Value, AppError> {
        let url = self.claims_url();
        tracing::info!("Fetching claims from backend: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Claims backend returned {}: {}", status, error_text);
            return Err(AppError::transport(status));
        }

        let data = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse claims response: {}", e))
        })?;

        Ok(data)
    }
}

impl ClaimSource for ClaimsClient {
    async fn fetch_claims(&self) -> Result<Vec<Claim>, AppError> {
        let body = self.fetch_raw().await?;
        let claims = ingest_body(body);
        tracing::info!("✓ Fetched {} claims from {}", claims.len(), self.base_url);
        Ok(claims)
    }
}
