use crate::errors::{AppError, ResultExt};
use crate::ingestion::{ClaimFeed, ClaimSource};
use crate::models::Claim;
use crate::search::{ClaimFilter, ClaimQueryParams};
use crate::stats::ClaimStats;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Where claims come from (live backend or built-in fixtures).
    pub feed: ClaimFeed,
}

/// Builds the HTTP router with tracing and CORS layers applied.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/claims", get(list_claims))
        .route("/api/v1/claims/stats", get(claim_stats))
        .route("/api/v1/claims/:id", get(get_claim))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

/// Health check endpoint.
///
/// Returns the service status, version and the active claim source.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "claims-reconciler",
            "version": env!("CARGO_PKG_VERSION"),
            "source": state.feed.kind(),
        })),
    )
}

/// GET /api/v1/claims
///
/// Lists normalized claims, optionally narrowed by `q` (patient name,
/// procedure code or claim id) and `status`.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `params` - Query parameters with the search text and status filter.
///
/// # Returns
///
/// * `Result<Json<Vec<Claim>>, AppError>` - Matching claims in backend order, or
///   the transport error when the batch could not be fetched.
pub async fn list_claims(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ClaimQueryParams>,
) -> Result<Json<Vec<Claim>>, AppError> {
    tracing::info!("GET /claims - params: {:?}", params);

    let claims = state
        .feed
        .fetch_claims()
        .await
        .context("GET /api/v1/claims")?;

    let filter = ClaimFilter::from(&params);
    let matching: Vec<Claim> = filter.apply(&claims).into_iter().cloned().collect();

    tracing::info!("Showing {} of {} claims", matching.len(), claims.len());
    Ok(Json(matching))
}

/// GET /api/v1/claims/stats
///
/// Summary totals over the full, unfiltered batch.
pub async fn claim_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClaimStats>, AppError> {
    let claims = state
        .feed
        .fetch_claims()
        .await
        .context("GET /api/v1/claims/stats")?;

    Ok(Json(ClaimStats::from_claims(&claims)))
}

/// GET /api/v1/claims/:id
pub async fn get_claim(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Claim>, AppError> {
    tracing::info!("GET /claims/{}", id);

    state
        .feed
        .find_claim(&id)
        .await
        .with_context(|| format!("GET /api/v1/claims/{}", id))?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Claim with id {} not found", id)))
}
