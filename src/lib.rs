//! Claims Reconciler Library
//!
//! Ingests heterogeneous claim records from a claims backend, normalizes them
//! into a canonical [`models::Claim`] with a derived reimbursement variance,
//! and serves the result (plus search and summary figures) over HTTP.
//!
//! # Modules
//!
//! - `api`: API definitions.
//! - `core`: Core business logic.
//! - `integrations`: External service integrations.
//! - `claims_client`: Live claims backend client.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `fixtures`: Built-in sample claims.
//! - `handlers`: HTTP request handlers and router.
//! - `ingestion`: Batch extraction and the claim source abstraction.
//! - `models`: Raw and canonical claim models.
//! - `normalizer`: Field resolution, numeric coercion and claim normalization.
//! - `search`: Claim search and status filtering.
//! - `stats`: Summary figures over a claims batch.

pub mod api;
pub mod core;
pub mod integrations;

pub mod claims_client;
pub mod config;
pub mod errors;
pub mod fixtures;
pub mod handlers;
pub mod ingestion;
pub mod models;
pub mod normalizer;
pub mod search;
pub mod stats;

use crate::claims_client::ClaimsClient;
use crate::config::{Config, SourceMode};
use crate::errors::AppError;
use crate::fixtures::FixtureSource;
use crate::ingestion::ClaimFeed;

/// Selects and builds the claim source named by the configuration.
pub fn build_feed(config: &Config) -> Result<ClaimFeed, AppError> {
    match config.source_mode {
        SourceMode::Live => Ok(ClaimFeed::Live(ClaimsClient::new(config.api_url.clone())?)),
        SourceMode::Fixture => Ok(ClaimFeed::Fixture(FixtureSource::new(config.fixture_delay))),
    }
}
