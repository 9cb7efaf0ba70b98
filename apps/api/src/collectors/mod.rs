//! Collector contract and registry.
//!
//! A collector fetches raw candidate records from one external source.
//! Collectors are pure at the pipeline boundary: they return loosely-shaped
//! JSON objects and leave normalization, scoring, and filtering to the core.
//! Retry, pacing, and user-agent concerns live inside each collector, not in
//! the aggregator.

pub mod fixture;
pub mod remoteok;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::config::Config;
use crate::models::criteria::SearchCriteria;

/// Failure scoped to one source. Never aborts a run: the aggregator logs it
/// and records zero results for the source.
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Trait every job source implements.
///
/// "No results found" is `Ok(vec![])`, never an error.
#[async_trait]
pub trait Collector: Send + Sync {
    /// Stable source name, recorded on every record it produces.
    fn name(&self) -> &str;

    /// Base URL used to resolve relative record URLs.
    fn base_url(&self) -> &str;

    /// Fetch raw candidate records for a query/location.
    async fn collect(
        &self,
        query: &str,
        location: &str,
        criteria: &SearchCriteria,
    ) -> Result<Vec<Value>, CollectorError>;
}

/// Look up a collector implementation by name.
fn get_collector(name: &str, config: &Config) -> Option<Arc<dyn Collector>> {
    match name {
        "remoteok" => Some(Arc::new(remoteok::RemoteOkCollector::new(config))),
        "fixture" => Some(Arc::new(fixture::FixtureCollector)),
        _ => None,
    }
}

/// Resolves the enabled source names from config into collector instances,
/// preserving configuration order. Unknown names are skipped with a warning.
pub fn build_collectors(config: &Config) -> Vec<Arc<dyn Collector>> {
    let mut collectors = Vec::new();
    for name in &config.enabled_sources {
        match get_collector(name, config) {
            Some(collector) => collectors.push(collector),
            None => warn!("Unknown job source '{name}' in ENABLED_SOURCES, skipping"),
        }
    }
    collectors
}
