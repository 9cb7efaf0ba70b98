//! Aggregator/Ranker — owns the end-to-end pipeline order and the final
//! contract handed to reporting consumers.
//!
//! Collectors run concurrently, one task each, with an independent failure
//! domain: an error or timeout in one source contributes zero records and
//! never aborts the run. Everything after collection is a synchronous,
//! order-sensitive transform over an in-memory sequence.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::time::timeout;
use tracing::{info, warn};
use uuid::Uuid;

use crate::collectors::Collector;
use crate::errors::AppError;
use crate::models::criteria::SearchCriteria;
use crate::models::job::JobRecord;
use crate::search::scoring::ScoringTables;
use crate::search::{dedup, filter, normalize, scoring};

/// Per-source outcome, returned alongside the results so callers can see
/// which sources contributed zero records.
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub source: String,
    pub records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The sole artifact handed to external reporting consumers: a ranked,
/// deduplicated, bounded record set plus per-source accounting.
#[derive(Debug, Serialize)]
pub struct SearchOutcome {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub jobs: Vec<JobRecord>,
    pub sources: Vec<SourceReport>,
}

/// Runs the full pipeline:
/// collect → normalize → score → merge → dedup → filter → sort → truncate.
///
/// Criteria and term tables are validated up front — a bad configuration is
/// the only error this function surfaces, and it is raised before any
/// collector starts.
pub async fn run_search(
    collectors: &[Arc<dyn Collector>],
    query: &str,
    location: &str,
    criteria: &SearchCriteria,
    tables: &ScoringTables,
    collector_timeout: Duration,
) -> Result<SearchOutcome, AppError> {
    criteria.validate()?;
    tables.validate()?;

    let mut handles = Vec::with_capacity(collectors.len());
    for collector in collectors {
        let collector = Arc::clone(collector);
        let query = query.to_string();
        let location = location.to_string();
        let criteria = criteria.clone();
        handles.push(tokio::spawn(async move {
            timeout(
                collector_timeout,
                collector.collect(&query, &location, &criteria),
            )
            .await
        }));
    }

    let mut merged: Vec<JobRecord> = Vec::new();
    let mut sources = Vec::with_capacity(collectors.len());

    // Await in configuration order: merge order (and therefore downstream
    // tie-breaking) must be deterministic.
    for (collector, handle) in collectors.iter().zip(handles) {
        let name = collector.name().to_string();
        let batch: Result<Vec<Value>, String> = match handle.await {
            Ok(Ok(Ok(batch))) => Ok(batch),
            Ok(Ok(Err(e))) => Err(e.to_string()),
            Ok(Err(_)) => Err(format!(
                "timed out after {}s",
                collector_timeout.as_secs()
            )),
            Err(e) => Err(format!("collector task panicked: {e}")),
        };

        match batch {
            Ok(raw_batch) => {
                let mut records: Vec<JobRecord> = raw_batch
                    .iter()
                    .map(|raw| {
                        normalize::normalize_record(raw, collector.name(), collector.base_url())
                    })
                    .collect();
                scoring::score_batch(&mut records, criteria, tables);
                sources.push(SourceReport {
                    source: name,
                    records: records.len(),
                    error: None,
                });
                merged.extend(records);
            }
            Err(message) => {
                warn!("Collector '{name}' contributed zero records: {message}");
                sources.push(SourceReport {
                    source: name,
                    records: 0,
                    error: Some(message),
                });
            }
        }
    }

    let collected = merged.len();
    let mut jobs = filter::apply(dedup::dedupe(merged), criteria);

    // Stable sort: equal scores keep their post-dedup relative order.
    jobs.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    jobs.truncate(criteria.max_results);

    info!(
        "Search complete: {} raw records from {} sources, {} after dedup/filter/truncate",
        collected,
        sources.len(),
        jobs.len()
    );

    Ok(SearchOutcome {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        jobs,
        sources,
    })
}
