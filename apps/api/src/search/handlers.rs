use std::time::Duration;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::criteria::SearchCriteria;
use crate::models::job::JobRecord;
use crate::report::{write_reports, ReportFormat};
use crate::search::aggregate::{run_search, SourceReport};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub criteria: SearchCriteria,
    /// Report files to write for this run, if any.
    #[serde(default)]
    pub save_formats: Vec<ReportFormat>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub jobs: Vec<JobRecord>,
    pub sources: Vec<SourceReport>,
    pub saved_reports: Vec<String>,
}

/// POST /api/v1/search
pub async fn handle_search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let outcome = run_search(
        &state.collectors,
        &req.query,
        &req.location,
        &req.criteria,
        &state.tables,
        Duration::from_secs(state.config.collector_timeout_secs),
    )
    .await?;

    let saved_reports = write_reports(&outcome, &req.save_formats, &state.config.results_dir)?
        .into_iter()
        .map(|p| p.display().to_string())
        .collect();

    Ok(Json(SearchResponse {
        run_id: outcome.run_id,
        generated_at: outcome.generated_at,
        total: outcome.jobs.len(),
        jobs: outcome.jobs,
        sources: outcome.sources,
        saved_reports,
    }))
}

/// GET /api/v1/sources
pub async fn handle_list_sources(State(state): State<AppState>) -> Json<Value> {
    let sources: Vec<&str> = state.collectors.iter().map(|c| c.name()).collect();
    Json(json!({ "sources": sources }))
}
