//! RemoteOK collector — fetches the public JSON feed at remoteok.com/api.
//!
//! The feed is not query-addressable: it returns the latest postings, with a
//! metadata/legal notice as the first array element. We filter client-side
//! against the query terms and hand back raw objects; record URLs are
//! emitted as relative paths for the normalizer to resolve.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::Config;
use crate::models::criteria::SearchCriteria;

use super::{Collector, CollectorError};

const API_URL: &str = "https://remoteok.com/api";
const BASE_URL: &str = "https://remoteok.com";
const HTTP_TIMEOUT: Duration = Duration::from_secs(20);

pub struct RemoteOkCollector {
    client: reqwest::Client,
    request_delay: Duration,
    max_jobs: usize,
}

impl RemoteOkCollector {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(HTTP_TIMEOUT)
                .user_agent(config.user_agent.clone())
                .build()
                .expect("Failed to build HTTP client"),
            request_delay: Duration::from_millis(config.request_delay_ms),
            max_jobs: config.max_jobs_per_source,
        }
    }
}

#[async_trait]
impl Collector for RemoteOkCollector {
    fn name(&self) -> &str {
        "remoteok"
    }

    fn base_url(&self) -> &str {
        BASE_URL
    }

    async fn collect(
        &self,
        query: &str,
        _location: &str,
        criteria: &SearchCriteria,
    ) -> Result<Vec<Value>, CollectorError> {
        // Respectful spacing before each outbound call.
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }

        let payload: Value = self
            .client
            .get(API_URL)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let terms = match_terms(query, criteria);
        let jobs = prepare_jobs(payload, &terms, self.max_jobs)?;
        debug!("remoteok returned {} candidate records", jobs.len());
        Ok(jobs)
    }
}

/// Lowercased terms the feed is matched against: the active query words plus
/// the configured search terms.
fn match_terms(query: &str, criteria: &SearchCriteria) -> Vec<String> {
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .chain(criteria.search_terms.iter().map(|t| t.to_lowercase()))
        .collect()
}

/// Strips the feed's metadata element, filters by terms, caps the batch, and
/// attaches a relative record URL built from the posting id.
fn prepare_jobs(
    payload: Value,
    terms: &[String],
    max_jobs: usize,
) -> Result<Vec<Value>, CollectorError> {
    let items = payload
        .as_array()
        .ok_or_else(|| CollectorError::Malformed("expected a JSON array".to_string()))?;

    let jobs = items
        .iter()
        // The first element is usually a legal/metadata notice, not a job.
        .skip_while(|item| item.get("legal").is_some())
        .filter(|item| item.is_object() && matches_any_term(item, terms))
        .take(max_jobs)
        .cloned()
        .map(attach_record_url)
        .collect();

    Ok(jobs)
}

fn matches_any_term(item: &Value, terms: &[String]) -> bool {
    if terms.is_empty() {
        return true;
    }
    let position = lower_str(item, "position");
    let description = lower_str(item, "description");
    let tags: Vec<String> = item
        .get("tags")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::to_lowercase)
                .collect()
        })
        .unwrap_or_default();

    terms.iter().any(|term| {
        position.contains(term)
            || description.contains(term)
            || tags.iter().any(|tag| tag.contains(term))
    })
}

fn lower_str(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_lowercase()
}

/// Adds a relative `url` built from the posting id. The normalizer resolves
/// it against this collector's base URL; records without an id fall back to
/// the site root there.
fn attach_record_url(mut item: Value) -> Value {
    let id = match item.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    if let (Some(id), Some(obj)) = (id, item.as_object_mut()) {
        obj.entry("url")
            .or_insert_with(|| json!(format!("/remote-jobs/{id}")));
    }
    item
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed() -> Value {
        json!([
            {"legal": "API terms..."},
            {"id": 101, "position": "Unity Developer", "company": "Acme",
             "description": "Build games", "tags": ["unity", "c#"]},
            {"id": "202", "position": "Data Analyst", "company": "Globex",
             "description": "Dashboards", "tags": ["sql"]},
            {"id": 303, "position": "Frontend Engineer", "company": "Initech",
             "description": "React apps", "tags": ["react"]}
        ])
    }

    fn terms(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_metadata_element_is_skipped() {
        let jobs = prepare_jobs(feed(), &[], 50).unwrap();
        assert_eq!(jobs.len(), 3);
        assert!(jobs.iter().all(|j| j.get("legal").is_none()));
    }

    #[test]
    fn test_terms_filter_matches_position_and_tags() {
        let jobs = prepare_jobs(feed(), &terms(&["unity"]), 50).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0]["position"], "Unity Developer");

        let jobs = prepare_jobs(feed(), &terms(&["react"]), 50).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0]["position"], "Frontend Engineer");
    }

    #[test]
    fn test_empty_terms_keep_everything() {
        let jobs = prepare_jobs(feed(), &[], 50).unwrap();
        assert_eq!(jobs.len(), 3);
    }

    #[test]
    fn test_batch_capped_at_max_jobs() {
        let jobs = prepare_jobs(feed(), &[], 2).unwrap();
        assert_eq!(jobs.len(), 2);
    }

    #[test]
    fn test_relative_url_attached_from_numeric_and_string_ids() {
        let jobs = prepare_jobs(feed(), &[], 50).unwrap();
        assert_eq!(jobs[0]["url"], "/remote-jobs/101");
        assert_eq!(jobs[1]["url"], "/remote-jobs/202");
    }

    #[test]
    fn test_existing_url_not_overwritten() {
        let payload = json!([{"id": 7, "position": "Dev", "url": "https://remoteok.com/x"}]);
        let jobs = prepare_jobs(payload, &[], 50).unwrap();
        assert_eq!(jobs[0]["url"], "https://remoteok.com/x");
    }

    #[test]
    fn test_non_array_payload_is_malformed() {
        let result = prepare_jobs(json!({"oops": true}), &[], 50);
        assert!(matches!(result, Err(CollectorError::Malformed(_))));
    }

    #[test]
    fn test_match_terms_combines_query_and_criteria() {
        let criteria = SearchCriteria {
            search_terms: vec!["Unity".to_string()],
            ..Default::default()
        };
        let terms = match_terms("Web Developer", &criteria);
        assert_eq!(terms, vec!["web", "developer", "unity"]);
    }
}
