//! Fixture collector — deterministic sample postings for development runs
//! and pipeline tests. No network, never fails.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::models::criteria::SearchCriteria;

use super::{Collector, CollectorError};

const BASE_URL: &str = "https://jobs.example.com";

pub struct FixtureCollector;

#[async_trait]
impl Collector for FixtureCollector {
    fn name(&self) -> &str {
        "fixture"
    }

    fn base_url(&self) -> &str {
        BASE_URL
    }

    async fn collect(
        &self,
        query: &str,
        location: &str,
        _criteria: &SearchCriteria,
    ) -> Result<Vec<Value>, CollectorError> {
        let role = if query.trim().is_empty() {
            "Developer"
        } else {
            query.trim()
        };
        let location = if location.trim().is_empty() {
            "Remote"
        } else {
            location.trim()
        };

        Ok(vec![
            json!({
                "title": format!("Senior {role}"),
                "company": "Tech Corp",
                "location": location,
                "salary": "$80,000 - $120,000",
                "description": format!(
                    "We are looking for a skilled {role} to join our team. \
                     Experience with modern frameworks required."
                ),
                "url": "/job/1",
            }),
            json!({
                "title": format!("{role} - Remote"),
                "company": "StartupXYZ",
                "location": "Remote",
                "salary": "$90,000 - $130,000",
                "description": format!(
                    "Remote {role} position with flexible hours and great benefits."
                ),
                "url": "/job/2",
            }),
            json!({
                "title": format!("Lead {role}"),
                "company": "Enterprise Solutions",
                "location": location,
                "salary": "$110,000 - $150,000",
                "description": format!(
                    "Leadership role for an experienced {role}. Manage a team while \
                     working on cutting-edge projects."
                ),
                "url": "/job/3",
            }),
        ])
    }
}
