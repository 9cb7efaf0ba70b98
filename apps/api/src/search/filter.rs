//! Filter Engine — hard rejection rules applied after dedup.
//!
//! Rejection is routine, not a failure: dropped records are simply absent
//! from the result set, with no per-record logging.

use crate::models::criteria::SearchCriteria;
use crate::models::job::JobRecord;

/// Drops records containing an excluded keyword in title or description,
/// and records scoring strictly below the configured minimum.
pub fn apply(records: Vec<JobRecord>, criteria: &SearchCriteria) -> Vec<JobRecord> {
    records
        .into_iter()
        .filter(|record| {
            !contains_excluded(record, &criteria.excluded_keywords)
                && record.relevance_score >= criteria.min_relevance_score
        })
        .collect()
}

fn contains_excluded(record: &JobRecord, excluded: &[String]) -> bool {
    if excluded.is_empty() {
        return false;
    }
    let title = record.title.to_lowercase();
    let description = record.description.to_lowercase();
    excluded.iter().any(|keyword| {
        let keyword = keyword.to_lowercase();
        title.contains(&keyword) || description.contains(&keyword)
    })
}
