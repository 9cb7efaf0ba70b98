//! Relevance Scorer — additive, clamped keyword scoring for job records.
//!
//! The scorer is pure and deterministic: identical (record, criteria,
//! tables) inputs always produce the same score. Domain vocabularies are
//! data, not code — new term tables are added through configuration, never
//! by editing this module.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::criteria::SearchCriteria;
use crate::models::job::JobRecord;

// ────────────────────────────────────────────────────────────────────────────
// Fixed weights for the criteria-driven part of the score
// ────────────────────────────────────────────────────────────────────────────

/// Search term present in the title.
const SEARCH_TERM_TITLE_POINTS: f32 = 25.0;
/// Search term present in the description. Independent of the title bonus —
/// both can apply for the same term.
const SEARCH_TERM_DESCRIPTION_POINTS: f32 = 15.0;
/// Preferred keyword in the title. Lower weight than explicit search terms.
const PREFERRED_TITLE_POINTS: f32 = 8.0;
const PREFERRED_DESCRIPTION_POINTS: f32 = 4.0;
/// Penalty per excluded keyword found in title or description. Applied once
/// per keyword, not once per field.
const EXCLUDED_PENALTY_POINTS: f32 = 20.0;

pub const MIN_SCORE: f32 = 0.0;
pub const MAX_SCORE: f32 = 100.0;

// ────────────────────────────────────────────────────────────────────────────
// Domain term tables (configuration input)
// ────────────────────────────────────────────────────────────────────────────

/// One domain vocabulary: a term set with its title/description weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermTable {
    pub title_weight: f32,
    pub description_weight: f32,
    pub terms: Vec<String>,
}

/// Named collection of term tables, e.g. `{"gaming": ..., "web": ...}`.
/// BTreeMap keeps iteration order stable across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringTables(pub BTreeMap<String, TermTable>);

impl ScoringTables {
    /// Compiled-in default vocabularies for common job domains. Overridable
    /// wholesale via SCORING_TABLES_PATH.
    pub fn builtin() -> Self {
        let mut tables = BTreeMap::new();
        tables.insert(
            "gaming".to_string(),
            TermTable {
                title_weight: 20.0,
                description_weight: 10.0,
                terms: strings(&["unity", "unreal", "game", "c#", "csharp", "gamedev"]),
            },
        );
        tables.insert(
            "web".to_string(),
            TermTable {
                title_weight: 15.0,
                description_weight: 8.0,
                terms: strings(&[
                    "react",
                    "javascript",
                    "typescript",
                    "frontend",
                    "backend",
                    "full stack",
                    "node",
                    "vue",
                    "angular",
                ]),
            },
        );
        tables.insert(
            "general".to_string(),
            TermTable {
                title_weight: 5.0,
                description_weight: 3.0,
                terms: strings(&["developer", "engineer", "software", "programmer"]),
            },
        );
        Self(tables)
    }

    /// Loads tables from a JSON file. Used at startup; a malformed file is
    /// fatal, since it would otherwise silently produce a score-0 run.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read scoring tables from {}", path.display()))?;
        let tables: ScoringTables = serde_json::from_str(&raw)
            .with_context(|| format!("invalid scoring tables in {}", path.display()))?;
        tables
            .validate()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("invalid scoring tables in {}", path.display()))?;
        Ok(tables)
    }

    /// Rejects weight tables that would corrupt scoring.
    pub fn validate(&self) -> Result<(), AppError> {
        for (name, table) in &self.0 {
            for weight in [table.title_weight, table.description_weight] {
                if !weight.is_finite() || weight < 0.0 {
                    return Err(AppError::Configuration(format!(
                        "term table '{name}' has an invalid weight: {weight}"
                    )));
                }
            }
            if table.terms.iter().any(|t| t.trim().is_empty()) {
                return Err(AppError::Configuration(format!(
                    "term table '{name}' contains an empty term"
                )));
            }
        }
        Ok(())
    }
}

fn strings(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Computes the relevance score for one record under the given criteria and
/// term tables. The raw sum is clamped to [0, 100] exactly once, at the end.
pub fn score_record(
    record: &JobRecord,
    criteria: &SearchCriteria,
    tables: &ScoringTables,
) -> f32 {
    let title = record.title.to_lowercase();
    let description = record.description.to_lowercase();
    let tags: Vec<String> = record.tags.iter().map(|t| t.to_lowercase()).collect();

    // The tags side-list counts as description-level evidence.
    let in_description =
        |term: &str| description.contains(term) || tags.iter().any(|t| t.contains(term));

    let mut score = 0.0_f32;

    for term in &criteria.search_terms {
        let term = term.to_lowercase();
        if title.contains(&term) {
            score += SEARCH_TERM_TITLE_POINTS;
        }
        if in_description(&term) {
            score += SEARCH_TERM_DESCRIPTION_POINTS;
        }
    }

    for keyword in &criteria.preferred_keywords {
        let keyword = keyword.to_lowercase();
        if title.contains(&keyword) {
            score += PREFERRED_TITLE_POINTS;
        }
        if in_description(&keyword) {
            score += PREFERRED_DESCRIPTION_POINTS;
        }
    }

    for table in tables.0.values() {
        for term in &table.terms {
            let term = term.to_lowercase();
            if title.contains(&term) {
                score += table.title_weight;
            }
            if in_description(&term) {
                score += table.description_weight;
            }
        }
    }

    for keyword in &criteria.excluded_keywords {
        let keyword = keyword.to_lowercase();
        if title.contains(&keyword) || in_description(&keyword) {
            score -= EXCLUDED_PENALTY_POINTS;
        }
    }

    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Scores a batch in place.
pub fn score_batch(records: &mut [JobRecord], criteria: &SearchCriteria, tables: &ScoringTables) {
    for record in records {
        record.relevance_score = score_record(record, criteria, tables);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(title: &str, description: &str) -> JobRecord {
        JobRecord {
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            salary: "Salary not specified".to_string(),
            description: description.to_string(),
            url: "https://example.com/1".to_string(),
            source: "test".to_string(),
            date_posted: "2024-01-01".to_string(),
            tags: vec![],
            relevance_score: 0.0,
        }
    }

    fn criteria_with_terms(terms: &[&str]) -> SearchCriteria {
        SearchCriteria {
            search_terms: terms.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_title_and_description_bonuses_are_additive() {
        let record = make_record("Unity Developer", "unity c# game");
        let score = score_record(
            &record,
            &criteria_with_terms(&["unity"]),
            &ScoringTables::default(),
        );
        // 25 (title) + 15 (description), both apply for the same term.
        assert_eq!(score, 40.0);
    }

    #[test]
    fn test_no_matches_scores_exactly_zero() {
        let record = make_record("Gardener", "prune hedges");
        let score = score_record(
            &record,
            &criteria_with_terms(&["unity"]),
            &ScoringTables::default(),
        );
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_empty_search_terms_still_scores_preferred() {
        let record = make_record("Remote Developer", "work with rust");
        let criteria = SearchCriteria {
            preferred_keywords: vec!["remote".to_string(), "rust".to_string()],
            ..Default::default()
        };
        let score = score_record(&record, &criteria, &ScoringTables::default());
        // "remote": 8 (title); "rust": 4 (description).
        assert_eq!(score, 12.0);
    }

    #[test]
    fn test_excluded_keyword_penalty_applied_once_per_keyword() {
        let record = make_record("Unity Intern", "unity internship position");
        let mut criteria = criteria_with_terms(&["unity"]);
        criteria.excluded_keywords = vec!["intern".to_string()];
        let score = score_record(&record, &criteria, &ScoringTables::default());
        // 25 + 15 - 20: one penalty even though "intern" appears in both fields.
        assert_eq!(score, 20.0);
    }

    #[test]
    fn test_score_never_below_zero() {
        let record = make_record("Intern", "intern intern intern");
        let criteria = SearchCriteria {
            excluded_keywords: vec!["intern".to_string(), "tern".to_string()],
            ..Default::default()
        };
        let score = score_record(&record, &criteria, &ScoringTables::default());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_score_clamped_to_100() {
        let stacked = "unity unreal game c# csharp gamedev react javascript";
        let record = make_record(stacked, stacked);
        let criteria = criteria_with_terms(&["unity", "game", "react", "c#"]);
        let score = score_record(&record, &criteria, &ScoringTables::builtin());
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_term_tables_contribute_configured_weights() {
        let mut tables = BTreeMap::new();
        tables.insert(
            "gaming".to_string(),
            TermTable {
                title_weight: 20.0,
                description_weight: 10.0,
                terms: vec!["unity".to_string()],
            },
        );
        let record = make_record("Unity Developer", "unity shop");
        let score = score_record(
            &record,
            &SearchCriteria::default(),
            &ScoringTables(tables),
        );
        assert_eq!(score, 30.0);
    }

    #[test]
    fn test_tag_match_counts_as_description_evidence() {
        let mut record = make_record("Developer", "no keywords here");
        record.tags = vec!["Unity".to_string()];
        let score = score_record(
            &record,
            &criteria_with_terms(&["unity"]),
            &ScoringTables::default(),
        );
        assert_eq!(score, SEARCH_TERM_DESCRIPTION_POINTS);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let record = make_record("UNITY DEVELOPER", "Unity and C#");
        let score = score_record(
            &record,
            &criteria_with_terms(&["unity"]),
            &ScoringTables::default(),
        );
        assert_eq!(score, 40.0);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let record = make_record("Unity Developer", "unity c# game");
        let criteria = criteria_with_terms(&["unity", "game"]);
        let tables = ScoringTables::builtin();
        let first = score_record(&record, &criteria, &tables);
        for _ in 0..10 {
            assert_eq!(score_record(&record, &criteria, &tables), first);
        }
    }

    #[test]
    fn test_score_batch_sets_scores_in_place() {
        let mut records = vec![
            make_record("Unity Developer", "unity"),
            make_record("Gardener", "hedges"),
        ];
        score_batch(
            &mut records,
            &criteria_with_terms(&["unity"]),
            &ScoringTables::default(),
        );
        assert_eq!(records[0].relevance_score, 40.0);
        assert_eq!(records[1].relevance_score, 0.0);
    }

    #[test]
    fn test_builtin_tables_are_valid() {
        assert!(ScoringTables::builtin().validate().is_ok());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut tables = BTreeMap::new();
        tables.insert(
            "bad".to_string(),
            TermTable {
                title_weight: -5.0,
                description_weight: 1.0,
                terms: vec!["x".to_string()],
            },
        );
        assert!(ScoringTables(tables).validate().is_err());
    }

    #[test]
    fn test_nan_weight_rejected() {
        let mut tables = BTreeMap::new();
        tables.insert(
            "bad".to_string(),
            TermTable {
                title_weight: f32::NAN,
                description_weight: 1.0,
                terms: vec!["x".to_string()],
            },
        );
        assert!(ScoringTables(tables).validate().is_err());
    }

    #[test]
    fn test_empty_term_rejected() {
        let mut tables = BTreeMap::new();
        tables.insert(
            "bad".to_string(),
            TermTable {
                title_weight: 1.0,
                description_weight: 1.0,
                terms: vec!["".to_string()],
            },
        );
        assert!(ScoringTables(tables).validate().is_err());
    }

    #[test]
    fn test_tables_round_trip_through_json() {
        let tables = ScoringTables::builtin();
        let json = serde_json::to_string(&tables).unwrap();
        let back: ScoringTables = serde_json::from_str(&json).unwrap();
        assert_eq!(back.0.len(), tables.0.len());
        assert!(back.0.contains_key("gaming"));
    }
}
