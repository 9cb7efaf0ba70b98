use serde::{Deserialize, Serialize};

use crate::errors::AppError;

fn default_max_results() -> usize {
    50
}

/// Per-run search configuration. Immutable for the duration of one run.
///
/// All fields have serde defaults so API callers can send a partial object
/// (or none at all) and still get a meaningful run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Relevant-term list from user config and/or the active query.
    /// Matches score +25 in title, +15 in description.
    #[serde(default)]
    pub search_terms: Vec<String>,
    /// Soft-boost keywords: +8 in title, +4 in description.
    #[serde(default)]
    pub preferred_keywords: Vec<String>,
    /// Hard-reject keywords: -20 per keyword during scoring, and any record
    /// containing one in title or description is dropped by the filter.
    #[serde(default)]
    pub excluded_keywords: Vec<String>,
    /// Records scoring strictly below this are dropped.
    #[serde(default)]
    pub min_relevance_score: f32,
    /// Final result set is truncated to this many records.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            search_terms: Vec::new(),
            preferred_keywords: Vec::new(),
            excluded_keywords: Vec::new(),
            min_relevance_score: 0.0,
            max_results: default_max_results(),
        }
    }
}

impl SearchCriteria {
    /// Rejects configurations that would silently produce a meaningless run.
    /// Called before any collector is started.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.max_results == 0 {
            return Err(AppError::Configuration(
                "max_results must be at least 1".to_string(),
            ));
        }
        if !self.min_relevance_score.is_finite()
            || !(0.0..=100.0).contains(&self.min_relevance_score)
        {
            return Err(AppError::Configuration(format!(
                "min_relevance_score must be within [0, 100], got {}",
                self.min_relevance_score
            )));
        }
        for term in self
            .search_terms
            .iter()
            .chain(&self.preferred_keywords)
            .chain(&self.excluded_keywords)
        {
            if term.trim().is_empty() {
                return Err(AppError::Configuration(
                    "keyword lists must not contain empty terms".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_criteria_is_valid() {
        assert!(SearchCriteria::default().validate().is_ok());
    }

    #[test]
    fn test_default_max_results_is_50() {
        assert_eq!(SearchCriteria::default().max_results, 50);
    }

    #[test]
    fn test_zero_max_results_rejected() {
        let criteria = SearchCriteria {
            max_results: 0,
            ..Default::default()
        };
        assert!(criteria.validate().is_err());
    }

    #[test]
    fn test_out_of_range_min_score_rejected() {
        let criteria = SearchCriteria {
            min_relevance_score: 101.0,
            ..Default::default()
        };
        assert!(criteria.validate().is_err());

        let criteria = SearchCriteria {
            min_relevance_score: -1.0,
            ..Default::default()
        };
        assert!(criteria.validate().is_err());
    }

    #[test]
    fn test_nan_min_score_rejected() {
        let criteria = SearchCriteria {
            min_relevance_score: f32::NAN,
            ..Default::default()
        };
        assert!(criteria.validate().is_err());
    }

    #[test]
    fn test_empty_keyword_rejected() {
        let criteria = SearchCriteria {
            excluded_keywords: vec!["intern".to_string(), "  ".to_string()],
            ..Default::default()
        };
        assert!(criteria.validate().is_err());
    }

    #[test]
    fn test_partial_json_deserializes_with_defaults() {
        let criteria: SearchCriteria =
            serde_json::from_str(r#"{"search_terms": ["unity"]}"#).unwrap();
        assert_eq!(criteria.search_terms, vec!["unity"]);
        assert_eq!(criteria.max_results, 50);
        assert_eq!(criteria.min_relevance_score, 0.0);
    }
}
