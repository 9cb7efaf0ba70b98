use serde::{Deserialize, Serialize};

/// Canonical job posting record. Every collector batch is normalized into
/// this shape before it enters the pipeline.
///
/// `relevance_score` is the only mutable-after-construction field: it is
/// recomputed by the scorer whenever the search criteria change, and always
/// clamped to [0, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Free-text salary. No numeric normalization is guaranteed.
    pub salary: String,
    /// Truncated to 500 characters at construction.
    pub description: String,
    /// Absolute URL. Relative paths are resolved against the collector's
    /// base URL during normalization.
    pub url: String,
    /// Name of the collector that produced this record.
    pub source: String,
    /// ISO date or free text — not guaranteed parseable.
    pub date_posted: String,
    /// Skills/tags side-list when the source provides one. May be empty.
    #[serde(default)]
    pub tags: Vec<String>,
    pub relevance_score: f32,
}

impl JobRecord {
    /// Dedup identity: case-insensitive (title, company) pair. Two records
    /// with the same key are the same posting regardless of source.
    pub fn identity_key(&self) -> (String, String) {
        (self.title.to_lowercase(), self.company.to_lowercase())
    }
}
