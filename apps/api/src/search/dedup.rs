//! Deduplicator — collapses records that represent the same posting.
//!
//! Identity is the case-insensitive (title, company) pair. Dedup is
//! identity-based and order-preserving: the first record encountered wins,
//! regardless of score. Quality ordering happens later, in the ranker.

use std::collections::HashSet;

use crate::models::job::JobRecord;

/// Retains exactly one record per identity key, preserving the relative
/// order of first occurrence.
pub fn dedupe(records: Vec<JobRecord>) -> Vec<JobRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut unique = Vec::with_capacity(records.len());
    for record in records {
        if seen.insert(record.identity_key()) {
            unique.push(record);
        }
    }
    unique
}
