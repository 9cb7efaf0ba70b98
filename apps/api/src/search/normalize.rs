//! Record Model — turns heterogeneous raw collector output into a
//! well-formed `JobRecord`.
//!
//! Collectors return loosely-shaped JSON objects; nothing here ever fails.
//! Missing fields resolve to documented sentinels, overlong descriptions are
//! truncated, and relative URLs are resolved against the collector's base
//! URL.

use serde_json::Value;

use crate::models::job::JobRecord;

pub const UNKNOWN_TITLE: &str = "Unknown Position";
pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const UNKNOWN_LOCATION: &str = "Not specified";
pub const UNKNOWN_SALARY: &str = "Salary not specified";
pub const UNKNOWN_DATE: &str = "Unknown";

/// Description length cap, in characters, applied at construction.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Builds a `JobRecord` from a raw collector mapping. Never rejects a
/// record: every malformed or missing field degrades to a sentinel.
pub fn normalize_record(raw: &Value, source: &str, base_url: &str) -> JobRecord {
    let title = string_field(raw, &["title", "position"], UNKNOWN_TITLE);
    let company = string_field(raw, &["company"], UNKNOWN_COMPANY);
    let location = string_field(raw, &["location"], UNKNOWN_LOCATION);
    let salary = salary_field(raw);
    let tags = tags_field(raw);

    let description = match non_empty_str(raw, &["description"]) {
        Some(text) => truncate_chars(text, MAX_DESCRIPTION_CHARS),
        None => format!("{title} position at {company}"),
    };

    let url = resolve_url(non_empty_str(raw, &["url", "link"]), base_url);
    let date_posted = string_field(raw, &["date_posted", "date"], UNKNOWN_DATE);

    JobRecord {
        title,
        company,
        location,
        salary,
        description,
        url,
        source: source.to_string(),
        date_posted,
        tags,
        relevance_score: 0.0,
    }
}

/// First non-empty string under any of `keys`, trimmed.
fn non_empty_str<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| raw.get(k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
}

fn string_field(raw: &Value, keys: &[&str], sentinel: &str) -> String {
    non_empty_str(raw, keys)
        .map(str::to_string)
        .unwrap_or_else(|| sentinel.to_string())
}

/// Salary arrives either as free text under `salary`, or as numeric
/// `salary_min`/`salary_max` bounds (RemoteOK style), formatted as a range.
fn salary_field(raw: &Value) -> String {
    if let Some(text) = non_empty_str(raw, &["salary"]) {
        return text.to_string();
    }

    let min = raw.get("salary_min").and_then(Value::as_i64).unwrap_or(0);
    let max = raw.get("salary_max").and_then(Value::as_i64).unwrap_or(0);
    match (min > 0, max > 0) {
        (true, true) => format!("${} - ${}", group_thousands(min), group_thousands(max)),
        (true, false) => format!("${}+", group_thousands(min)),
        _ => UNKNOWN_SALARY.to_string(),
    }
}

fn tags_field(raw: &Value) -> Vec<String> {
    raw.get("tags")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Resolves a possibly-relative URL against the collector's base URL.
///
/// `/path` joins to the base; anything not starting with `http` is treated
/// as a relative segment; absolute URLs pass through. A record without any
/// resolvable URL falls back to the base URL itself — it is never rejected.
fn resolve_url(raw_url: Option<&str>, base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    match raw_url {
        None => base.to_string(),
        Some(u) if u.starts_with('/') => format!("{base}{u}"),
        Some(u) if !u.starts_with("http") => format!("{base}/{u}"),
        Some(u) => u.to_string(),
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Inserts comma separators into a non-negative integer, e.g. 85000 -> "85,000".
fn group_thousands(n: i64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
