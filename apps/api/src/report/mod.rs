//! Report writers — render a finished run to JSON, CSV, or HTML files.
//!
//! Reporters are consumers of the pipeline's output contract: they receive
//! the ranked record set and the run timestamp, and produce artifacts under
//! the configured results directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::job::JobRecord;
use crate::search::aggregate::SearchOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Csv,
    Html,
}

impl ReportFormat {
    fn extension(self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
            ReportFormat::Html => "html",
        }
    }
}

/// Writes one file per requested format, named `jobs_<timestamp>.<ext>`.
/// Returns the paths written. Creates the results directory if needed.
pub fn write_reports(
    outcome: &SearchOutcome,
    formats: &[ReportFormat],
    results_dir: &Path,
) -> Result<Vec<PathBuf>, AppError> {
    if formats.is_empty() {
        return Ok(Vec::new());
    }
    fs::create_dir_all(results_dir)?;

    let stamp = outcome.generated_at.format("%Y%m%d_%H%M%S");
    let mut written = Vec::with_capacity(formats.len());

    for format in formats {
        let path = results_dir.join(format!("jobs_{stamp}.{}", format.extension()));
        let body = match format {
            ReportFormat::Json => render_json(outcome)?,
            ReportFormat::Csv => render_csv(&outcome.jobs),
            ReportFormat::Html => render_html(outcome),
        };
        fs::write(&path, body)?;
        written.push(path);
    }

    Ok(written)
}

fn render_json(outcome: &SearchOutcome) -> Result<String, AppError> {
    serde_json::to_string_pretty(outcome)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to serialize report: {e}")))
}

const CSV_HEADER: &str =
    "title,company,location,salary,description,url,source,date_posted,relevance_score";

fn render_csv(jobs: &[JobRecord]) -> String {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push('\n');
    for job in jobs {
        let fields = [
            job.title.as_str(),
            job.company.as_str(),
            job.location.as_str(),
            job.salary.as_str(),
            job.description.as_str(),
            job.url.as_str(),
            job.source.as_str(),
            job.date_posted.as_str(),
        ];
        for field in fields {
            out.push_str(&csv_field(field));
            out.push(',');
        }
        out.push_str(&format!("{:.1}\n", job.relevance_score));
    }
    out
}

/// Quotes a field when it contains a delimiter, quote, or newline;
/// embedded quotes are doubled.
fn csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn render_html(outcome: &SearchOutcome) -> String {
    let mut body = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<title>Job Search Results</title>\n\
         <style>\n\
         body {{ font-family: Arial, sans-serif; margin: 20px; }}\n\
         .job {{ border: 1px solid #ddd; margin: 10px 0; padding: 15px; border-radius: 5px; }}\n\
         .title {{ font-size: 18px; font-weight: bold; }}\n\
         .details {{ color: #888; font-size: 14px; }}\n\
         .score {{ background: #e7f3ff; padding: 2px 6px; border-radius: 3px; }}\n\
         </style>\n</head>\n<body>\n\
         <h1>Job Search Results</h1>\n\
         <p>Generated on: {}</p>\n<p>Total jobs found: {}</p>\n",
        outcome.generated_at.format("%Y-%m-%d %H:%M:%S"),
        outcome.jobs.len()
    );

    for job in &outcome.jobs {
        body.push_str(&format!(
            "<div class=\"job\">\n\
             <div class=\"title\">{}</div>\n\
             <div>{}</div>\n\
             <div class=\"details\">Location: {} | Salary: {} | Source: {} | \
             <span class=\"score\">Score: {:.1}</span></div>\n\
             <div>{}</div>\n\
             <div><a href=\"{}\">View Job</a></div>\n\
             </div>\n",
            escape_html(&job.title),
            escape_html(&job.company),
            escape_html(&job.location),
            escape_html(&job.salary),
            escape_html(&job.source),
            job.relevance_score,
            escape_html(&job.description),
            escape_html(&job.url),
        ));
    }

    body.push_str("</body>\n</html>\n");
    body
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
