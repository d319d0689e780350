//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use ghinfo_core::{Report, ReportKind, ReportRow, ReportStatus};
use serde::{Serialize, Serializer};

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOutput {
    pub report: String,
    pub kind: ReportKind,
    pub since: u64,
    pub max_id: u64,
    pub sort: SortOutput,
    pub status: ReportStatus,
    pub complete: bool,
    pub rows: Vec<RowOutput>,
    pub total_repo_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_star_count: Option<u64>,
    pub fetched_count: u64,
    pub failures: Vec<FailureOutput>,
    #[serde(serialize_with = "serialize_datetime")]
    pub generated_at: DateTime<Utc>,
}

/// Ordering used for the rows.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortOutput {
    pub key: String,
    pub direction: String,
}

/// One row.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowOutput {
    pub key: String,
    pub repo_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_stars: Option<f64>,
}

/// One failed lookup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureOutput {
    pub id: u64,
    pub repository: String,
    pub cause: String,
}

// ============================================================================
// Serialization helpers
// ============================================================================

fn serialize_datetime<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339())
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats a report.
    pub fn format_report(&self, report: &Report) -> Result<String> {
        self.format(&Self::report_to_output(report))
    }

    /// Converts a report to output.
    fn report_to_output(report: &Report) -> ReportOutput {
        ReportOutput {
            report: report.name().to_string(),
            kind: report.kind(),
            since: report.range().since(),
            max_id: report.range().max_id(),
            sort: SortOutput {
                key: report.sort().key.to_string(),
                direction: report.sort().direction.to_string(),
            },
            status: report.status(),
            complete: !report.is_interrupted(),
            rows: report.rows().iter().map(Self::row_to_output).collect(),
            total_repo_count: report.total_repo_count(),
            total_star_count: report.total_star_count(),
            fetched_count: report.fetched_count(),
            failures: report
                .failures()
                .iter()
                .map(|f| FailureOutput {
                    id: f.repository.id,
                    repository: f.repository.full_name(),
                    cause: f.cause.clone(),
                })
                .collect(),
            generated_at: report.generated_at(),
        }
    }

    fn row_to_output(row: &ReportRow) -> RowOutput {
        RowOutput {
            key: row.key.label().to_string(),
            repo_count: row.repo_count,
            star_total: row.star_total,
            average_stars: row.star_total.map(|_| row.average_stars()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
