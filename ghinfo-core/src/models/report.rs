//! Report types.
//!
//! A [`Report`] is populated once from an [`Aggregate`] and its lookup
//! failures. After that the only permitted change is [`Report::resort`],
//! which reorders rows without recomputing anything.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{IdRange, RowKey};
use crate::aggregate::{Aggregate, LookupFailure};
use crate::error::CoreError;
use crate::sort::{SortKey, SortSpec, sort_rows};

// ============================================================================
// Report Kind
// ============================================================================

/// Which statistic a report collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Repositories and stars per stargazer tier.
    Stargazers,
    /// Repositories per license type.
    Licenses,
}

impl ReportKind {
    /// Report title.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stargazers => "StarGazers Report",
            Self::Licenses => "License Types Report",
        }
    }

    /// Header of the identity column.
    pub fn identity_column(&self) -> &'static str {
        match self {
            Self::Stargazers => "bucket",
            Self::Licenses => "license type",
        }
    }

    /// Returns true if rows of this report carry a star total.
    pub fn has_star_totals(&self) -> bool {
        matches!(self, Self::Stargazers)
    }

    /// Returns true if this report can be ordered by `key`.
    pub fn supports(&self, key: SortKey) -> bool {
        match key {
            SortKey::Identity | SortKey::RepoCount => true,
            SortKey::StarTotal => self.has_star_totals(),
        }
    }

    /// Rejects sort keys this report does not have.
    pub fn validate_sort(&self, spec: SortSpec) -> Result<(), CoreError> {
        if self.supports(spec.key) {
            Ok(())
        } else {
            Err(CoreError::UnsupportedSortKey {
                kind: *self,
                key: spec.key,
            })
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Report Row
// ============================================================================

/// One aggregated row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Row identity.
    pub key: RowKey,
    /// Repositories counted under the key.
    pub repo_count: u64,
    /// Total stars; `None` for reports without star totals.
    pub star_total: Option<u64>,
}

impl ReportRow {
    /// Creates a row.
    pub fn new(key: RowKey, repo_count: u64, star_total: Option<u64>) -> Self {
        Self {
            key,
            repo_count,
            star_total,
        }
    }

    /// Average stars per repository, zero for an empty row.
    #[allow(clippy::cast_precision_loss)]
    pub fn average_stars(&self) -> f64 {
        match self.star_total {
            Some(stars) if self.repo_count > 0 => stars as f64 / self.repo_count as f64,
            _ => 0.0,
        }
    }
}

// ============================================================================
// Report Status
// ============================================================================

/// How complete a finished report is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// The run was interrupted; some repositories were never looked up.
    Incomplete,
    /// No repositories exist in the range.
    EmptyRange,
    /// Repositories were found but every lookup failed.
    AllFailed,
    /// Some lookups failed.
    Partial,
    /// Every lookup succeeded.
    Complete,
}

// ============================================================================
// Report
// ============================================================================

/// An ordered, otherwise immutable report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    kind: ReportKind,
    range: IdRange,
    sort: SortSpec,
    rows: Vec<ReportRow>,
    total_repo_count: u64,
    total_star_count: Option<u64>,
    fetched_count: u64,
    failures: Vec<LookupFailure>,
    interrupted: bool,
    generated_at: DateTime<Utc>,
}

impl Report {
    /// Builds a report from a finished aggregation.
    ///
    /// `fetched_count` is the number of repositories the range fetch
    /// returned, which is what separates an empty range from a run where
    /// every lookup failed.
    pub fn build(
        kind: ReportKind,
        range: IdRange,
        aggregate: Aggregate,
        failures: Vec<LookupFailure>,
        fetched_count: u64,
        sort: SortSpec,
    ) -> Self {
        let total_repo_count = aggregate.repo_count();
        let total_star_count = kind.has_star_totals().then(|| aggregate.star_count());

        let mut rows: Vec<ReportRow> = aggregate
            .into_iter()
            .map(|(key, tally)| {
                let stars = kind.has_star_totals().then_some(tally.star_total);
                ReportRow::new(key, tally.repo_count, stars)
            })
            .collect();
        sort_rows(&mut rows, sort);

        Self {
            kind,
            range,
            sort,
            rows,
            total_repo_count,
            total_star_count,
            fetched_count,
            failures,
            interrupted: false,
            generated_at: Utc::now(),
        }
    }

    /// A report with nothing in it.
    pub fn empty(kind: ReportKind, range: IdRange, sort: SortSpec) -> Self {
        Self::build(kind, range, Aggregate::new(), Vec::new(), 0, sort)
    }

    /// Marks the report as cut short by cancellation.
    #[must_use]
    pub fn into_interrupted(mut self) -> Self {
        self.interrupted = true;
        self
    }

    /// Returns true if the run stopped before every repository was looked up.
    pub fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Reorders rows. Aggregated values are left untouched.
    pub fn resort(&mut self, sort: SortSpec) -> Result<(), CoreError> {
        self.kind.validate_sort(sort)?;
        sort_rows(&mut self.rows, sort);
        self.sort = sort;
        Ok(())
    }

    /// Report title.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Report kind.
    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    /// Range the report covers.
    pub fn range(&self) -> IdRange {
        self.range
    }

    /// Current ordering.
    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    /// Ordered rows.
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Sum of `repo_count` over all rows.
    pub fn total_repo_count(&self) -> u64 {
        self.total_repo_count
    }

    /// Sum of `star_total` over all rows (star report only).
    pub fn total_star_count(&self) -> Option<u64> {
        self.total_star_count
    }

    /// Repositories returned by the range fetch.
    pub fn fetched_count(&self) -> u64 {
        self.fetched_count
    }

    /// Lookup failures in encounter order.
    pub fn failures(&self) -> &[LookupFailure] {
        &self.failures
    }

    /// When the report was built.
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Completeness of the report.
    pub fn status(&self) -> ReportStatus {
        if self.interrupted {
            ReportStatus::Incomplete
        } else if self.fetched_count == 0 {
            ReportStatus::EmptyRange
        } else if self.total_repo_count == 0 && !self.failures.is_empty() {
            ReportStatus::AllFailed
        } else if !self.failures.is_empty() {
            ReportStatus::Partial
        } else {
            ReportStatus::Complete
        }
    }
}
