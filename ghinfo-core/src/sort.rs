//! Deterministic report row ordering.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::ReportRow;

/// Column a report is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Row identity: tier order for buckets, name for licenses.
    #[default]
    Identity,
    /// Number of repositories in the row.
    RepoCount,
    /// Total stars in the row (star report only).
    StarTotal,
}

impl SortKey {
    /// Column name used in messages and output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::RepoCount => "repos",
            Self::StarTotal => "stars",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Returns true for [`SortDirection::Ascending`].
    pub fn is_ascending(&self) -> bool {
        matches!(self, Self::Ascending)
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        })
    }
}

/// Sort key plus direction, passed explicitly to every sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Column to order by.
    pub key: SortKey,
    /// Direction of the primary comparison.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Creates a sort spec.
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Ascending by `key`.
    pub fn ascending(key: SortKey) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    /// Descending by `key`.
    pub fn descending(key: SortKey) -> Self {
        Self::new(key, SortDirection::Descending)
    }
}

/// Orders rows by `spec`.
///
/// The direction applies to the chosen column only: descending reverses the
/// primary comparison, not the final order. Rows that tie on the column are
/// always ordered by ascending identity, so the same input yields the same
/// tie order in both directions. Reversing the whole sorted slice instead
/// would flip that tie order.
pub fn sort_rows(rows: &mut [ReportRow], spec: SortSpec) {
    rows.sort_by(|a, b| {
        let primary = match spec.key {
            SortKey::Identity => a.key.cmp(&b.key),
            SortKey::RepoCount => a.repo_count.cmp(&b.repo_count),
            SortKey::StarTotal => a
                .star_total
                .unwrap_or_default()
                .cmp(&b.star_total.unwrap_or_default()),
        };
        let primary = match spec.direction {
            SortDirection::Ascending => primary,
            SortDirection::Descending => primary.reverse(),
        };
        primary.then_with(|| a.key.cmp(&b.key))
    });
}
