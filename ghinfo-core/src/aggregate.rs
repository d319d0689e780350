//! Keyed accumulator for secondary lookup results.
//!
//! The aggregator owns one [`Aggregate`] per run and is its only writer.
//! Once a run completes, the report sorter reads it to build the ordered
//! view; nothing mutates it afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::models::{Repository, RowKey};

// ============================================================================
// Classification
// ============================================================================

/// Result of classifying one repository after a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Row the repository is counted under.
    pub key: RowKey,
    /// Weight added to the row's total (stargazers; zero for licenses).
    pub weight: u64,
}

impl Classification {
    /// Creates a classification.
    pub fn new(key: RowKey, weight: u64) -> Self {
        Self { key, weight }
    }
}

// ============================================================================
// Tally & Aggregate
// ============================================================================

/// Accumulated counts for one row key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Repositories counted under this key.
    pub repo_count: u64,
    /// Sum of weights (total stars for the star report).
    pub star_total: u64,
}

/// Mapping from row key to accumulated counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    tallies: BTreeMap<RowKey, Tally>,
}

impl Aggregate {
    /// Creates an empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one repository under `classification.key`.
    pub fn record(&mut self, classification: Classification) {
        let tally = self.tallies.entry(classification.key).or_default();
        tally.repo_count += 1;
        tally.star_total = tally.star_total.saturating_add(classification.weight);
    }

    /// Tally for a key.
    pub fn get(&self, key: &RowKey) -> Option<&Tally> {
        self.tallies.get(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Total repositories recorded across all keys.
    pub fn repo_count(&self) -> u64 {
        self.tallies.values().map(|t| t.repo_count).sum()
    }

    /// Total weight recorded across all keys.
    pub fn star_count(&self) -> u64 {
        self.tallies
            .values()
            .fold(0u64, |acc, t| acc.saturating_add(t.star_total))
    }

    /// Iterates in ascending key order.
    pub fn iter(&self) -> btree_map::Iter<'_, RowKey, Tally> {
        self.tallies.iter()
    }
}

impl IntoIterator for Aggregate {
    type Item = (RowKey, Tally);
    type IntoIter = btree_map::IntoIter<RowKey, Tally>;

    fn into_iter(self) -> Self::IntoIter {
        self.tallies.into_iter()
    }
}

impl FromIterator<Classification> for Aggregate {
    fn from_iter<I: IntoIterator<Item = Classification>>(iter: I) -> Self {
        let mut aggregate = Self::new();
        for classification in iter {
            aggregate.record(classification);
        }
        aggregate
    }
}

// ============================================================================
// Lookup Failure
// ============================================================================

/// A secondary lookup that did not produce a classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupFailure {
    /// The repository that was skipped.
    pub repository: Repository,
    /// Human-readable cause.
    pub cause: String,
}

impl LookupFailure {
    /// Creates a failure record.
    pub fn new(repository: Repository, cause: impl Into<String>) -> Self {
        Self {
            repository,
            cause: cause.into(),
        }
    }
}
