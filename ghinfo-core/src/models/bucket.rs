//! Classification keys for report rows.
//!
//! - [`BucketTier`] - six ordered stargazer count tiers
//! - [`RowKey`] - identity of a report row (tier or license name)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key used for repositories that have no license on record.
pub const NO_LICENSE: &str = "none";

// ============================================================================
// Bucket Tier
// ============================================================================

/// Stargazer count tier.
///
/// Each tier is a half-open interval; variants are declared in ascending
/// order so the derived `Ord` is the tier order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketTier {
    /// `(-inf, 10]`
    UpTo10,
    /// `(10, 100]`
    UpTo100,
    /// `(100, 1000]`
    UpTo1000,
    /// `(1000, 5000]`
    UpTo5000,
    /// `(5000, 10000]`
    UpTo10000,
    /// `(10000, inf)`
    Above10000,
}

impl BucketTier {
    /// All tiers in ascending order.
    pub const ALL: [BucketTier; 6] = [
        Self::UpTo10,
        Self::UpTo100,
        Self::UpTo1000,
        Self::UpTo5000,
        Self::UpTo10000,
        Self::Above10000,
    ];

    /// Classifies a stargazer count.
    pub fn for_count(count: u64) -> Self {
        match count {
            0..=10 => Self::UpTo10,
            11..=100 => Self::UpTo100,
            101..=1000 => Self::UpTo1000,
            1001..=5000 => Self::UpTo5000,
            5001..=10000 => Self::UpTo10000,
            _ => Self::Above10000,
        }
    }

    /// Report label for this tier.
    pub fn label(&self) -> &'static str {
        match self {
            Self::UpTo10 => "0..10",
            Self::UpTo100 => "10..100",
            Self::UpTo1000 => "100..1000",
            Self::UpTo5000 => "1000..5000",
            Self::UpTo10000 => "5000..10000",
            Self::Above10000 => ">=10000",
        }
    }
}

impl fmt::Display for BucketTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Row Key
// ============================================================================

/// Identity of an aggregated report row.
///
/// A single report only ever holds one variant, so the cross-variant order
/// never decides anything.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RowKey {
    /// Stargazer tier.
    Bucket(BucketTier),
    /// License name, or [`NO_LICENSE`].
    License(String),
}

impl RowKey {
    /// Key for a repository without a license record.
    pub fn no_license() -> Self {
        Self::License(NO_LICENSE.to_string())
    }

    /// Display label.
    pub fn label(&self) -> &str {
        match self {
            Self::Bucket(tier) => tier.label(),
            Self::License(name) => name,
        }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(BucketTier::for_count(0).label(), "0..10");
        assert_eq!(BucketTier::for_count(10).label(), "0..10");
        assert_eq!(BucketTier::for_count(11).label(), "10..100");
        assert_eq!(BucketTier::for_count(100).label(), "10..100");
        assert_eq!(BucketTier::for_count(101).label(), "100..1000");
        assert_eq!(BucketTier::for_count(5000).label(), "1000..5000");
        assert_eq!(BucketTier::for_count(10000).label(), "5000..10000");
        assert_eq!(BucketTier::for_count(10001).label(), ">=10000");
    }

    #[test]
    fn test_all_is_sorted() {
        let mut sorted = BucketTier::ALL;
        sorted.sort();
        assert_eq!(sorted, BucketTier::ALL);
    }

    #[test]
    fn test_row_key_labels() {
        assert_eq!(RowKey::Bucket(BucketTier::UpTo1000).to_string(), "100..1000");
        assert_eq!(RowKey::no_license().label(), "none");
        assert_eq!(RowKey::License("MIT License".into()).label(), "MIT License");
    }

    proptest! {
        #[test]
        fn tier_is_monotonic(a in any::<u64>(), b in any::<u64>()) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(BucketTier::for_count(lo) <= BucketTier::for_count(hi));
        }
    }
}
