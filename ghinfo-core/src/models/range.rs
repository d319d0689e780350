//! Identifier window for a single report run.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Maximum `max_id - since` accepted for one run.
pub const MAX_RANGE_WIDTH: u64 = 500;

/// A validated identifier window.
///
/// The listing endpoint already excludes `since` itself; `max_id` is
/// inclusive. Only constructible through [`IdRange::new`], so every value in
/// circulation satisfies `since <= max_id` and `max_id - since <= 500`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct IdRange {
    since: u64,
    max_id: u64,
}

#[derive(Deserialize)]
struct RawRange {
    since: u64,
    max_id: u64,
}

impl TryFrom<RawRange> for IdRange {
    type Error = CoreError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        Self::new(raw.since, raw.max_id)
    }
}

impl IdRange {
    /// Validates and creates a range.
    pub fn new(since: u64, max_id: u64) -> Result<Self, CoreError> {
        if max_id < since {
            return Err(CoreError::InvalidRange { since, max_id });
        }

        let width = max_id - since;
        if width > MAX_RANGE_WIDTH {
            return Err(CoreError::RangeTooWide {
                width,
                limit: MAX_RANGE_WIDTH,
            });
        }

        Ok(Self { since, max_id })
    }

    /// Exclusive lower bound sent as `since=`.
    pub fn since(&self) -> u64 {
        self.since
    }

    /// Inclusive upper bound.
    pub fn max_id(&self) -> u64 {
        self.max_id
    }

    /// Number of ids covered (`max_id - since`).
    pub fn width(&self) -> u64 {
        self.max_id - self.since
    }

    /// Returns true if `id` falls inside `(since, max_id]`.
    pub fn contains(&self, id: u64) -> bool {
        id > self.since && id <= self.max_id
    }
}

impl fmt::Display for IdRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}]", self.since, self.max_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_below_since_is_rejected() {
        assert_eq!(
            IdRange::new(10, 5),
            Err(CoreError::InvalidRange {
                since: 10,
                max_id: 5
            })
        );
    }

    #[test]
    fn test_width_limit() {
        assert_eq!(
            IdRange::new(1, 502),
            Err(CoreError::RangeTooWide {
                width: 501,
                limit: 500
            })
        );

        let range = IdRange::new(1, 501).unwrap();
        assert_eq!(range.width(), 500);
    }

    #[test]
    fn test_empty_width_is_valid() {
        let range = IdRange::new(7, 7).unwrap();
        assert_eq!(range.width(), 0);
        assert!(!range.contains(7));
    }

    #[test]
    fn test_contains_excludes_since() {
        let range = IdRange::new(1, 10).unwrap();
        assert!(!range.contains(1));
        assert!(range.contains(2));
        assert!(range.contains(10));
        assert!(!range.contains(11));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: IdRange = serde_json::from_str(r#"{"since": 1, "max_id": 10}"#).unwrap();
        assert_eq!(ok.max_id(), 10);

        let bad = serde_json::from_str::<IdRange>(r#"{"since": 10, "max_id": 1}"#);
        assert!(bad.is_err());
    }
}
