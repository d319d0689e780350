//! Core error types for `ghinfo`.

use thiserror::Error;

use crate::models::ReportKind;
use crate::sort::SortKey;

/// Validation error raised before any network activity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// `max_id` is smaller than `since`.
    #[error("the `maxID` value ({max_id}) cannot be smaller than the `since` value ({since})")]
    InvalidRange {
        /// Lower (exclusive) bound.
        since: u64,
        /// Upper (inclusive) bound.
        max_id: u64,
    },

    /// The range covers more ids than a single run may request.
    #[error("the number of IDs ({width}) has exceeded the limit ({limit})")]
    RangeTooWide {
        /// Requested width (`max_id - since`).
        width: u64,
        /// Maximum allowed width.
        limit: u64,
    },

    /// The sort key has no meaning for the selected report.
    #[error("{kind} cannot be sorted by {key}")]
    UnsupportedSortKey {
        /// Report being sorted.
        kind: ReportKind,
        /// Requested key.
        key: SortKey,
    },
}
