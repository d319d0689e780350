//! Fetch error types.

use ghinfo_core::{CoreError, Report};
use reqwest::StatusCode;
use thiserror::Error;

// ============================================================================
// HTTP Error
// ============================================================================

/// Transport-level error.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Host not on the allowlist.
    #[error("Host not allowed: {0}")]
    HostNotAllowed(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Header value could not be built.
    #[error("Invalid header value for {0}")]
    InvalidHeader(&'static str),
}

// ============================================================================
// Fetch Error
// ============================================================================

/// Error on the listing path. Every variant aborts the range fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Non-2xx response.
    #[error("Unexpected status {status} from {url}")]
    Status {
        /// Response status.
        status: StatusCode,
        /// Requested URL.
        url: String,
    },

    /// Rate limit exhausted.
    #[error("Rate limited by {url}, resets at {reset:?}")]
    RateLimited {
        /// Requested URL.
        url: String,
        /// Epoch seconds when the limit resets, if reported.
        reset: Option<u64>,
    },

    /// Body did not decode.
    #[error("Malformed body from {url}: {source}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// Cancellation observed.
    #[error("Fetch cancelled")]
    Cancelled,
}

// ============================================================================
// Lookup Error
// ============================================================================

/// Error from a single secondary lookup. Recorded, never fatal.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Non-2xx response.
    #[error("Unexpected status {0}")]
    Status(StatusCode),

    /// Rate limit exhausted.
    #[error("Rate limited")]
    RateLimited,

    /// Body did not decode.
    #[error("Malformed body: {0}")]
    Decode(#[from] serde_json::Error),
}

// ============================================================================
// Report Error
// ============================================================================

/// Error from a full report run.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Invalid request, raised before any network activity.
    #[error("Invalid parameters: {0}")]
    Validation(#[from] CoreError),

    /// The range fetch failed.
    #[error("Error trying to retrieve the repository list: {0}")]
    Fetch(#[source] FetchError),

    /// The run was cancelled. Carries everything committed so far.
    #[error(
        "Report cancelled with {} of {} repositories aggregated",
        .partial.total_repo_count(),
        .partial.fetched_count()
    )]
    Cancelled {
        /// Partial, incomplete report.
        partial: Box<Report>,
    },
}

impl ReportError {
    /// The partial report of a cancelled run.
    pub fn partial_report(&self) -> Option<&Report> {
        match self {
            Self::Cancelled { partial } => Some(partial),
            _ => None,
        }
    }
}
