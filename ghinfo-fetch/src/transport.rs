//! Transport abstraction used by the pager and the secondary lookups.
//!
//! The core only needs `GET` with status, headers, and a text body. The
//! production implementation is [`crate::host::http::HttpClient`]; tests use
//! an in-memory script.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::error::HttpError;
use crate::pagination;

/// Remaining-requests header sent by the GitHub API.
pub const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// Rate limit reset header (epoch seconds).
pub const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

// ============================================================================
// Transport Response
// ============================================================================

/// A fully read response.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Body text.
    pub body: String,
}

impl TransportResponse {
    /// Creates a response without headers.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Returns true for a 2xx status.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns true if the request was refused because the rate limit is
    /// exhausted.
    pub fn is_rate_limited(&self) -> bool {
        self.status == StatusCode::TOO_MANY_REQUESTS
            || (self.status == StatusCode::FORBIDDEN && self.rate_limit_remaining() == Some(0))
    }

    /// Value of `X-RateLimit-Remaining`.
    pub fn rate_limit_remaining(&self) -> Option<u64> {
        self.header_u64(RATE_LIMIT_REMAINING)
    }

    /// Value of `X-RateLimit-Reset`.
    pub fn rate_limit_reset(&self) -> Option<u64> {
        self.header_u64(RATE_LIMIT_RESET)
    }

    /// URL of the next page from the `Link` header.
    pub fn next_page_url(&self) -> Option<String> {
        pagination::next_page_url(&self.headers)
    }

    /// Decodes the body as JSON. An empty body decodes as `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        if self.body.trim().is_empty() {
            serde_json::from_str("null")
        } else {
            serde_json::from_str(&self.body)
        }
    }

    fn header_u64(&self, name: &str) -> Option<u64> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Performs `GET` requests for the fetch layer.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches `url` and reads the whole body.
    ///
    /// Returns `Err` only for transport failures; non-2xx statuses come back
    /// as a response so callers can classify them.
    async fn get(&self, url: &str) -> Result<TransportResponse, HttpError>;
}
