//! Cursor pagination over `Link: <url>; rel="next"` headers.
//!
//! The listing endpoint ignores `page`/`per_page`; the only way forward is
//! the URL the server hands back. The pager follows it and knows nothing
//! about the range being fetched.

use regex::Regex;
use reqwest::header::{HeaderMap, LINK};
use serde::de::DeserializeOwned;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::FetchError;
use crate::transport::Transport;

/// Matches one `<url>; rel="..."` entry of a `Link` header.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([^>]+)>;\s*rel="([^"]+)""#).expect("Invalid regex")
});

/// Extracts the `rel="next"` URL from the `Link` headers, if any.
pub fn next_page_url(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| LINK_RE.captures_iter(value))
        .find(|caps| caps[2].split_whitespace().any(|rel| rel == "next"))
        .map(|caps| caps[1].to_string())
}

// ============================================================================
// Cursor Pager
// ============================================================================

/// Walks a listing endpoint one page at a time.
pub struct CursorPager<'a> {
    transport: &'a dyn Transport,
    next: Option<String>,
    pages: usize,
}

impl<'a> CursorPager<'a> {
    /// Starts at `first_url`.
    pub fn new(transport: &'a dyn Transport, first_url: impl Into<String>) -> Self {
        Self {
            transport,
            next: Some(first_url.into()),
            pages: 0,
        }
    }

    /// Pages fetched so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages
    }

    /// Returns true if another page can be requested.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Fetches the next page.
    ///
    /// Returns `Ok(None)` once the server stops sending a next cursor.
    /// Any transport, status, or decoding error is returned as is.
    pub async fn next_page<T: DeserializeOwned>(&mut self) -> Result<Option<Vec<T>>, FetchError> {
        let Some(url) = self.next.take() else {
            return Ok(None);
        };

        debug!(url = %url, page = self.pages + 1, "Requesting page");
        let response = self.transport.get(&url).await?;

        if let Some(remaining) = response.rate_limit_remaining() {
            debug!(remaining, "Rate limiting requests remaining");
        }

        if response.is_rate_limited() {
            return Err(FetchError::RateLimited {
                reset: response.rate_limit_reset(),
                url,
            });
        }

        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
                url,
            });
        }

        let items: Vec<T> = response
            .json::<Option<Vec<T>>>()
            .map_err(|source| FetchError::Decode {
                url: url.clone(),
                source,
            })?
            .unwrap_or_default();

        self.next = response.next_page_url();
        self.pages += 1;

        debug!(
            page = self.pages,
            count = items.len(),
            has_next = self.next.is_some(),
            "Page received"
        );

        Ok(Some(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedTransport, ok, page, status};
    use ghinfo_core::Repository;
    use reqwest::StatusCode;
    use reqwest::header::HeaderValue;

    fn link(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(LINK, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_next_link_among_others() {
        let headers = link(
            r#"<https://api.github.com/repositories?since=369>; rel="next", <https://api.github.com/repositories{?since}>; rel="first""#,
        );
        assert_eq!(
            next_page_url(&headers).as_deref(),
            Some("https://api.github.com/repositories?since=369")
        );
    }

    #[test]
    fn test_no_next_link() {
        let headers = link(r#"<https://api.github.com/repositories{?since}>; rel="first""#);
        assert_eq!(next_page_url(&headers), None);
        assert_eq!(next_page_url(&HeaderMap::new()), None);
    }

    #[test]
    fn test_next_link_in_second_header_value() {
        let mut headers = link(r#"<https://x.test/a>; rel="prev""#);
        headers.append(LINK, HeaderValue::from_static(r#"<https://x.test/b>; rel="next""#));
        assert_eq!(next_page_url(&headers).as_deref(), Some("https://x.test/b"));
    }

    #[tokio::test]
    async fn test_pager_follows_cursor_until_exhausted() {
        let transport = ScriptedTransport::new()
            .respond("https://x.test/p1", page(&[1, 2], Some("https://x.test/p2")))
            .respond("https://x.test/p2", page(&[3], None));

        let mut pager = CursorPager::new(&transport, "https://x.test/p1");
        let first: Vec<Repository> = pager.next_page().await.unwrap().unwrap();
        assert_eq!(first.len(), 2);
        assert!(pager.has_next());

        let second: Vec<Repository> = pager.next_page().await.unwrap().unwrap();
        assert_eq!(second[0].id, 3);
        assert!(!pager.has_next());

        assert!(pager.next_page::<Repository>().await.unwrap().is_none());
        assert_eq!(pager.pages_fetched(), 2);
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_pager_surfaces_status_errors() {
        let transport = ScriptedTransport::new().respond(
            "https://x.test/p1",
            status(StatusCode::BAD_GATEWAY),
        );

        let mut pager = CursorPager::new(&transport, "https://x.test/p1");
        let err = pager.next_page::<Repository>().await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Status {
                status: StatusCode::BAD_GATEWAY,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_pager_surfaces_decode_errors() {
        let transport = ScriptedTransport::new().respond(
            "https://x.test/p1",
            ok(r#"{"message": "not a list"}"#),
        );

        let mut pager = CursorPager::new(&transport, "https://x.test/p1");
        let err = pager.next_page::<Repository>().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }
}
