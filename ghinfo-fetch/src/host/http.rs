//! HTTP client with tracing and a host allowlist.
//!
//! Every request carries the GitHub media type, the configured user agent,
//! and the bearer token when one is set. Requests are only sent to hosts on
//! the allowlist so a cursor URL from the server cannot carry the token to
//! another host.

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::context::FetchSettings;
use crate::endpoints::Endpoints;
use crate::error::HttpError;
use crate::transport::{Transport, TransportResponse};

/// GitHub REST v3 media type.
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

// ============================================================================
// HTTP Client
// ============================================================================

/// `reqwest` backed [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    allowed_hosts: Option<Vec<String>>,
}

impl HttpClient {
    /// Creates a client from settings, restricted to the API host.
    pub fn for_api(endpoints: &Endpoints, settings: &FetchSettings) -> Result<Self, HttpError> {
        let inner = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .default_headers(default_headers(settings.token.as_deref())?)
            .build()?;

        let allowed_hosts = endpoints.host().map(|host| vec![host.to_string()]);
        Ok(Self {
            inner,
            allowed_hosts,
        })
    }

    /// Checks that the URL's host is allowed.
    fn is_host_allowed(&self, url: &str) -> Result<(), HttpError> {
        let Some(ref allowed) = self.allowed_hosts else {
            return Ok(());
        };

        let parsed = Url::parse(url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| HttpError::InvalidUrl("No host in URL".to_string()))?;

        if allowed.iter().any(|allowed| allowed.eq_ignore_ascii_case(host)) {
            Ok(())
        } else {
            Err(HttpError::HostNotAllowed(host.to_string()))
        }
    }
}

#[async_trait]
impl Transport for HttpClient {
    #[instrument(skip(self), fields(url = %url))]
    async fn get(&self, url: &str) -> Result<TransportResponse, HttpError> {
        self.is_host_allowed(url)?;
        debug!("GET request");

        let response = self.inner.get(url).send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        debug!(status = %status, bytes = body.len(), "Response received");

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

fn default_headers(token: Option<&str>) -> Result<HeaderMap, HttpError> {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| HttpError::InvalidHeader("authorization"))?;
        value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, value);
    }

    Ok(headers)
}

// ============================================================================
// Tests
// ============================================================================
