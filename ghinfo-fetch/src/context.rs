//! Fetch context shared by the pipeline stages.
//!
//! The context bundles the transport every stage talks through with the
//! settings that shape a run (API base, concurrency, timeout, credentials).

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::endpoints::Endpoints;
use crate::error::HttpError;
use crate::host::http::HttpClient;
use crate::transport::Transport;

/// Default API base.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default number of secondary lookups in flight.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Upper bound on secondary lookups in flight.
pub const MAX_CONCURRENCY: usize = 16;

/// Default user agent.
pub const DEFAULT_USER_AGENT: &str = "https://github.com/carlisia/ghinfo";

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for a report run.
#[derive(Clone)]
pub struct FetchSettings {
    /// API base URL.
    pub api_base: String,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Secondary lookups in flight, clamped to `1..=MAX_CONCURRENCY`.
    pub concurrency: usize,
    /// Optional bearer token.
    pub token: Option<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            concurrency: DEFAULT_CONCURRENCY,
            token: None,
        }
    }
}

impl FetchSettings {
    /// Sets the concurrency.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Effective concurrency.
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.clamp(1, MAX_CONCURRENCY)
    }

    /// Endpoints for the configured base.
    pub fn endpoints(&self) -> Result<Endpoints, HttpError> {
        Endpoints::new(&self.api_base)
    }
}

impl fmt::Debug for FetchSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchSettings")
            .field("api_base", &self.api_base)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("concurrency", &self.concurrency)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// ============================================================================
// Fetch Context
// ============================================================================

/// Transport plus settings, handed to every stage.
#[derive(Clone)]
pub struct FetchContext {
    /// Transport used for all requests.
    pub transport: Arc<dyn Transport>,
    /// Endpoints below the API base.
    pub endpoints: Endpoints,
    /// Run settings.
    pub settings: FetchSettings,
}

impl FetchContext {
    /// Creates a context backed by [`HttpClient`].
    pub fn new(settings: FetchSettings) -> Result<Self, HttpError> {
        Self::builder().settings(settings).build()
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> FetchContextBuilder {
        FetchContextBuilder::new()
    }

    /// Effective concurrency for secondary lookups.
    pub fn concurrency(&self) -> usize {
        self.settings.effective_concurrency()
    }
}

impl fmt::Debug for FetchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchContext")
            .field("endpoints", &self.endpoints)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Fetch Context Builder
// ============================================================================

/// Builder for constructing a [`FetchContext`].
#[derive(Default)]
pub struct FetchContextBuilder {
    transport: Option<Arc<dyn Transport>>,
    settings: FetchSettings,
}

impl FetchContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the transport. Without one an [`HttpClient`] is built.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the settings.
    pub fn settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the API base.
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.settings.api_base = api_base.into();
        self
    }

    /// Sets the concurrency.
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.settings.concurrency = concurrency;
        self
    }

    /// Builds the context.
    pub fn build(self) -> Result<FetchContext, HttpError> {
        let endpoints = self.settings.endpoints()?;
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpClient::for_api(&endpoints, &self.settings)?),
        };
        Ok(FetchContext {
            transport,
            endpoints,
            settings: self.settings,
        })
    }
}
