//! Configuration management.

use ghinfo_core::{ReportKind, SortDirection, SortKey, SortSpec};
use ghinfo_fetch::{
    DEFAULT_API_BASE, DEFAULT_CONCURRENCY, DEFAULT_USER_AGENT, Endpoints, FetchSettings,
    MAX_CONCURRENCY,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::persistence::{default_config_path, load_json, save_json};

/// Application configuration. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API base URL.
    pub api_base_url: String,
    /// Secondary lookups in flight.
    pub concurrency: usize,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Default sort column.
    pub sort_key: SortKey,
    /// Default sort direction.
    pub sort_direction: SortDirection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            sort_key: SortKey::default(),
            sort_direction: SortDirection::default(),
        }
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        default_config_path()
    }

    /// Loads configuration from the default path.
    pub async fn load() -> Result<Self, StoreError> {
        Self::load_from(&Self::default_path()).await
    }

    /// Loads configuration from `path`. A missing file yields defaults; a
    /// malformed one is an error.
    pub async fn load_from(path: &Path) -> Result<Self, StoreError> {
        match load_json::<Self>(path).await {
            Ok(config) => {
                config.validate()?;
                info!(path = %path.display(), "Loaded configuration");
                Ok(config)
            }
            Err(e) if e.is_not_found() => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Saves configuration to the default path.
    pub async fn save(&self) -> Result<(), StoreError> {
        self.save_to(&Self::default_path()).await
    }

    /// Saves configuration to `path`.
    pub async fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        save_json(path, self).await?;
        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Checks values that cannot be clamped.
    pub fn validate(&self) -> Result<(), StoreError> {
        Endpoints::new(&self.api_base_url)
            .map_err(|e| StoreError::Config(format!("api_base_url: {e}")))?;
        if self.timeout_secs == 0 {
            return Err(StoreError::Config("timeout_secs must be positive".into()));
        }
        if self.user_agent.trim().is_empty() {
            return Err(StoreError::Config("user_agent must not be empty".into()));
        }
        if !(1..=MAX_CONCURRENCY).contains(&self.concurrency) {
            warn!(
                concurrency = self.concurrency,
                max = MAX_CONCURRENCY,
                "Concurrency out of range, will be clamped"
            );
        }
        Ok(())
    }

    /// Default report ordering.
    pub fn sort_spec(&self) -> SortSpec {
        SortSpec::new(self.sort_key, self.sort_direction)
    }

    /// Default ordering for `kind`.
    ///
    /// A configured key the report lacks falls back to identity order.
    pub fn sort_spec_for(&self, kind: ReportKind) -> SortSpec {
        let spec = self.sort_spec();
        if kind.supports(spec.key) {
            spec
        } else {
            debug!(%kind, key = %spec.key, "Configured sort key unsupported, using identity");
            SortSpec::new(SortKey::Identity, spec.direction)
        }
    }

    /// Fetch settings for this configuration.
    pub fn fetch_settings(&self, token: Option<String>) -> FetchSettings {
        FetchSettings {
            api_base: self.api_base_url.clone(),
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            concurrency: self.concurrency,
            token,
        }
    }
}
