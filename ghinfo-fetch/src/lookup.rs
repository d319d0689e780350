//! Per-repository secondary lookups.
//!
//! A lookup turns one [`Repository`] into a [`Classification`]: the row it
//! counts under and the weight it adds to that row's star total.

use async_trait::async_trait;
use ghinfo_core::{BucketTier, Classification, ReportKind, Repository, RowKey};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::context::FetchContext;
use crate::error::LookupError;
use crate::transport::TransportResponse;

// ============================================================================
// Lookup Trait
// ============================================================================

/// Classifies a single repository with one request.
#[async_trait]
pub trait SecondaryLookup: Send + Sync {
    /// Report this lookup feeds.
    fn kind(&self) -> ReportKind;

    /// Performs the lookup for `repo`.
    async fn classify(
        &self,
        ctx: &FetchContext,
        repo: &Repository,
    ) -> Result<Classification, LookupError>;
}

/// Returns the lookup for `kind`.
pub fn lookup_for(kind: ReportKind) -> Box<dyn SecondaryLookup> {
    match kind {
        ReportKind::Stargazers => Box::new(StarLookup),
        ReportKind::Licenses => Box::new(LicenseLookup),
    }
}

fn ensure_success(response: &TransportResponse) -> Result<(), LookupError> {
    if let Some(remaining) = response.rate_limit_remaining() {
        debug!(remaining, "Rate limiting requests remaining");
    }
    if response.is_rate_limited() {
        return Err(LookupError::RateLimited);
    }
    if !response.is_success() {
        return Err(LookupError::Status(response.status));
    }
    Ok(())
}

// ============================================================================
// Star Lookup
// ============================================================================

#[derive(Debug, Deserialize)]
struct StarBody {
    stargazers_count: u64,
}

/// `GET /repos/{owner}/{name}`, bucketed by `stargazers_count`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StarLookup;

#[async_trait]
impl SecondaryLookup for StarLookup {
    fn kind(&self) -> ReportKind {
        ReportKind::Stargazers
    }

    #[instrument(skip(self, ctx), fields(repo = %repo.full_name()))]
    async fn classify(
        &self,
        ctx: &FetchContext,
        repo: &Repository,
    ) -> Result<Classification, LookupError> {
        let response = ctx.transport.get(&ctx.endpoints.repository(repo)).await?;
        ensure_success(&response)?;

        let body: StarBody = response.json()?;
        let tier = BucketTier::for_count(body.stargazers_count);
        debug!(stars = body.stargazers_count, tier = %tier, "Classified");
        Ok(Classification::new(
            RowKey::Bucket(tier),
            body.stargazers_count,
        ))
    }
}

// ============================================================================
// License Lookup
// ============================================================================

#[derive(Debug, Deserialize)]
struct LicenseBody {
    #[serde(default)]
    license: Option<LicenseInfo>,
}

#[derive(Debug, Deserialize)]
struct LicenseInfo {
    #[serde(default)]
    name: Option<String>,
}

/// `GET /repos/{owner}/{name}/license`, keyed by license name.
///
/// A 404 means the repository has no detectable license and counts under
/// [`RowKey::no_license`], as does a missing or null `license` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct LicenseLookup;

#[async_trait]
impl SecondaryLookup for LicenseLookup {
    fn kind(&self) -> ReportKind {
        ReportKind::Licenses
    }

    #[instrument(skip(self, ctx), fields(repo = %repo.full_name()))]
    async fn classify(
        &self,
        ctx: &FetchContext,
        repo: &Repository,
    ) -> Result<Classification, LookupError> {
        let response = ctx.transport.get(&ctx.endpoints.license(repo)).await?;
        if response.status == StatusCode::NOT_FOUND {
            debug!("No license");
            return Ok(Classification::new(RowKey::no_license(), 0));
        }
        ensure_success(&response)?;

        let body: LicenseBody = response.json()?;
        let key = body
            .license
            .and_then(|license| license.name)
            .filter(|name| !name.is_empty())
            .map_or_else(RowKey::no_license, RowKey::License);
        debug!(license = key.label(), "Classified");
        Ok(Classification::new(key, 0))
    }
}
