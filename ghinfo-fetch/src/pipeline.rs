//! Report pipeline: validate, fetch the range, look up, build the report.

use std::time::Instant;

use ghinfo_core::{CoreError, IdRange, Report, ReportKind, SortSpec};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::aggregator::SecondaryAggregator;
use crate::context::FetchContext;
use crate::error::{FetchError, ReportError};
use crate::fetcher::RangeFetcher;
use crate::lookup::lookup_for;

// ============================================================================
// Report Request
// ============================================================================

/// A validated report request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRequest {
    /// Which report to build.
    pub kind: ReportKind,
    /// Identifier window.
    pub range: IdRange,
    /// Row ordering.
    pub sort: SortSpec,
}

impl ReportRequest {
    /// Validates the range and the sort key for `kind`.
    pub fn new(
        kind: ReportKind,
        since: u64,
        max_id: u64,
        sort: SortSpec,
    ) -> Result<Self, CoreError> {
        let range = IdRange::new(since, max_id)?;
        kind.validate_sort(sort)?;
        Ok(Self { kind, range, sort })
    }
}

// ============================================================================
// Report Pipeline
// ============================================================================

/// Runs a [`ReportRequest`] end to end.
#[derive(Debug)]
pub struct ReportPipeline {
    ctx: FetchContext,
}

impl ReportPipeline {
    /// Creates a pipeline over `ctx`.
    pub fn new(ctx: FetchContext) -> Self {
        Self { ctx }
    }

    /// The fetch context.
    pub fn context(&self) -> &FetchContext {
        &self.ctx
    }

    /// Builds the report.
    ///
    /// Validation happens before any request. A failed range fetch is fatal
    /// and yields no report. Lookup failures are attached to the report.
    /// On cancellation the error carries the report built from every result
    /// committed so far.
    #[instrument(skip(self, cancel), fields(kind = %request.kind, range = %request.range))]
    pub async fn run(
        &self,
        request: &ReportRequest,
        cancel: &CancellationToken,
    ) -> Result<Report, ReportError> {
        request.kind.validate_sort(request.sort)?;
        let start = Instant::now();

        let repos = match RangeFetcher::new(&self.ctx)
            .fetch_range(request.range, cancel)
            .await
        {
            Ok(repos) => repos,
            Err(FetchError::Cancelled) => {
                return Err(ReportError::Cancelled {
                    partial: Box::new(
                        Report::empty(request.kind, request.range, request.sort)
                            .into_interrupted(),
                    ),
                });
            }
            Err(e) => return Err(ReportError::Fetch(e)),
        };
        info!(count = repos.len(), "Fetched repositories in range");

        if repos.is_empty() {
            return Ok(Report::empty(request.kind, request.range, request.sort));
        }

        let lookup = lookup_for(request.kind);
        let outcome = SecondaryAggregator::new(&self.ctx, lookup.as_ref())
            .aggregate(&repos, cancel)
            .await;

        let cancelled = outcome.cancelled;
        let report = Report::build(
            request.kind,
            request.range,
            outcome.aggregate,
            outcome.failures,
            repos.len() as u64,
            request.sort,
        );

        info!(
            rows = report.rows().len(),
            repos = report.total_repo_count(),
            failures = report.failures().len(),
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Report built"
        );

        if cancelled {
            return Err(ReportError::Cancelled {
                partial: Box::new(report.into_interrupted()),
            });
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedTransport, page, stars, status};
    use ghinfo_core::{ReportStatus, SortKey};
    use reqwest::StatusCode;
    use std::sync::Arc;

    fn pipeline(transport: Arc<ScriptedTransport>) -> ReportPipeline {
        let ctx = FetchContext::builder()
            .transport(transport)
            .api_base("https://x.test")
            .concurrency(1)
            .build()
            .unwrap();
        ReportPipeline::new(ctx)
    }

    fn star_request(since: u64, max_id: u64) -> ReportRequest {
        ReportRequest::new(ReportKind::Stargazers, since, max_id, SortSpec::default()).unwrap()
    }

    fn scenario() -> ScriptedTransport {
        ScriptedTransport::new()
            .respond(
                "https://x.test/repositories?since=1",
                page(&[2, 3, 5, 50], Some("https://x.test/repositories?since=50")),
            )
            .respond("https://x.test/repos/owner2/repo2", stars(5))
            .respond("https://x.test/repos/owner3/repo3", stars(15))
            .respond("https://x.test/repos/owner5/repo5", stars(150))
    }

    #[tokio::test]
    async fn test_end_to_end_star_report() {
        let transport = Arc::new(scenario());
        let report = pipeline(transport.clone())
            .run(&star_request(1, 10), &CancellationToken::new())
            .await
            .unwrap();

        let rows: Vec<(&str, u64)> = report
            .rows()
            .iter()
            .map(|r| (r.key.label(), r.repo_count))
            .collect();
        assert_eq!(rows, [("0..10", 1), ("10..100", 1), ("100..1000", 1)]);
        assert_eq!(report.total_repo_count(), 3);
        assert_eq!(report.status(), ReportStatus::Complete);
        // One listing page, three lookups; repository 50 is never looked up.
        assert_eq!(transport.requests().len(), 4);
    }

    #[test]
    fn test_request_validation() {
        assert!(matches!(
            ReportRequest::new(ReportKind::Stargazers, 10, 5, SortSpec::default()),
            Err(CoreError::InvalidRange { .. })
        ));
        assert!(matches!(
            ReportRequest::new(ReportKind::Stargazers, 1, 502, SortSpec::default()),
            Err(CoreError::RangeTooWide { .. })
        ));
        assert!(matches!(
            ReportRequest::new(
                ReportKind::Licenses,
                1,
                10,
                SortSpec::ascending(SortKey::StarTotal)
            ),
            Err(CoreError::UnsupportedSortKey { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_sort_makes_no_request() {
        let transport = Arc::new(scenario());
        let request = ReportRequest {
            kind: ReportKind::Licenses,
            range: IdRange::new(1, 10).unwrap(),
            sort: SortSpec::descending(SortKey::StarTotal),
        };

        let err = pipeline(transport.clone())
            .run(&request, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::Validation(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_listing_failure_is_fatal() {
        let transport = Arc::new(ScriptedTransport::new().respond(
            "https://x.test/repositories?since=1",
            status(StatusCode::SERVICE_UNAVAILABLE),
        ));
        let err = pipeline(transport)
            .run(&star_request(1, 10), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::Fetch(FetchError::Status { .. })));
        assert!(err.partial_report().is_none());
    }

    #[tokio::test]
    async fn test_empty_range() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond("https://x.test/repositories?since=1", page(&[], None)),
        );
        let report = pipeline(transport)
            .run(&star_request(1, 10), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(report.status(), ReportStatus::EmptyRange);
        assert!(report.rows().is_empty());
    }

    #[tokio::test]
    async fn test_all_lookups_failed() {
        let transport = Arc::new(ScriptedTransport::new().respond(
            "https://x.test/repositories?since=1",
            page(&[2, 3], None),
        ));
        let report = pipeline(transport)
            .run(&star_request(1, 10), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(report.status(), ReportStatus::AllFailed);
        assert_eq!(report.failures().len(), 2);
    }

    #[tokio::test]
    async fn test_cancel_during_lookups_returns_partial() {
        let cancel = CancellationToken::new();
        // Listing page plus the first lookup.
        let transport = Arc::new(scenario().cancel_after(2, cancel.clone()));

        let err = pipeline(transport)
            .run(&star_request(1, 10), &cancel)
            .await
            .unwrap_err();

        let partial = err.partial_report().unwrap();
        assert_eq!(partial.fetched_count(), 3);
        assert_eq!(partial.total_repo_count(), 1);
        assert_eq!(partial.status(), ReportStatus::Incomplete);
    }

    #[tokio::test]
    async fn test_cancel_before_any_lookup_commits() {
        let cancel = CancellationToken::new();
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(
                    "https://x.test/repositories?since=1",
                    page(&[2, 3, 10], None),
                )
                .cancel_after(1, cancel.clone()),
        );

        let err = pipeline(transport)
            .run(&star_request(1, 10), &cancel)
            .await
            .unwrap_err();

        let partial = err.partial_report().unwrap();
        assert_eq!(partial.fetched_count(), 3);
        assert_eq!(partial.total_repo_count(), 0);
        assert!(partial.failures().is_empty());
        assert_eq!(partial.status(), ReportStatus::Incomplete);
    }

    #[tokio::test]
    async fn test_cancel_before_start() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = pipeline(Arc::new(scenario()))
            .run(&star_request(1, 10), &cancel)
            .await
            .unwrap_err();
        let partial = err.partial_report().unwrap();
        assert_eq!(partial.fetched_count(), 0);
        assert_eq!(partial.status(), ReportStatus::Incomplete);
    }
}
