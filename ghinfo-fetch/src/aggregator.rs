//! Bounded-concurrency secondary lookups folded into one [`Aggregate`].
//!
//! Lookups run on a `buffer_unordered` pool; results are consumed by this
//! task alone, so every repository lands exactly once in either the
//! aggregate or the failure list.

use futures::stream::{self, StreamExt};
use ghinfo_core::{Aggregate, LookupFailure, Repository};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::context::FetchContext;
use crate::lookup::SecondaryLookup;

// ============================================================================
// Aggregate Outcome
// ============================================================================

/// Result of a secondary lookup pass.
#[derive(Debug, Default)]
pub struct AggregateOutcome {
    /// Counts and star totals of the successful lookups.
    pub aggregate: Aggregate,
    /// Failed lookups in input order.
    pub failures: Vec<LookupFailure>,
    /// Lookups whose result was committed.
    pub attempted: usize,
    /// True if the pass stopped on cancellation.
    pub cancelled: bool,
}

impl AggregateOutcome {
    /// Number of successful lookups.
    pub fn succeeded(&self) -> usize {
        self.attempted - self.failures.len()
    }
}

// ============================================================================
// Secondary Aggregator
// ============================================================================

/// Runs one lookup per repository and accumulates the results.
pub struct SecondaryAggregator<'a> {
    ctx: &'a FetchContext,
    lookup: &'a dyn SecondaryLookup,
}

impl<'a> SecondaryAggregator<'a> {
    /// Creates an aggregator using `lookup`.
    pub fn new(ctx: &'a FetchContext, lookup: &'a dyn SecondaryLookup) -> Self {
        Self { ctx, lookup }
    }

    /// Looks up every repository in `repos`.
    ///
    /// Failures are recorded, never fatal. When `cancel` fires, lookups in
    /// flight are dropped and the outcome holds what was committed so far.
    #[instrument(skip_all, fields(kind = %self.lookup.kind(), repos = repos.len()))]
    pub async fn aggregate(
        &self,
        repos: &[Repository],
        cancel: &CancellationToken,
    ) -> AggregateOutcome {
        let concurrency = self.ctx.concurrency();
        debug!(concurrency, "Starting secondary lookups");

        let (ctx, lookup) = (self.ctx, self.lookup);
        let mut results = stream::iter(repos.iter().enumerate())
            .map(move |(index, repo)| async move {
                (index, repo, lookup.classify(ctx, repo).await)
            })
            .buffer_unordered(concurrency);

        let mut outcome = AggregateOutcome::default();
        let mut failures = Vec::new();

        loop {
            let next = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    outcome.cancelled = true;
                    break;
                }
                next = results.next() => next,
            };
            let Some((index, repo, result)) = next else {
                break;
            };

            outcome.attempted += 1;
            match result {
                Ok(classification) => outcome.aggregate.record(classification),
                Err(e) => {
                    warn!(repo = %repo, error = %e, "Lookup failed");
                    failures.push((index, LookupFailure::new(repo.clone(), e.to_string())));
                }
            }
        }

        failures.sort_by_key(|(index, _)| *index);
        outcome.failures = failures.into_iter().map(|(_, failure)| failure).collect();

        info!(
            attempted = outcome.attempted,
            failed = outcome.failures.len(),
            cancelled = outcome.cancelled,
            "Secondary lookups finished"
        );
        outcome
    }
}
