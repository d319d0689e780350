//! Range fetching over the `/repositories` listing.
//!
//! The listing is ordered by ascending id and can only be walked forward
//! through the `rel="next"` cursor, so pages are requested one after the
//! other. The walk starts at `since` and stops at the first page that
//! reaches `max_id`, when the cursor runs out, or on an empty page.

use ghinfo_core::{IdRange, Identified, Repository};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::context::FetchContext;
use crate::error::FetchError;
use crate::pagination::CursorPager;
use crate::trim::{PageCut, cut_page};

/// Collects every repository in an [`IdRange`].
pub struct RangeFetcher<'a> {
    ctx: &'a FetchContext,
}

impl<'a> RangeFetcher<'a> {
    /// Creates a fetcher over `ctx`.
    pub fn new(ctx: &'a FetchContext) -> Self {
        Self { ctx }
    }

    /// Fetches `(since, max_id]`.
    ///
    /// Returns [`FetchError::Cancelled`] as soon as `cancel` fires. Any other
    /// error aborts the walk; no partial list is returned.
    #[instrument(skip(self, cancel), fields(since = range.since(), max_id = range.max_id()))]
    pub async fn fetch_range(
        &self,
        range: IdRange,
        cancel: &CancellationToken,
    ) -> Result<Vec<Repository>, FetchError> {
        let max_id = range.max_id();
        let first_url = self.ctx.endpoints.repositories(range.since());
        let mut pager = CursorPager::new(self.ctx.transport.as_ref(), first_url);
        let mut repos = Vec::new();

        loop {
            let page = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(FetchError::Cancelled),
                page = pager.next_page::<Repository>() => page?,
            };

            // No cursor left.
            let Some(mut page) = page else { break };

            let cut = cut_page(max_id, &page);
            match cut {
                PageCut::BeyondBound => {
                    warn!(
                        first_id = page.first().map(Identified::id),
                        max_id, "Page starts above the range bound, discarding"
                    );
                }
                PageCut::Truncated(kept) => {
                    debug!(kept, dropped = page.len() - kept, "Trimmed page at bound");
                }
                PageCut::Empty | PageCut::ExactBound | PageCut::Below => {}
            }

            page.truncate(cut.kept(page.len()));
            repos.append(&mut page);

            if cut.is_final() {
                break;
            }
        }

        debug!(
            count = repos.len(),
            pages = pager.pages_fetched(),
            "Range fetch complete"
        );
        Ok(repos)
    }
}
