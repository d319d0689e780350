// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

//! # ghinfo Fetch
//!
//! Network side of ghinfo: walking the `/repositories` listing over an id
//! range and running one secondary lookup per repository.
//!
//! ## Stages
//!
//! - [`fetcher::RangeFetcher`] - Sequential cursor walk bounded by `max_id`
//! - [`trim`] - Cutting a page at the upper bound
//! - [`aggregator::SecondaryAggregator`] - Bounded-concurrency lookups
//! - [`pipeline::ReportPipeline`] - All of the above, producing a `Report`
//!
//! ## Host APIs
//!
//! - [`transport::Transport`] - `GET` abstraction the stages talk through
//! - [`host::http::HttpClient`] - `reqwest` implementation with a host allowlist
//!
//! ## Example
//!
//! ```ignore
//! use ghinfo_core::{ReportKind, SortSpec};
//! use ghinfo_fetch::{FetchContext, FetchSettings, ReportPipeline, ReportRequest};
//! use tokio_util::sync::CancellationToken;
//!
//! let ctx = FetchContext::new(FetchSettings::default())?;
//! let request = ReportRequest::new(ReportKind::Stargazers, 1, 100, SortSpec::default())?;
//! let report = ReportPipeline::new(ctx)
//!     .run(&request, &CancellationToken::new())
//!     .await?;
//! ```

pub mod aggregator;
pub mod context;
pub mod endpoints;
pub mod error;
pub mod fetcher;
pub mod host;
pub mod lookup;
pub mod pagination;
pub mod pipeline;
pub mod transport;
pub mod trim;

#[cfg(test)]
mod testing;

// Errors
pub use error::{FetchError, HttpError, LookupError, ReportError};

// Host APIs
pub use host::http::HttpClient;
pub use transport::{Transport, TransportResponse};

// Stages & Pipeline
pub use aggregator::{AggregateOutcome, SecondaryAggregator};
pub use context::{
    DEFAULT_API_BASE, DEFAULT_CONCURRENCY, DEFAULT_USER_AGENT, FetchContext,
    FetchContextBuilder, FetchSettings, MAX_CONCURRENCY,
};
pub use endpoints::Endpoints;
pub use fetcher::RangeFetcher;
pub use lookup::{LicenseLookup, SecondaryLookup, StarLookup, lookup_for};
pub use pagination::CursorPager;
pub use pipeline::{ReportPipeline, ReportRequest};
pub use trim::{PageCut, cut_page, trim};
