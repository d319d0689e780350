//! Domain models for ghinfo.
//!
//! ## Submodules
//!
//! - [`repository`] - Repositories from the listing endpoint
//! - [`range`] - Validated identifier window
//! - [`bucket`] - Stargazer tiers and row keys
//! - [`report`] - Report kinds, rows, and the finished report

mod bucket;
mod range;
mod report;
mod repository;

pub use bucket::{BucketTier, NO_LICENSE, RowKey};
pub use range::{IdRange, MAX_RANGE_WIDTH};
pub use report::{Report, ReportKind, ReportRow, ReportStatus};
pub use repository::{Identified, Repository, RepositoryOwner};
