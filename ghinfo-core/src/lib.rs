// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # ghinfo Core
//!
//! Core types for collecting statistics over a window of public GitHub
//! repositories. Nothing in this crate performs I/O.
//!
//! ## Key Types
//!
//! ### Input
//! - [`Repository`] - One entry of the `/repositories` listing
//! - [`IdRange`] - Validated `(since, max_id]` window
//!
//! ### Aggregation
//! - [`BucketTier`] - Six ordered stargazer tiers
//! - [`RowKey`] - Row identity (tier or license)
//! - [`Aggregate`] - Keyed accumulator of repo counts and star totals
//! - [`LookupFailure`] - A repository whose secondary lookup failed
//!
//! ### Reports
//! - [`Report`] - Ordered rows plus totals and failures
//! - [`SortSpec`] - Sort column and direction

pub mod aggregate;
pub mod error;
pub mod models;
pub mod sort;

pub use aggregate::{Aggregate, Classification, LookupFailure, Tally};
pub use error::CoreError;
pub use models::{
    BucketTier, IdRange, Identified, MAX_RANGE_WIDTH, NO_LICENSE, Report, ReportKind,
    ReportRow, ReportStatus, Repository, RepositoryOwner, RowKey,
};
pub use sort::{SortDirection, SortKey, SortSpec, sort_rows};
