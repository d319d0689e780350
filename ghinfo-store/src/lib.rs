// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

//! # ghinfo Store
//!
//! Configuration file handling and API token resolution.
//!
//! ## Usage
//!
//! ```ignore
//! use ghinfo_store::{Config, token_from_env};
//!
//! let config = Config::load().await?;
//! let settings = config.fetch_settings(token_from_env());
//! ```

pub mod config;
pub mod error;
pub mod persistence;
pub mod token;

pub use config::Config;
pub use error::StoreError;
pub use persistence::{default_config_dir, default_config_path, ensure_dir, load_json, save_json};
pub use token::{TOKEN_ENV_VARS, resolve_token, token_from_env};

#[cfg(test)]
mod persistence_tests;
