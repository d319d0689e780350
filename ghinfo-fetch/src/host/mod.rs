//! Host APIs for the fetch layer.
//!
//! - [`http`] - `reqwest` transport with tracing and a host allowlist

pub mod http;

pub use http::HttpClient;
