//! Browser utilities.
//!
//! Provides:
//! - [`dom`] - Window, document and storage access
//! - [`fetch_text`] - Page fetching with timeout
//! - [`cache`] - sessionStorage cache for API responses
//! - [`logging`] - Console backend for the `log` facade

pub mod cache;
pub mod dom;
mod fetch;
pub mod logging;

pub use fetch::fetch_text;
