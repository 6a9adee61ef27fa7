//! Platform-independent core of the darlingx site runtime.
//!
//! This crate holds everything that does not need a browser to run:
//! - [`classifier`] - URL and document based [`PageType`] detection
//! - [`links`] - Which clicks become in-app navigations
//! - [`resources`] - Per-page resource manifest and the [`ResourceLoader`]
//! - [`navigation`] - The [`NavigationController`] state machine
//! - [`initializer`] - Page-specific setup after a content swap
//! - [`api`] - Contracts of the quotes/auth JSON endpoints
//! - [`host`] - Traits the browser layer implements
//!
//! The browser binary implements [`host::Host`] with web-sys; tests use the
//! in-memory [`mock::MockHost`] (enabled by the `mock` feature).

pub mod api;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod error;
pub mod host;
pub mod initializer;
pub mod links;
pub mod models;
pub mod navigation;
pub mod resources;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use classifier::{classify_from_document, classify_from_url};
pub use error::{ApiError, FetchError, NavigationError, ResourceError};
pub use initializer::Initializer;
pub use models::PageType;
pub use navigation::{NavigationConfig, NavigationController, NavigationOutcome};
pub use resources::ResourceLoader;
