//! Data models and types for the site runtime.
//!
//! Contains domain types for:
//! - [`PageType`], [`Marker`], [`DocumentSummary`], [`FetchedPage`] - Page identity
//! - [`Resource`], [`LoadOptions`], [`InvalidateScope`] - Style/script resources
//! - [`NavState`], [`HistoryEntry`], [`HistoryMode`], [`Transition`] - Navigation
//! - [`Book`], [`BookSort`] - Reading list
//! - [`Quote`], [`QuoteFeed`], [`UserInfo`] - Guestbook

mod book;
mod navigation;
mod page;
mod quote;
mod resource;

pub use book::{Book, BookSort};
pub use navigation::{HistoryEntry, HistoryMode, NavState, Transition};
pub use page::{DocumentSummary, FetchedPage, Marker, PageType};
pub use quote::{ApiStatus, Quote, QuoteFeed, QuotesPayload, UserInfo};
pub use resource::{InvalidateScope, LoadOptions, Resource, ResourceKind};
