//! Seams between the navigation pipeline and the browser.
//!
//! The browser binary implements every trait with web-sys; tests use
//! [`crate::mock::MockHost`]. All futures run on a single-threaded executor,
//! so none of these traits require `Send`.

#![allow(async_fn_in_trait)]

use crate::error::{FetchError, ResourceError, StorageError};
use crate::initializer::{BookDetailsView, ShelfPlan};
use crate::models::{DocumentSummary, FetchedPage, HistoryEntry, HistoryMode, Resource, Transition};

/// Network access to site pages.
pub trait PageSource {
    /// GET the full HTML of a page. Non-2xx responses are errors.
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;

    /// Parse fetched HTML into title, main markup and marker summary.
    fn parse_page(&self, html: &str) -> FetchedPage;
}

/// The live document: main region, loading UI, title, history, location.
pub trait Stage {
    fn current_url(&self) -> String;

    /// Marker summary of the live document.
    fn live_summary(&self) -> DocumentSummary;

    /// Show or hide the loading overlay and the `page-loading` body class.
    fn set_loading(&self, loading: bool);

    fn set_title(&self, title: &str);

    fn has_main_region(&self) -> bool;

    fn set_transition(&self, transition: Transition);

    /// Replace the main region's inner markup wholesale.
    fn replace_main(&self, html: &str);

    /// Timer suspension used by the fade transition.
    async fn sleep(&self, ms: u32);

    fn write_history(&self, entry: &HistoryEntry, mode: HistoryMode);

    /// Full browser navigation; leaves the single-page flow.
    fn hard_navigate(&self, url: &str);

    /// Call `attach(main)` on an enhancement module, if it is registered.
    fn attach_module(&self, name: &str);

    /// Call `detach(main)` on an enhancement module, if it is registered.
    fn detach_module(&self, name: &str);
}

/// The document head as a URL-keyed set of style/script elements.
///
/// Keys are resource URLs without cache-busting parameters. Statically
/// present `<link href>`/`<script src>` tags with the same URL count as
/// present.
pub trait ResourceSink {
    fn contains(&self, url: &str) -> bool;

    /// Create and append the element synchronously, fetching from `src`.
    fn insert(&self, resource: &Resource, src: &str) -> Result<(), ResourceError>;

    /// Resolve once the element for `url` has loaded (immediately if it
    /// already has or is not tracked).
    async fn settle(&self, url: &str) -> Result<(), ResourceError>;

    /// Remove every element for `url`.
    fn remove(&self, url: &str);

    /// A fresh token for cache busting.
    fn cache_token(&self) -> String;
}

/// DOM writes performed by the page initializer.
pub trait PageRenderer {
    fn render_books(&self, plan: &ShelfPlan);

    fn render_book_details(&self, view: &BookDetailsView);

    /// Mount the quotes guestbook if the page hosts one.
    fn attach_guestbook(&self) -> bool;

    /// Give `<img>` elements without explicit sizing a stable size.
    fn normalize_images(&self);

    /// Unmount widgets and drop listeners bound to the current content.
    fn release_widgets(&self);
}

/// Durable string key-value storage (localStorage).
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Everything the navigation pipeline needs from its environment.
pub trait Host: PageSource + Stage + ResourceSink + PageRenderer + PreferenceStore {}

impl<T> Host for T where T: PageSource + Stage + ResourceSink + PageRenderer + PreferenceStore {}
