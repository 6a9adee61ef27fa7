//! Application configuration.
//!
//! Constants for the browser layer. Timings and storage keys shared with the
//! navigation pipeline live in [`darlingx_core::config`].

// =============================================================================
// Network Configuration
// =============================================================================

/// Page fetch timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 10000;

// =============================================================================
// Cache Configuration
// =============================================================================

/// Session cache configuration.
pub mod cache {
    /// sessionStorage key for the community quote list.
    pub const QUOTES_KEY: &str = "quotes_cache";
}

// =============================================================================
// Document Hooks
// =============================================================================

/// Ids and classes the site's markup provides.
pub mod dom_ids {
    pub const BOOKS_GRID: &str = "booksGrid";
    pub const SORT_SELECT: &str = ".sort-select";
    pub const COVER_TOGGLE: &str = "coverToggle";
    pub const HIDE_COVERS_CLASS: &str = "hide-covers";
    pub const INITIALIZED_CLASS: &str = "initialized";
    /// Body class while a page transition is in flight.
    pub const PAGE_LOADING_CLASS: &str = "page-loading";

    /// Fixed slots of the book-details page.
    pub mod details {
        pub const COVER: &str = "bookCover";
        pub const TITLE: &str = "bookTitle";
        pub const AUTHOR: &str = "bookAuthor";
        pub const DATE_READ: &str = "dateRead";
        pub const DESCRIPTION: &str = "bookDescription";
        pub const PAGES: &str = "pageCount";
        pub const PUBLISH_DATE: &str = "publishDate";
        pub const GENRE: &str = "genre";
    }

    /// Section that hosts the guestbook.
    pub const ABOUT_SECTION: &str = ".about";
    /// Static quote list; the guestbook mounts right before it.
    pub const QUOTES_CONTAINER: &str = ".quotes-container";
}

// =============================================================================
// Image Sizing
// =============================================================================

/// Viewport width below which the layout is mobile.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

/// Cover width on the book-details page.
pub const DETAIL_COVER_WIDTH: &str = "300px";

/// Marks images already processed by the sizing pass.
pub const SIZED_ATTR: &str = "data-sized";

// =============================================================================
// Guestbook
// =============================================================================

/// How long a notice stays visible, in milliseconds.
pub const NOTICE_MS: u32 = 3000;

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;
