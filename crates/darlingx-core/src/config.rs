//! Core configuration constants.
//!
//! Timings, storage keys and page names shared by the navigation pipeline
//! and the browser layer.

// =============================================================================
// Transition Timings
// =============================================================================

/// Fade-out duration in milliseconds; matches the CSS transition.
pub const FADE_OUT_MS: u32 = 300;

/// Delay between inserting new content and settling the fade-in.
pub const FADE_SETTLE_MS: u32 = 50;

/// Redirects followed by one navigation before giving up on the swap.
pub const MAX_REDIRECTS: usize = 4;

// =============================================================================
// Pages
// =============================================================================

/// Books listing page, target of book-details redirects.
pub const BOOKS_PAGE: &str = "books.html";

/// Query parameter carrying the book id on the details page.
pub const BOOK_ID_PARAM: &str = "id";

/// CSS selector of the swapped main-content region.
pub const MAIN_SELECTOR: &str = "main";

// =============================================================================
// Resources
// =============================================================================

/// Query parameter appended to resource URLs for cache busting.
pub const CACHE_BUST_PARAM: &str = "v";

/// The oracle widget script, guarded by a one-shot flag.
pub const ORACLE_SCRIPT: &str = "js/cyber-oracle.js";

// =============================================================================
// Preferences (localStorage)
// =============================================================================

/// Storage keys for persisted user preferences.
pub mod storage_keys {
    /// Selected book sort label.
    pub const BOOK_SORT: &str = "bookSort";
    /// Cover visibility flag (`"false"` hides covers).
    pub const SHOW_COVERS: &str = "showCovers";
}

// =============================================================================
// Guestbook
// =============================================================================

/// Author recorded when the quote form leaves it blank.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Message shown when the community quote list is empty.
pub const EMPTY_QUOTES_MESSAGE: &str = "No quotes yet. Add the first one above!";

/// Minimum password length accepted by registration.
pub const MIN_PASSWORD_LEN: usize = 6;
