//! UI components built with Leptos.
//!
//! - [`router`] - Link interception and history wiring (main entry point)
//! - [`loader`] - Loading overlay shown during page transitions
//! - [`shelf`] - Interactive book shelf for the books page
//! - [`quotes`] - Community quotes guestbook
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod icons;
pub mod loader;
pub mod quotes;
pub mod router;
pub mod shelf;

pub use loader::LoaderOverlay;
pub use router::SiteRouter;
