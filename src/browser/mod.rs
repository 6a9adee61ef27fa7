//! Browser implementation of the navigation host.
//!
//! - [`WebHost`] - [`darlingx_core::host::Host`] over web-sys
//! - [`head`] - URL-keyed style/script elements in `<head>`
//! - [`listener`] - Listeners and mount points released on drop
//! - [`modules`] - Calls into decorative enhancement scripts
//! - [`storage`] - localStorage preferences

mod head;
mod host;
mod listener;
mod modules;
mod render;
mod storage;

pub use host::WebHost;
