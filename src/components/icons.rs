//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuList as List, LuLock as Lock, LuPencil as Edit, LuPlus as Plus, LuUser as User,
        LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsListUl as List, BsLockFill as Lock, BsPencil as Edit, BsPerson as User,
        BsPlusLg as Plus, BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(LIST, List);
themed_icon!(PLUS, Plus);
themed_icon!(LOCK, Lock);
themed_icon!(CLOSE, Close);
themed_icon!(EDIT, Edit);
themed_icon!(USER, User);
