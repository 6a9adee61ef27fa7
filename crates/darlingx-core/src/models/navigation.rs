//! Navigation state and browser history types.

use serde::{Deserialize, Serialize};

/// Stage of the navigation currently in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavState {
    #[default]
    Idle,
    Fetching,
    Classifying,
    ResourceLoading,
    Swapping,
    Initializing,
}

/// State object stored with every history entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub url: String,
}

impl HistoryEntry {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// How a navigation affects the history stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryMode {
    /// Link click: add a new entry.
    Push,
    /// Boot or redirect: overwrite the current entry.
    Replace,
    /// Back/forward: the browser already moved.
    Keep,
}

/// Transition phase applied to the main-content region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    FadeOut,
    FadeIn,
    Steady,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_entry_shape() {
        let entry = HistoryEntry::new("https://example.com/books.html");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"url":"https://example.com/books.html"}"#);
    }
}
