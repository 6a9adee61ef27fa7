//! Style and script resource descriptors.

use super::PageType;

/// Kind of element a resource is attached as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// `<link rel="stylesheet">`
    Style,
    /// `<script>`
    Script,
}

/// A style sheet or script required by a page. Identity is the URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Resource {
    pub kind: ResourceKind,
    pub url: &'static str,
    /// Global name of the enhancement module the script registers, exposing
    /// `attach(root)` / `detach(root)`.
    pub module: Option<&'static str>,
    /// Kept for the rest of the session once loaded; only
    /// [`InvalidateScope::All`] removes it.
    pub sticky: bool,
}

impl Resource {
    pub const fn style(url: &'static str) -> Self {
        Self {
            kind: ResourceKind::Style,
            url,
            module: None,
            sticky: false,
        }
    }

    pub const fn script(url: &'static str) -> Self {
        Self {
            kind: ResourceKind::Script,
            url,
            module: None,
            sticky: false,
        }
    }

    pub const fn with_module(mut self, name: &'static str) -> Self {
        self.module = Some(name);
        self
    }

    pub const fn sticky(mut self) -> Self {
        self.sticky = true;
        self
    }
}

/// Options for a resource load batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    /// When `false`, newly inserted resources get a cache-busting parameter.
    pub cache: bool,
    /// Page URL the batch is for. Diagnostics only.
    pub url: Option<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            cache: true,
            url: None,
        }
    }
}

/// Which loaded resources an invalidation removes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InvalidateScope {
    /// Everything, including the common bundle.
    All,
    /// Everything outside the common bundle, except sticky resources.
    #[default]
    PageSpecific,
    /// Everything the given page does not list in its manifest, except
    /// sticky resources.
    Unneeded(PageType),
}
