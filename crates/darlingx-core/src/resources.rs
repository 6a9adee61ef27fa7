//! Per-page resource manifest and loader.
//!
//! The loader keeps two views in step: its own bookkeeping of loaded URLs and
//! the live elements held by a [`ResourceSink`]. Insertion is an upsert keyed
//! by URL and invalidation removes the live elements, so a resource URL maps
//! to at most one element at any time.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::ResourceError;
use crate::host::ResourceSink;
use crate::links::with_cache_buster;
use crate::models::{InvalidateScope, LoadOptions, PageType, Resource};

/// Resources every page needs: base styles and the decorative modules.
pub const COMMON_RESOURCES: &[Resource] = &[
    Resource::style("css/style.css"),
    Resource::style("css/constellation.css"),
    Resource::script("js/matrix-animation.js").with_module("MatrixText"),
    Resource::script("js/cursor.js").with_module("Cursor"),
    Resource::script("js/constellation.js").with_module("Constellation"),
];

/// Resources added on top of [`COMMON_RESOURCES`] for one page type.
pub fn page_resources(page: PageType) -> &'static [Resource] {
    const BOOKS: &[Resource] = &[Resource::style("css/books.css"), Resource::script("js/books.js")];
    const BOOK_DETAILS: &[Resource] = &[
        Resource::style("css/book-details.css"),
        Resource::script("js/book-details.js"),
    ];
    const POSTS: &[Resource] = &[Resource::style("css/posts.css")];
    const OPEN_QUESTIONS: &[Resource] = &[
        Resource::style("css/posts.css"),
        Resource::style("css/simple-posts.css"),
        Resource::script(crate::config::ORACLE_SCRIPT)
            .with_module("CyberOracle")
            .sticky(),
    ];

    match page {
        PageType::Books => BOOKS,
        PageType::BookDetails => BOOK_DETAILS,
        PageType::Posts => POSTS,
        PageType::OpenQuestions => OPEN_QUESTIONS,
        PageType::Home | PageType::Lists | PageType::Projects | PageType::Cv => &[],
    }
}

/// Full resource list of a page: common bundle first, deduplicated by URL.
pub fn manifest(page: PageType) -> Vec<Resource> {
    let mut resources: Vec<Resource> = Vec::new();
    for resource in COMMON_RESOURCES.iter().chain(page_resources(page)) {
        if !resources.iter().any(|r| r.url == resource.url) {
            resources.push(*resource);
        }
    }
    resources
}

fn is_common(url: &str) -> bool {
    COMMON_RESOURCES.iter().any(|r| r.url == url)
}

/// Loads page resources into a [`ResourceSink`] exactly once per URL.
pub struct ResourceLoader<S> {
    sink: Rc<S>,
    loaded: RefCell<BTreeMap<&'static str, Resource>>,
}

impl<S: ResourceSink> ResourceLoader<S> {
    pub fn new(sink: Rc<S>) -> Self {
        Self {
            sink,
            loaded: RefCell::new(BTreeMap::new()),
        }
    }

    /// Ensure every resource of `page` is attached and settled.
    ///
    /// Resources load one after another in manifest order so scripts execute
    /// in a predictable sequence. The first failure rejects the whole batch.
    pub async fn load_page_resources(
        &self,
        page: PageType,
        options: &LoadOptions,
    ) -> Result<(), ResourceError> {
        let resources = manifest(page);
        log::info!(
            "loading {} resources for page type {page} ({})",
            resources.len(),
            options.url.as_deref().unwrap_or("current page")
        );

        for resource in &resources {
            self.ensure(resource, options).await?;
        }
        Ok(())
    }

    /// Attach a single resource unless a live element already exists.
    pub async fn ensure(&self, resource: &Resource, options: &LoadOptions) -> Result<(), ResourceError> {
        let url = resource.url;
        if !self.sink.contains(url) {
            let src = if options.cache {
                url.to_string()
            } else {
                with_cache_buster(url, &self.sink.cache_token())
            };
            log::debug!("injecting {src}");
            self.sink.insert(resource, &src)?;
        }

        match self.sink.settle(url).await {
            Ok(()) => {
                self.loaded.borrow_mut().insert(url, *resource);
                Ok(())
            }
            Err(e) => {
                log::warn!("{e}");
                self.sink.remove(url);
                self.loaded.borrow_mut().remove(url);
                Err(e)
            }
        }
    }

    /// Forget loaded resources in `scope` and remove their elements.
    ///
    /// Sticky resources are only dropped by [`InvalidateScope::All`].
    pub fn invalidate_cache(&self, scope: InvalidateScope) {
        let keep: Vec<&'static str> = match scope {
            InvalidateScope::All => Vec::new(),
            InvalidateScope::PageSpecific => COMMON_RESOURCES.iter().map(|r| r.url).collect(),
            InvalidateScope::Unneeded(next) => manifest(next).iter().map(|r| r.url).collect(),
        };

        let removed: Vec<&'static str> = {
            let mut loaded = self.loaded.borrow_mut();
            let removed = loaded
                .values()
                .filter(|r| scope == InvalidateScope::All || !r.sticky)
                .map(|r| r.url)
                .filter(|url| !keep.contains(url))
                .collect::<Vec<_>>();
            for url in &removed {
                loaded.remove(url);
            }
            removed
        };

        for url in &removed {
            self.sink.remove(url);
        }
        log::debug!("invalidated {} resources ({scope:?})", removed.len());
    }

    pub fn is_loaded(&self, url: &str) -> bool {
        self.loaded.borrow().contains_key(url)
    }

    /// Loaded resource URLs in sorted order.
    pub fn loaded_urls(&self) -> Vec<&'static str> {
        self.loaded.borrow().keys().copied().collect()
    }

    /// Enhancement modules of the loaded scripts, common bundle first.
    pub fn modules_for(&self, page: PageType) -> Vec<&'static str> {
        manifest(page)
            .iter()
            .filter(|r| self.is_loaded(r.url))
            .filter_map(|r| r.module)
            .collect()
    }

    /// Whether a URL belongs to the bundle shared by every page.
    pub fn is_common(url: &str) -> bool {
        is_common(url)
    }
}
