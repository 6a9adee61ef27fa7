//! In-memory host for tests.
//!
//! Records every side effect the navigation pipeline performs so tests can
//! assert on ordering and content without a browser. Async operations yield
//! to the executor once (or a configurable number of times for page fetches)
//! so concurrent navigations interleave realistically.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::future::poll_fn;
use std::task::Poll;

use crate::error::{FetchError, ResourceError, StorageError};
use crate::host::{PageRenderer, PageSource, PreferenceStore, ResourceSink, Stage};
use crate::initializer::{BookDetailsView, ShelfPlan};
use crate::models::{
    DocumentSummary, FetchedPage, HistoryEntry, HistoryMode, Marker, Resource, Transition,
};

/// Prefix of the fake HTML returned by [`MockHost::fetch_page`].
const MOCK_HTML_PREFIX: &str = "<!-- mock page: ";

/// Suspend once, waking immediately.
async fn yield_once() {
    let mut yielded = false;
    poll_fn(|cx| {
        if yielded {
            return Poll::Ready(());
        }
        yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    })
    .await
}

/// A page the mock server knows about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockPage {
    pub title: String,
    pub main: Option<String>,
    pub markers: Vec<Marker>,
}

impl MockPage {
    pub fn new(title: &str, main: &str) -> Self {
        Self {
            title: title.to_string(),
            main: Some(main.to_string()),
            markers: Vec::new(),
        }
    }

    /// A page without a `<main>` region.
    pub fn without_main(title: &str) -> Self {
        Self {
            title: title.to_string(),
            main: None,
            markers: Vec::new(),
        }
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    fn summary(&self) -> DocumentSummary {
        DocumentSummary::new(self.markers.iter().copied())
    }
}

/// A [`PageRenderer`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderCall {
    Books(ShelfPlan),
    BookDetails(BookDetailsView),
    Guestbook,
    NormalizeImages,
    Release,
}

/// Recording implementation of every host trait.
pub struct MockHost {
    url: RefCell<String>,
    live: RefCell<DocumentSummary>,
    main_present: Cell<bool>,
    main_html: RefCell<String>,
    title: RefCell<String>,
    loading: Cell<bool>,
    pages: RefCell<HashMap<String, MockPage>>,
    fetch_failures: RefCell<HashMap<String, FetchError>>,
    latency: RefCell<HashMap<String, usize>>,
    elements: RefCell<Vec<(String, String)>>,
    insertions: RefCell<Vec<String>>,
    failing_resources: RefCell<HashSet<String>>,
    storage: RefCell<HashMap<String, String>>,
    storage_fails: Cell<bool>,
    guestbook: Cell<bool>,
    token: Cell<u64>,
    transitions: RefCell<Vec<Transition>>,
    sleeps: RefCell<Vec<u32>>,
    history: RefCell<Vec<(HistoryEntry, HistoryMode)>>,
    hard_navigations: RefCell<Vec<String>>,
    modules: RefCell<Vec<String>>,
    renders: RefCell<Vec<RenderCall>>,
    events: RefCell<Vec<String>>,
}

impl MockHost {
    /// A host whose live document is at `url` and has a main region.
    pub fn new(url: &str) -> Self {
        Self {
            url: RefCell::new(url.to_string()),
            live: RefCell::new(DocumentSummary::default()),
            main_present: Cell::new(true),
            main_html: RefCell::new(String::new()),
            title: RefCell::new(String::new()),
            loading: Cell::new(false),
            pages: RefCell::new(HashMap::new()),
            fetch_failures: RefCell::new(HashMap::new()),
            latency: RefCell::new(HashMap::new()),
            elements: RefCell::new(Vec::new()),
            insertions: RefCell::new(Vec::new()),
            failing_resources: RefCell::new(HashSet::new()),
            storage: RefCell::new(HashMap::new()),
            storage_fails: Cell::new(false),
            guestbook: Cell::new(false),
            token: Cell::new(0),
            transitions: RefCell::new(Vec::new()),
            sleeps: RefCell::new(Vec::new()),
            history: RefCell::new(Vec::new()),
            hard_navigations: RefCell::new(Vec::new()),
            modules: RefCell::new(Vec::new()),
            renders: RefCell::new(Vec::new()),
            events: RefCell::new(Vec::new()),
        }
    }

    // -- setup --------------------------------------------------------------

    /// Serve `page` at the absolute `url`.
    pub fn register(&self, url: &str, page: MockPage) {
        self.pages.borrow_mut().insert(url.to_string(), page);
    }

    pub fn fail_fetch(&self, url: &str, error: FetchError) {
        self.fetch_failures.borrow_mut().insert(url.to_string(), error);
    }

    /// Make fetches of `url` yield `yields` extra times before resolving.
    pub fn set_latency(&self, url: &str, yields: usize) {
        self.latency.borrow_mut().insert(url.to_string(), yields);
    }

    pub fn fail_resource(&self, url: &str) {
        self.failing_resources.borrow_mut().insert(url.to_string());
    }

    /// Pretend the document shipped a `<link>`/`<script>` for `url`.
    pub fn add_static_element(&self, url: &str) {
        self.elements
            .borrow_mut()
            .push((url.to_string(), url.to_string()));
    }

    pub fn set_url(&self, url: &str) {
        *self.url.borrow_mut() = url.to_string();
    }

    pub fn set_live_summary(&self, summary: DocumentSummary) {
        *self.live.borrow_mut() = summary;
    }

    pub fn remove_main_region(&self) {
        self.main_present.set(false);
    }

    /// Whether the live page hosts the guestbook.
    pub fn with_guestbook(&self, present: bool) {
        self.guestbook.set(present);
    }

    pub fn set_preference(&self, key: &str, value: &str) {
        self.storage
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub fn fail_storage(&self) {
        self.storage_fails.set(true);
    }

    // -- inspection ---------------------------------------------------------

    pub fn preference(&self, key: &str) -> Option<String> {
        self.storage.borrow().get(key).cloned()
    }

    pub fn element_count(&self, url: &str) -> usize {
        self.elements.borrow().iter().filter(|(u, _)| u == url).count()
    }

    /// `src` of every element the pipeline inserted, in order.
    pub fn insertions(&self) -> Vec<String> {
        self.insertions.borrow().clone()
    }

    pub fn main_html(&self) -> String {
        self.main_html.borrow().clone()
    }

    pub fn title(&self) -> String {
        self.title.borrow().clone()
    }

    pub fn url(&self) -> String {
        self.url.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn transitions(&self) -> Vec<Transition> {
        self.transitions.borrow().clone()
    }

    pub fn sleeps(&self) -> Vec<u32> {
        self.sleeps.borrow().clone()
    }

    pub fn history(&self) -> Vec<(HistoryEntry, HistoryMode)> {
        self.history.borrow().clone()
    }

    pub fn hard_navigations(&self) -> Vec<String> {
        self.hard_navigations.borrow().clone()
    }

    /// Modules currently attached, in attach order.
    pub fn attached_modules(&self) -> Vec<String> {
        self.modules.borrow().clone()
    }

    pub fn render_calls(&self) -> Vec<RenderCall> {
        self.renders.borrow().clone()
    }

    /// Side effects in order, e.g. `fetch <url>`, `replace main`.
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
        self.renders.borrow_mut().clear();
    }

    fn record(&self, event: String) {
        self.events.borrow_mut().push(event);
    }
}

impl PageSource for MockHost {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        self.record(format!("fetch {url}"));
        let yields = self.latency.borrow().get(url).copied().unwrap_or(0);
        for _ in 0..yields {
            yield_once().await;
        }

        if let Some(error) = self.fetch_failures.borrow().get(url) {
            return Err(error.clone());
        }
        if self.pages.borrow().contains_key(url) {
            Ok(format!("{MOCK_HTML_PREFIX}{url} -->"))
        } else {
            Err(FetchError::HttpError(404))
        }
    }

    fn parse_page(&self, html: &str) -> FetchedPage {
        let url = html
            .strip_prefix(MOCK_HTML_PREFIX)
            .and_then(|rest| rest.strip_suffix(" -->"))
            .unwrap_or_default();
        self.pages
            .borrow()
            .get(url)
            .map(|page| FetchedPage {
                title: page.title.clone(),
                main_html: page.main.clone(),
                summary: page.summary(),
            })
            .unwrap_or_default()
    }
}

impl Stage for MockHost {
    fn current_url(&self) -> String {
        self.url.borrow().clone()
    }

    fn live_summary(&self) -> DocumentSummary {
        self.live.borrow().clone()
    }

    fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
        self.record(format!("loading {loading}"));
    }

    fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_string();
    }

    fn has_main_region(&self) -> bool {
        self.main_present.get()
    }

    fn set_transition(&self, transition: Transition) {
        self.transitions.borrow_mut().push(transition);
    }

    fn replace_main(&self, html: &str) {
        *self.main_html.borrow_mut() = html.to_string();
        let summary = self
            .pages
            .borrow()
            .values()
            .find(|page| page.main.as_deref() == Some(html))
            .map(MockPage::summary)
            .unwrap_or_default();
        *self.live.borrow_mut() = summary;
        self.record("replace main".to_string());
    }

    async fn sleep(&self, ms: u32) {
        self.sleeps.borrow_mut().push(ms);
        yield_once().await;
    }

    fn write_history(&self, entry: &HistoryEntry, mode: HistoryMode) {
        let verb = match mode {
            HistoryMode::Push => "push",
            HistoryMode::Replace => "replace",
            HistoryMode::Keep => "keep",
        };
        self.record(format!("history {verb} {}", entry.url));
        self.history.borrow_mut().push((entry.clone(), mode));
        *self.url.borrow_mut() = entry.url.clone();
    }

    fn hard_navigate(&self, url: &str) {
        self.record(format!("hard {url}"));
        self.hard_navigations.borrow_mut().push(url.to_string());
        *self.url.borrow_mut() = url.to_string();
    }

    fn attach_module(&self, name: &str) {
        self.record(format!("attach {name}"));
        self.modules.borrow_mut().push(name.to_string());
    }

    fn detach_module(&self, name: &str) {
        self.record(format!("detach {name}"));
        self.modules.borrow_mut().retain(|m| m != name);
    }
}

impl ResourceSink for MockHost {
    fn contains(&self, url: &str) -> bool {
        self.elements.borrow().iter().any(|(u, _)| u == url)
    }

    fn insert(&self, resource: &Resource, src: &str) -> Result<(), ResourceError> {
        self.record(format!("insert {src}"));
        self.elements
            .borrow_mut()
            .push((resource.url.to_string(), src.to_string()));
        self.insertions.borrow_mut().push(src.to_string());
        Ok(())
    }

    async fn settle(&self, url: &str) -> Result<(), ResourceError> {
        yield_once().await;
        if self.failing_resources.borrow().contains(url) {
            Err(ResourceError::LoadFailed {
                url: url.to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn remove(&self, url: &str) {
        let mut elements = self.elements.borrow_mut();
        let before = elements.len();
        elements.retain(|(u, _)| u != url);
        if elements.len() != before {
            drop(elements);
            self.record(format!("remove {url}"));
        }
    }

    fn cache_token(&self) -> String {
        let next = self.token.get() + 1;
        self.token.set(next);
        next.to_string()
    }
}

impl PageRenderer for MockHost {
    fn render_books(&self, plan: &ShelfPlan) {
        self.renders.borrow_mut().push(RenderCall::Books(plan.clone()));
    }

    fn render_book_details(&self, view: &BookDetailsView) {
        self.renders
            .borrow_mut()
            .push(RenderCall::BookDetails(view.clone()));
    }

    fn attach_guestbook(&self) -> bool {
        self.renders.borrow_mut().push(RenderCall::Guestbook);
        self.guestbook.get()
    }

    fn normalize_images(&self) {
        self.renders.borrow_mut().push(RenderCall::NormalizeImages);
    }

    fn release_widgets(&self) {
        self.renders.borrow_mut().push(RenderCall::Release);
    }
}

impl PreferenceStore for MockHost {
    fn load(&self, key: &str) -> Option<String> {
        self.storage.borrow().get(key).cloned()
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.storage_fails.get() {
            return Err(StorageError::WriteFailed);
        }
        self.set_preference(key, value);
        Ok(())
    }
}
