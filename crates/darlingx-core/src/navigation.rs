//! Navigation controller.
//!
//! Drives in-app page transitions: fetch, classify, load resources, swap the
//! main region with a fade, initialize. Every attempt takes a ticket from a
//! monotonically increasing counter; an attempt whose ticket is no longer the
//! latest stops at the next stage boundary without touching the document,
//! history or loading indicator.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::classifier::classify_from_document;
use crate::config::{FADE_OUT_MS, FADE_SETTLE_MS, MAX_REDIRECTS};
use crate::error::NavigationError;
use crate::host::Host;
use crate::initializer::{InitOutcome, Initializer};
use crate::links::same_document;
use crate::models::{HistoryEntry, HistoryMode, InvalidateScope, LoadOptions, NavState, PageType, Transition};
use crate::resources::ResourceLoader;

/// Controller tunables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigationConfig {
    pub fade_out_ms: u32,
    pub settle_ms: u32,
    /// What to drop from the resource bookkeeping before each navigation.
    pub invalidate: InvalidateScope,
    /// When `false`, resources inserted by a navigation are cache-busted.
    pub cache: bool,
    /// Redirect chains longer than this fall back to a browser navigation.
    pub max_redirects: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            fade_out_ms: FADE_OUT_MS,
            settle_ms: FADE_SETTLE_MS,
            invalidate: InvalidateScope::default(),
            cache: false,
            max_redirects: MAX_REDIRECTS,
        }
    }
}

/// How a navigation request ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The page is swapped in and initialized.
    Completed(PageType),
    /// A newer navigation took over; this one left no trace.
    Superseded,
    /// The browser was sent to the page conventionally.
    FellBack(NavigationError),
    /// Nothing to do (back/forward within the same document).
    Ignored,
}

enum Abort {
    Superseded,
    Failed(NavigationError),
}

impl From<NavigationError> for Abort {
    fn from(e: NavigationError) -> Self {
        Self::Failed(e)
    }
}

enum Step {
    Done(PageType),
    Redirect(String),
}

/// Single-page navigation state machine.
pub struct NavigationController<H> {
    host: Rc<H>,
    loader: ResourceLoader<H>,
    initializer: Initializer<H>,
    config: NavigationConfig,
    seq: Cell<u64>,
    state: Cell<NavState>,
    reduced_motion: Cell<bool>,
    current_url: RefCell<String>,
    /// Target of the latest navigation request, committed or not.
    requested_url: RefCell<String>,
    attached: RefCell<Vec<&'static str>>,
}

impl<H: Host> NavigationController<H> {
    pub fn new(host: Rc<H>, config: NavigationConfig) -> Self {
        let current_url = host.current_url();
        Self {
            loader: ResourceLoader::new(host.clone()),
            initializer: Initializer::new(host.clone()),
            host,
            config,
            seq: Cell::new(0),
            state: Cell::new(NavState::Idle),
            reduced_motion: Cell::new(false),
            requested_url: RefCell::new(current_url.clone()),
            current_url: RefCell::new(current_url),
            attached: RefCell::new(Vec::new()),
        }
    }

    pub fn state(&self) -> NavState {
        self.state.get()
    }

    pub fn current_url(&self) -> String {
        self.current_url.borrow().clone()
    }

    pub fn loader(&self) -> &ResourceLoader<H> {
        &self.loader
    }

    /// Skip fade delays when the user prefers reduced motion.
    pub fn set_reduced_motion(&self, reduced: bool) {
        self.reduced_motion.set(reduced);
    }

    /// Take over the page the browser loaded.
    ///
    /// Static `<link>`/`<script>` tags are adopted rather than re-inserted.
    pub async fn start(&self) -> NavigationOutcome {
        let ticket = self.next_ticket();
        let url = self.host.current_url();
        let page = classify_from_document(&self.host.live_summary(), &url);
        log::info!("boot on {url} as {page}");

        *self.current_url.borrow_mut() = url.clone();
        *self.requested_url.borrow_mut() = url.clone();
        self.host.write_history(&HistoryEntry::new(url.clone()), HistoryMode::Replace);

        let options = LoadOptions {
            cache: true,
            url: Some(url.clone()),
        };
        if let Err(e) = self.loader.load_page_resources(page, &options).await {
            log::warn!("boot resources incomplete: {e}");
        }
        if !self.is_current(ticket) {
            return NavigationOutcome::Superseded;
        }

        match self.initializer.initialize(page, &url) {
            InitOutcome::Ready => {
                self.attach_modules(page);
                NavigationOutcome::Completed(page)
            }
            InitOutcome::Redirect(target) => self.run(target, HistoryMode::Replace).await,
        }
    }

    /// Navigate to `url` after an intercepted link click.
    pub async fn navigate(&self, url: &str) -> NavigationOutcome {
        self.run(url.to_string(), HistoryMode::Push).await
    }

    /// Handle back/forward. The browser has already moved to `url`.
    ///
    /// Compared against the latest request so that going back while a
    /// navigation is in flight still supersedes it.
    pub async fn on_popstate(&self, url: &str) -> NavigationOutcome {
        if same_document(url, &self.requested_url.borrow()) {
            log::debug!("popstate within {url}, nothing to swap");
            return NavigationOutcome::Ignored;
        }
        self.run(url.to_string(), HistoryMode::Keep).await
    }

    async fn run(&self, mut url: String, mut mode: HistoryMode) -> NavigationOutcome {
        for _ in 0..=self.config.max_redirects {
            let ticket = self.next_ticket();
            *self.requested_url.borrow_mut() = url.clone();
            match self.attempt(ticket, &url, mode).await {
                Ok(Step::Done(page)) => return NavigationOutcome::Completed(page),
                Ok(Step::Redirect(target)) => {
                    url = target;
                    mode = HistoryMode::Replace;
                }
                Err(Abort::Superseded) => {
                    log::debug!("navigation to {url} superseded");
                    return NavigationOutcome::Superseded;
                }
                Err(Abort::Failed(e)) => {
                    self.fall_back(&url, &e);
                    return NavigationOutcome::FellBack(e);
                }
            }
        }

        log::warn!("too many redirects, loading {url} directly");
        self.fall_back(&url, &NavigationError::TooManyRedirects);
        NavigationOutcome::FellBack(NavigationError::TooManyRedirects)
    }

    async fn attempt(&self, ticket: u64, url: &str, mode: HistoryMode) -> Result<Step, Abort> {
        if mode != HistoryMode::Keep {
            self.host.write_history(&HistoryEntry::new(url), mode);
        }
        self.host.set_loading(true);
        self.state.set(NavState::Fetching);
        log::info!("navigating to {url}");

        let fetched = self.host.fetch_page(url).await;
        self.checkpoint(ticket)?;
        let html = fetched.map_err(NavigationError::from)?;

        self.state.set(NavState::Classifying);
        let fetched = self.host.parse_page(&html);
        let main_html = fetched.main_html.ok_or(NavigationError::MissingMainRegion)?;
        if !self.host.has_main_region() {
            return Err(NavigationError::MissingMainRegion.into());
        }
        let page = classify_from_document(&fetched.summary, url);
        log::debug!("{url} classified as {page}");

        self.state.set(NavState::ResourceLoading);
        self.loader.invalidate_cache(self.config.invalidate);
        let options = LoadOptions {
            cache: self.config.cache,
            url: Some(url.to_string()),
        };
        let loaded = self.loader.load_page_resources(page, &options).await;
        self.checkpoint(ticket)?;
        loaded.map_err(NavigationError::from)?;

        self.state.set(NavState::Swapping);
        self.host.set_title(&fetched.title);
        self.detach_modules();
        self.initializer.teardown();
        self.host.set_transition(Transition::FadeOut);
        self.pause(self.config.fade_out_ms).await;
        self.checkpoint(ticket)?;

        self.host.replace_main(&main_html);
        *self.current_url.borrow_mut() = url.to_string();
        self.host.set_transition(Transition::FadeIn);
        self.pause(self.config.settle_ms).await;
        self.checkpoint(ticket)?;
        self.host.set_transition(Transition::Steady);

        self.state.set(NavState::Initializing);
        match self.initializer.initialize(page, url) {
            InitOutcome::Ready => {}
            InitOutcome::Redirect(target) => return Ok(Step::Redirect(target)),
        }
        self.attach_modules(page);

        self.host.set_loading(false);
        self.state.set(NavState::Idle);
        Ok(Step::Done(page))
    }

    fn next_ticket(&self) -> u64 {
        let ticket = self.seq.get() + 1;
        self.seq.set(ticket);
        ticket
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.seq.get() == ticket
    }

    fn checkpoint(&self, ticket: u64) -> Result<(), Abort> {
        if self.is_current(ticket) {
            Ok(())
        } else {
            Err(Abort::Superseded)
        }
    }

    async fn pause(&self, ms: u32) {
        if ms > 0 && !self.reduced_motion.get() {
            self.host.sleep(ms).await;
        }
    }

    fn fall_back(&self, url: &str, error: &NavigationError) {
        log::warn!("in-app navigation to {url} failed ({error}), reloading");
        self.host.set_loading(false);
        self.state.set(NavState::Idle);
        self.host.hard_navigate(url);
    }

    fn detach_modules(&self) {
        for name in self.attached.take() {
            self.host.detach_module(name);
        }
    }

    fn attach_modules(&self, page: PageType) {
        let modules = self.loader.modules_for(page);
        for name in &modules {
            self.host.attach_module(name);
        }
        *self.attached.borrow_mut() = modules;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::mock::{MockHost, MockPage};
    use crate::models::Marker;

    const HOME: &str = "https://darlingx.example/index.html";
    const POSTS: &str = "https://darlingx.example/posts.html";
    const CV: &str = "https://darlingx.example/cv.html";

    fn controller() -> (Rc<MockHost>, NavigationController<MockHost>) {
        let host = Rc::new(MockHost::new(HOME));
        host.register(HOME, MockPage::new("Home", "<h1>home</h1>"));
        host.register(POSTS, MockPage::new("Posts", "<div class=\"post-grid\"></div>").marker(Marker::PostGrid));
        host.register(CV, MockPage::new("CV", "<h1>cv</h1>"));
        let nav = NavigationController::new(host.clone(), NavigationConfig::default());
        (host, nav)
    }

    #[tokio::test]
    async fn test_navigate_completes() {
        let (host, nav) = controller();

        assert_eq!(nav.navigate(POSTS).await, NavigationOutcome::Completed(PageType::Posts));

        assert_eq!(host.main_html(), "<div class=\"post-grid\"></div>");
        assert_eq!(host.title(), "Posts");
        assert_eq!(host.history(), vec![(HistoryEntry::new(POSTS), HistoryMode::Push)]);
        assert!(!host.is_loading());
        assert_eq!(nav.state(), NavState::Idle);
        assert_eq!(nav.current_url(), POSTS);
        assert_eq!(
            host.transitions(),
            vec![Transition::FadeOut, Transition::FadeIn, Transition::Steady]
        );
        assert_eq!(host.sleeps(), vec![FADE_OUT_MS, FADE_SETTLE_MS]);
    }

    #[tokio::test]
    async fn test_history_pushed_before_fetch() {
        let (host, nav) = controller();
        nav.navigate(CV).await;
        let events = host.events();
        let push = events.iter().position(|e| e == &format!("history push {CV}")).unwrap();
        let fetch = events.iter().position(|e| e == &format!("fetch {CV}")).unwrap();
        assert!(push < fetch, "{events:?}");
    }

    #[tokio::test]
    async fn test_fetch_error_falls_back() {
        let (host, nav) = controller();
        host.fail_fetch(CV, FetchError::HttpError(500));

        assert_eq!(
            nav.navigate(CV).await,
            NavigationOutcome::FellBack(NavigationError::Fetch(FetchError::HttpError(500)))
        );
        assert_eq!(host.hard_navigations(), vec![CV.to_string()]);
        assert!(!host.is_loading());
        assert_eq!(host.main_html(), "");
    }

    #[tokio::test]
    async fn test_missing_main_in_fetched_page_falls_back() {
        let (host, nav) = controller();
        host.register(CV, MockPage::without_main("CV"));

        assert_eq!(
            nav.navigate(CV).await,
            NavigationOutcome::FellBack(NavigationError::MissingMainRegion)
        );
        assert_eq!(host.hard_navigations(), vec![CV.to_string()]);
    }

    #[tokio::test]
    async fn test_missing_live_main_falls_back() {
        let (host, nav) = controller();
        host.remove_main_region();
        assert!(matches!(nav.navigate(CV).await, NavigationOutcome::FellBack(_)));
        assert_eq!(host.hard_navigations(), vec![CV.to_string()]);
    }

    #[tokio::test]
    async fn test_resource_failure_falls_back() {
        let (host, nav) = controller();
        host.fail_resource("css/posts.css");
        assert!(matches!(
            nav.navigate(POSTS).await,
            NavigationOutcome::FellBack(NavigationError::Resource(_))
        ));
        assert_eq!(host.hard_navigations(), vec![POSTS.to_string()]);
        assert!(host.transitions().is_empty());
    }

    #[tokio::test]
    async fn test_popstate_same_document_ignored() {
        let (host, nav) = controller();
        let outcome = nav.on_popstate("https://darlingx.example/index.html#about").await;
        assert_eq!(outcome, NavigationOutcome::Ignored);
        assert!(host.events().is_empty());
    }

    #[tokio::test]
    async fn test_popstate_keeps_history() {
        let (host, nav) = controller();
        host.set_url(CV);
        assert_eq!(nav.on_popstate(CV).await, NavigationOutcome::Completed(PageType::Cv));
        assert!(host.history().is_empty());
    }

    #[tokio::test]
    async fn test_redirect_limit_falls_back() {
        let host = Rc::new(MockHost::new(HOME));
        let dune = "https://darlingx.example/book-details.html?id=dune";
        host.register(dune, MockPage::new("Book", "<div></div>").marker(Marker::BookDetails));
        let config = NavigationConfig {
            max_redirects: 0,
            ..NavigationConfig::default()
        };
        let nav = NavigationController::new(host.clone(), config);

        assert_eq!(
            nav.navigate(dune).await,
            NavigationOutcome::FellBack(NavigationError::TooManyRedirects)
        );
        assert_eq!(
            host.hard_navigations(),
            vec!["https://darlingx.example/books.html".to_string()]
        );
        assert!(!host.is_loading());
    }

    #[tokio::test]
    async fn test_reduced_motion_skips_delays() {
        let (host, nav) = controller();
        nav.set_reduced_motion(true);
        nav.navigate(CV).await;
        assert!(host.sleeps().is_empty());
        assert_eq!(host.transitions().last(), Some(&Transition::Steady));
    }

    #[tokio::test]
    async fn test_start_adopts_static_resources() {
        let (host, nav) = controller();
        host.add_static_element("css/style.css");
        host.add_static_element("js/cursor.js");

        assert_eq!(nav.start().await, NavigationOutcome::Completed(PageType::Home));

        assert_eq!(host.history(), vec![(HistoryEntry::new(HOME), HistoryMode::Replace)]);
        assert_eq!(host.element_count("css/style.css"), 1);
        assert!(!host.insertions().iter().any(|src| src.contains('?')));
        assert_eq!(
            host.attached_modules(),
            vec!["MatrixText", "Cursor", "Constellation"]
        );
    }

    #[tokio::test]
    async fn test_modules_detached_before_swap() {
        let (host, nav) = controller();
        nav.start().await;
        nav.navigate(CV).await;

        let events = host.events();
        let detach = events.iter().position(|e| e == "detach Cursor").unwrap();
        let swap = events.iter().position(|e| e == "replace main").unwrap();
        let attach = events.iter().rposition(|e| e == "attach Cursor").unwrap();
        assert!(detach < swap && swap < attach, "{events:?}");
    }

    #[tokio::test]
    async fn test_common_bundle_survives_navigation() {
        let (host, nav) = controller();
        nav.navigate(POSTS).await;
        nav.navigate(CV).await;

        assert_eq!(host.element_count("css/style.css"), 1);
        assert_eq!(host.element_count("css/posts.css"), 0);
        assert_eq!(
            host.insertions().iter().filter(|s| s.starts_with("css/style.css")).count(),
            1
        );
    }

    #[tokio::test]
    async fn test_page_specific_resources_reload_each_visit() {
        let (host, nav) = controller();
        nav.navigate(POSTS).await;
        nav.navigate(CV).await;
        nav.navigate(POSTS).await;

        assert_eq!(host.element_count("css/posts.css"), 1);
        assert_eq!(
            host.insertions().iter().filter(|s| s.starts_with("css/posts.css")).count(),
            2
        );
    }
}
