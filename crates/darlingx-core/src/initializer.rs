//! Page-specific setup after new content is in the document.
//!
//! The initializer decides *what* a page needs (a shelf plan, a details view,
//! a redirect, the oracle script) and hands DOM work to a [`PageRenderer`].

use std::cell::Cell;
use std::rc::Rc;

use crate::catalog::BookCatalog;
use crate::config::{BOOK_ID_PARAM, BOOKS_PAGE, ORACLE_SCRIPT, storage_keys};
use crate::host::{PageRenderer, PreferenceStore, ResourceSink};
use crate::links::{query_param, resolve, with_cache_buster};
use crate::models::{Book, BookSort, PageType, Resource};

/// What the books page renders: catalog order plus persisted preferences.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShelfPlan {
    pub books: Vec<Book>,
    pub sort: BookSort,
    pub show_covers: bool,
}

impl ShelfPlan {
    /// Books in the planned order.
    pub fn ordered(&self) -> Vec<&Book> {
        let mut books: Vec<&Book> = self.books.iter().collect();
        self.sort.apply(&mut books);
        books
    }
}

/// Text for the fixed slots of the book-details page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookDetailsView {
    pub cover_src: String,
    pub cover_alt: String,
    pub title: String,
    pub author_line: String,
    pub date_read_line: String,
    pub description: String,
    pub pages: String,
    pub publish_date: String,
    pub genre: String,
}

impl From<&Book> for BookDetailsView {
    fn from(book: &Book) -> Self {
        Self {
            cover_src: book.cover_image.clone(),
            cover_alt: format!("{} cover", book.title),
            title: book.title.clone(),
            author_line: format!("By {}", book.author),
            date_read_line: format!("Finished reading: {}", book.date_read),
            description: book.description.clone(),
            pages: book.pages.to_string(),
            publish_date: book.publish_date.clone(),
            genre: book.genre.clone(),
        }
    }
}

/// Result of initializing a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitOutcome {
    Ready,
    /// The page cannot be shown; navigate to this absolute URL instead.
    Redirect(String),
}

/// Typed access to the shelf preferences.
///
/// Write failures are logged and otherwise ignored.
pub struct Preferences<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: PreferenceStore + ?Sized> Preferences<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn sort(&self) -> BookSort {
        self.store
            .load(storage_keys::BOOK_SORT)
            .map(|label| BookSort::from_label(&label))
            .unwrap_or_default()
    }

    pub fn set_sort(&self, sort: BookSort) {
        if let Err(e) = self.store.store(storage_keys::BOOK_SORT, sort.label()) {
            log::warn!("failed to persist sort preference: {e}");
        }
    }

    /// Covers are visible unless explicitly stored as `"false"`.
    pub fn show_covers(&self) -> bool {
        self.store
            .load(storage_keys::SHOW_COVERS)
            .is_none_or(|value| value != "false")
    }

    pub fn set_show_covers(&self, show: bool) {
        let value = if show { "true" } else { "false" };
        if let Err(e) = self.store.store(storage_keys::SHOW_COVERS, value) {
            log::warn!("failed to persist cover preference: {e}");
        }
    }
}

/// Runs page-type specific setup.
pub struct Initializer<H> {
    host: Rc<H>,
    catalog: &'static BookCatalog,
    oracle_loaded: Cell<bool>,
}

impl<H> Initializer<H>
where
    H: PageRenderer + PreferenceStore + ResourceSink,
{
    pub fn new(host: Rc<H>) -> Self {
        Self::with_catalog(host, BookCatalog::embedded())
    }

    pub fn with_catalog(host: Rc<H>, catalog: &'static BookCatalog) -> Self {
        Self {
            host,
            catalog,
            oracle_loaded: Cell::new(false),
        }
    }

    /// Set up `page`, reached at the absolute `url`.
    pub fn initialize(&self, page: PageType, url: &str) -> InitOutcome {
        log::debug!("initializing {page}");
        match page {
            PageType::Books => self.host.render_books(&self.shelf_plan()),
            PageType::BookDetails => match self.details_view(url) {
                Some(view) => self.host.render_book_details(&view),
                None => {
                    let target = resolve(url, BOOKS_PAGE);
                    log::info!("no book for {url}, redirecting to {target}");
                    return InitOutcome::Redirect(target);
                }
            },
            PageType::OpenQuestions => self.ensure_oracle(),
            PageType::Home | PageType::Posts | PageType::Lists | PageType::Projects | PageType::Cv => {}
        }

        self.host.attach_guestbook();
        self.host.normalize_images();
        InitOutcome::Ready
    }

    /// Release everything bound to the content about to be replaced.
    pub fn teardown(&self) {
        self.host.release_widgets();
    }

    pub fn shelf_plan(&self) -> ShelfPlan {
        let prefs = Preferences::new(&*self.host);
        ShelfPlan {
            books: self.catalog.books().to_vec(),
            sort: prefs.sort(),
            show_covers: prefs.show_covers(),
        }
    }

    fn details_view(&self, url: &str) -> Option<BookDetailsView> {
        let id = query_param(url, BOOK_ID_PARAM)?;
        self.catalog.get(id.trim()).map(BookDetailsView::from)
    }

    fn ensure_oracle(&self) {
        if self.oracle_loaded.replace(true) {
            return;
        }
        if self.host.contains(ORACLE_SCRIPT) {
            return;
        }
        let src = with_cache_buster(ORACLE_SCRIPT, &self.host.cache_token());
        if let Err(e) = self.host.insert(&Resource::script(ORACLE_SCRIPT), &src) {
            log::warn!("{e}");
            self.oracle_loaded.set(false);
        }
    }

    pub fn oracle_loaded(&self) -> bool {
        self.oracle_loaded.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockHost, RenderCall};

    const BASE: &str = "https://darlingx.example/";

    fn setup() -> (Rc<MockHost>, Initializer<MockHost>) {
        let host = Rc::new(MockHost::new(BASE));
        (host.clone(), Initializer::new(host))
    }

    #[test]
    fn test_books_defaults() {
        let (host, init) = setup();
        assert_eq!(init.initialize(PageType::Books, "https://darlingx.example/books.html"), InitOutcome::Ready);

        let calls = host.render_calls();
        let RenderCall::Books(plan) = &calls[0] else {
            panic!("expected shelf render, got {calls:?}");
        };
        assert_eq!(plan.sort, BookSort::Default);
        assert!(plan.show_covers);
        assert_eq!(plan.books.len(), BookCatalog::embedded().len());
        assert_eq!(
            &calls[1..],
            &[RenderCall::Guestbook, RenderCall::NormalizeImages]
        );
    }

    #[test]
    fn test_books_restores_preferences() {
        let (host, init) = setup();
        host.set_preference(storage_keys::BOOK_SORT, "Author (A-Z)");
        host.set_preference(storage_keys::SHOW_COVERS, "false");

        let plan = init.shelf_plan();
        assert_eq!(plan.sort, BookSort::AuthorAz);
        assert!(!plan.show_covers);
        let authors: Vec<_> = plan.ordered().iter().map(|b| b.author.as_str()).collect();
        assert_eq!(authors, vec!["Robert Greene", "Vadim Zeland"]);
    }

    #[test]
    fn test_preferences_round_trip() {
        let (host, _init) = setup();
        let prefs = Preferences::new(&*host);
        prefs.set_sort(BookSort::DateRead);
        prefs.set_show_covers(false);
        assert_eq!(prefs.sort(), BookSort::DateRead);
        assert!(!prefs.show_covers());
        assert_eq!(host.preference(storage_keys::BOOK_SORT).as_deref(), Some("Date Read"));
    }

    #[test]
    fn test_preference_write_failure_is_ignored() {
        let (host, _init) = setup();
        host.fail_storage();
        let prefs = Preferences::new(&*host);
        prefs.set_sort(BookSort::TitleAz);
        assert_eq!(prefs.sort(), BookSort::Default);
    }

    #[test]
    fn test_book_details_known_id() {
        let (host, init) = setup();
        let outcome = init.initialize(
            PageType::BookDetails,
            "https://darlingx.example/book-details.html?id=transurfing-of-reality",
        );
        assert_eq!(outcome, InitOutcome::Ready);

        let calls = host.render_calls();
        let RenderCall::BookDetails(view) = &calls[0] else {
            panic!("expected details render, got {calls:?}");
        };
        assert_eq!(view.author_line, "By Vadim Zeland");
        assert_eq!(view.date_read_line, "Finished reading: November 1, 2024");
        assert_eq!(view.pages, "1500");
    }

    #[test]
    fn test_book_details_unknown_or_missing_id_redirects() {
        let (host, init) = setup();
        for url in [
            "https://darlingx.example/book-details.html?id=dune",
            "https://darlingx.example/book-details.html",
            "https://darlingx.example/book-details.html?id=",
        ] {
            assert_eq!(
                init.initialize(PageType::BookDetails, url),
                InitOutcome::Redirect("https://darlingx.example/books.html".to_string()),
                "{url}"
            );
        }
        assert!(host.render_calls().is_empty());
    }

    #[test]
    fn test_oracle_inserted_once() {
        let (host, init) = setup();
        let url = "https://darlingx.example/open-questions.html";

        init.initialize(PageType::OpenQuestions, url);
        init.initialize(PageType::OpenQuestions, url);

        assert!(init.oracle_loaded());
        assert_eq!(host.element_count(ORACLE_SCRIPT), 1);
        let inserted = host.insertions();
        assert_eq!(inserted.len(), 1);
        assert!(inserted[0].starts_with("js/cyber-oracle.js?v="));
    }

    #[test]
    fn test_oracle_not_duplicated_when_present() {
        let (host, init) = setup();
        host.add_static_element(ORACLE_SCRIPT);
        init.initialize(PageType::OpenQuestions, "https://darlingx.example/open-questions.html");
        assert_eq!(host.element_count(ORACLE_SCRIPT), 1);
        assert!(host.insertions().is_empty());
    }

    #[test]
    fn test_plain_pages_only_get_generic_passes() {
        for page in [PageType::Home, PageType::Posts, PageType::Lists, PageType::Projects, PageType::Cv] {
            let (host, init) = setup();
            assert_eq!(init.initialize(page, BASE), InitOutcome::Ready);
            assert_eq!(
                host.render_calls(),
                vec![RenderCall::Guestbook, RenderCall::NormalizeImages],
                "{page}"
            );
        }
    }

    #[test]
    fn test_teardown_releases_widgets() {
        let (host, init) = setup();
        init.teardown();
        assert_eq!(host.render_calls(), vec![RenderCall::Release]);
    }
}
