//! Page identity: logical page types and structural document summaries.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Logical classification of a page.
///
/// Drives which resources are loaded and which initializer runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageType {
    #[default]
    Home,
    Books,
    BookDetails,
    Posts,
    OpenQuestions,
    Lists,
    Projects,
    Cv,
}

impl PageType {
    pub const ALL: [PageType; 8] = [
        Self::Home,
        Self::Books,
        Self::BookDetails,
        Self::Posts,
        Self::OpenQuestions,
        Self::Lists,
        Self::Projects,
        Self::Cv,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Books => "books",
            Self::BookDetails => "book-details",
            Self::Posts => "posts",
            Self::OpenQuestions => "open-questions",
            Self::Lists => "lists",
            Self::Projects => "projects",
            Self::Cv => "cv",
        }
    }

    /// File name that identifies this page in a URL, if any.
    pub fn file_name(self) -> Option<&'static str> {
        match self {
            Self::Home => None,
            Self::Books => Some("books.html"),
            Self::BookDetails => Some("book-details.html"),
            Self::Posts => Some("posts.html"),
            Self::OpenQuestions => Some("open-questions.html"),
            Self::Lists => Some("lists.html"),
            Self::Projects => Some("projects.html"),
            Self::Cv => Some("cv.html"),
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| format!("unknown page type: {s}"))
    }
}

/// Structural markers that identify a page when its URL does not.
///
/// Declaration order is classification priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Marker {
    BooksGrid,
    BookDetails,
    PostGrid,
    ArticleContent,
}

impl Marker {
    pub const ALL: [Marker; 4] = [
        Self::BooksGrid,
        Self::BookDetails,
        Self::PostGrid,
        Self::ArticleContent,
    ];

    /// CSS selector probed in the document.
    pub fn selector(self) -> &'static str {
        match self {
            Self::BooksGrid => ".books-grid",
            Self::BookDetails => ".book-details",
            Self::PostGrid => ".post-grid",
            Self::ArticleContent => ".article-content",
        }
    }

    /// Page type implied by the marker.
    pub fn page_type(self) -> PageType {
        match self {
            Self::BooksGrid => PageType::Books,
            Self::BookDetails => PageType::BookDetails,
            Self::PostGrid => PageType::Posts,
            Self::ArticleContent => PageType::OpenQuestions,
        }
    }
}

/// The set of markers present in a document.
///
/// Built once per document by the host so classification never touches the
/// DOM directly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentSummary {
    markers: BTreeSet<Marker>,
}

impl DocumentSummary {
    pub fn new(markers: impl IntoIterator<Item = Marker>) -> Self {
        Self {
            markers: markers.into_iter().collect(),
        }
    }

    /// Build a summary by probing each marker selector.
    pub fn probe(mut has_selector: impl FnMut(&str) -> bool) -> Self {
        Self::new(
            Marker::ALL
                .into_iter()
                .filter(|marker| has_selector(marker.selector())),
        )
    }

    pub fn contains(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }

    /// Markers in priority order.
    pub fn markers(&self) -> impl Iterator<Item = Marker> + '_ {
        self.markers.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// A fetched page after parsing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchedPage {
    /// Contents of `<title>`.
    pub title: String,
    /// Inner markup of the page's `<main>`, if it has one.
    pub main_html: Option<String>,
    pub summary: DocumentSummary,
}
