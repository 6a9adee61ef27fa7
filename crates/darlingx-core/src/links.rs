//! Link interception rules and URL helpers.
//!
//! Decides which clicks on anchors become in-app navigations. Anything the
//! controller should not handle is left to the browser untouched.

use url::Url;

use crate::config::CACHE_BUST_PARAM;

/// Extensions that are downloads or media rather than site pages.
const NON_DOCUMENT_EXTENSIONS: &[&str] = &[
    "pdf", "png", "jpg", "jpeg", "gif", "webp", "svg", "zip", "mp3", "mp4",
];

/// Base used to resolve relative URLs when no page URL is available.
const FALLBACK_BASE: &str = "http://localhost/";

/// The parts of a click on an anchor that matter for interception.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkClick<'a> {
    /// Resolved or raw `href`.
    pub href: &'a str,
    /// The anchor's `target` attribute (empty when absent).
    pub target: &'a str,
    /// Whether the anchor carries a `download` attribute.
    pub download: bool,
    /// Ctrl, Meta, Shift or Alt held.
    pub modified: bool,
    /// `MouseEvent.button`; 0 is the primary button.
    pub button: i16,
}

/// Outcome of [`decide`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkDecision {
    /// Navigate in-app to this absolute URL.
    Intercept(String),
    /// Let the browser handle the click.
    Ignore(IgnoreReason),
}

/// Why a click is left to the browser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    Empty,
    Unparsable,
    /// Different origin or a non-http scheme (`mailto:`, `javascript:`).
    External,
    /// Fragment link into the current document.
    InPageHash,
    /// `target` names another browsing context.
    NewContext,
    Download,
    /// Modifier key or non-primary button.
    Modified,
    /// Points at a file the browser should open or download itself.
    NonDocument,
}

/// Decide whether a click becomes an in-app navigation.
///
/// `current` is the absolute URL of the page the click happened on.
pub fn decide(click: &LinkClick<'_>, current: &str) -> LinkDecision {
    use IgnoreReason::*;

    let href = click.href.trim();
    if href.is_empty() {
        return LinkDecision::Ignore(Empty);
    }
    if click.modified || click.button != 0 {
        return LinkDecision::Ignore(Modified);
    }
    let target = click.target.trim();
    if !target.is_empty() && !target.eq_ignore_ascii_case("_self") {
        return LinkDecision::Ignore(NewContext);
    }
    if click.download {
        return LinkDecision::Ignore(Download);
    }

    let Ok(base) = Url::parse(current) else {
        return LinkDecision::Ignore(Unparsable);
    };
    let Ok(url) = base.join(href) else {
        return LinkDecision::Ignore(Unparsable);
    };

    if !matches!(url.scheme(), "http" | "https") || url.origin() != base.origin() {
        return LinkDecision::Ignore(External);
    }
    if url.fragment().is_some() && same_document_url(&url, &base) {
        return LinkDecision::Ignore(InPageHash);
    }
    if is_non_document(&url) {
        return LinkDecision::Ignore(NonDocument);
    }

    LinkDecision::Intercept(url.to_string())
}

fn same_document_url(a: &Url, b: &Url) -> bool {
    let mut a = a.clone();
    let mut b = b.clone();
    a.set_fragment(None);
    b.set_fragment(None);
    a == b
}

fn is_non_document(url: &Url) -> bool {
    let name = url.path().rsplit('/').next().unwrap_or_default();
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        NON_DOCUMENT_EXTENSIONS
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(ext))
    })
}

/// Whether two absolute URLs address the same document, ignoring fragments.
///
/// Unparsable input is never the same document.
pub fn same_document(a: &str, b: &str) -> bool {
    match (Url::parse(a), Url::parse(b)) {
        (Ok(a), Ok(b)) => same_document_url(&a, &b),
        _ => false,
    }
}

/// Resolve `relative` against the page URL `base`.
///
/// Falls back to `relative` unchanged when `base` is not absolute.
pub fn resolve(base: &str, relative: &str) -> String {
    Url::parse(base)
        .and_then(|base| base.join(relative))
        .map(|url| url.to_string())
        .unwrap_or_else(|_| relative.to_string())
}

/// First value of a query parameter. Works for relative URLs.
pub fn query_param(url: &str, name: &str) -> Option<String> {
    let parsed = Url::parse(url)
        .or_else(|_| Url::parse(FALLBACK_BASE).and_then(|base| base.join(url)))
        .ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Append a cache-busting parameter to a resource URL.
pub fn with_cache_buster(url: &str, token: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{CACHE_BUST_PARAM}={token}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERE: &str = "https://darlingx.example/index.html";

    fn click(href: &str) -> LinkClick<'_> {
        LinkClick {
            href,
            ..LinkClick::default()
        }
    }

    #[test]
    fn test_intercepts_same_origin_pages() {
        assert_eq!(
            decide(&click("books.html"), HERE),
            LinkDecision::Intercept("https://darlingx.example/books.html".to_string())
        );
        assert_eq!(
            decide(&click("/book-details.html?id=dune"), HERE),
            LinkDecision::Intercept(
                "https://darlingx.example/book-details.html?id=dune".to_string()
            )
        );
    }

    #[test]
    fn test_intercepts_fragment_on_other_page() {
        assert_eq!(
            decide(&click("/posts.html#latest"), HERE),
            LinkDecision::Intercept("https://darlingx.example/posts.html#latest".to_string())
        );
    }

    #[test]
    fn test_ignores_external() {
        for href in [
            "https://other-domain.example/",
            "http://darlingx.example/books.html",
            "mailto:hi@darlingx.example",
            "javascript:void(0)",
        ] {
            assert_eq!(
                decide(&click(href), HERE),
                LinkDecision::Ignore(IgnoreReason::External),
                "{href}"
            );
        }
    }

    #[test]
    fn test_ignores_in_page_hash() {
        assert_eq!(
            decide(&click("#contacts"), HERE),
            LinkDecision::Ignore(IgnoreReason::InPageHash)
        );
        assert_eq!(
            decide(&click("/index.html#top"), HERE),
            LinkDecision::Ignore(IgnoreReason::InPageHash)
        );
    }

    #[test]
    fn test_ignores_new_context_and_download() {
        let new_tab = LinkClick {
            href: "books.html",
            target: "_blank",
            ..LinkClick::default()
        };
        assert_eq!(
            decide(&new_tab, HERE),
            LinkDecision::Ignore(IgnoreReason::NewContext)
        );

        let same_tab = LinkClick {
            href: "books.html",
            target: "_self",
            ..LinkClick::default()
        };
        assert!(matches!(decide(&same_tab, HERE), LinkDecision::Intercept(_)));

        let download = LinkClick {
            href: "cv.html",
            download: true,
            ..LinkClick::default()
        };
        assert_eq!(
            decide(&download, HERE),
            LinkDecision::Ignore(IgnoreReason::Download)
        );
    }

    #[test]
    fn test_ignores_modified_clicks() {
        let ctrl = LinkClick {
            href: "books.html",
            modified: true,
            ..LinkClick::default()
        };
        assert_eq!(decide(&ctrl, HERE), LinkDecision::Ignore(IgnoreReason::Modified));

        let middle = LinkClick {
            href: "books.html",
            button: 1,
            ..LinkClick::default()
        };
        assert_eq!(decide(&middle, HERE), LinkDecision::Ignore(IgnoreReason::Modified));
    }

    #[test]
    fn test_ignores_files() {
        assert_eq!(
            decide(&click("/files/cv.PDF"), HERE),
            LinkDecision::Ignore(IgnoreReason::NonDocument)
        );
    }

    #[test]
    fn test_ignores_empty_and_unparsable() {
        assert_eq!(decide(&click("  "), HERE), LinkDecision::Ignore(IgnoreReason::Empty));
        assert_eq!(
            decide(&click("books.html"), "not a url"),
            LinkDecision::Ignore(IgnoreReason::Unparsable)
        );
    }

    #[test]
    fn test_same_document() {
        assert!(same_document(
            "https://darlingx.example/posts.html#a",
            "https://darlingx.example/posts.html"
        ));
        assert!(!same_document(
            "https://darlingx.example/posts.html?page=2",
            "https://darlingx.example/posts.html"
        ));
        assert!(!same_document("posts.html", "posts.html"));
    }

    #[test]
    fn test_resolve() {
        assert_eq!(
            resolve("https://darlingx.example/book-details.html?id=dune", "books.html"),
            "https://darlingx.example/books.html"
        );
        assert_eq!(resolve("book-details.html", "books.html"), "books.html");
    }

    #[test]
    fn test_query_param() {
        assert_eq!(
            query_param("https://darlingx.example/book-details.html?id=dune", "id"),
            Some("dune".to_string())
        );
        assert_eq!(
            query_param("book-details.html?id=the-48-laws-of-power&x=1", "id"),
            Some("the-48-laws-of-power".to_string())
        );
        assert_eq!(query_param("book-details.html", "id"), None);
    }

    #[test]
    fn test_cache_buster() {
        assert_eq!(with_cache_buster("js/books.js", "42"), "js/books.js?v=42");
        assert_eq!(with_cache_buster("js/app.js?lang=en", "42"), "js/app.js?lang=en&v=42");
    }
}
