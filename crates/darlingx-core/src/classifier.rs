//! Page classification.
//!
//! Maps a URL, and optionally a [`DocumentSummary`], to a [`PageType`].
//! The URL check is cheap and exact; the summary recovers pages reached
//! through paths that do not end in a known file name.

use crate::models::{DocumentSummary, PageType};

/// Trailing file name of a URL: query and fragment removed, last path segment.
fn file_name(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    path.rsplit('/').next().unwrap_or_default()
}

/// Classify by the URL's trailing file name. Unknown names are `Home`.
pub fn classify_from_url(url: &str) -> PageType {
    let name = file_name(url);
    PageType::ALL
        .into_iter()
        .find(|page| page.file_name().is_some_and(|f| f.eq_ignore_ascii_case(name)))
        .unwrap_or(PageType::Home)
}

/// Classify by URL first, then by structural markers.
///
/// When several markers are present the first in [`crate::models::Marker`]
/// priority order wins: books grid, book details, post grid, article content.
pub fn classify_from_document(summary: &DocumentSummary, url: &str) -> PageType {
    match classify_from_url(url) {
        PageType::Home => summary
            .markers()
            .next()
            .map(|marker| marker.page_type())
            .unwrap_or(PageType::Home),
        page => page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Marker;

    #[test]
    fn test_url_table() {
        let cases = [
            ("books.html", PageType::Books),
            ("book-details.html", PageType::BookDetails),
            ("posts.html", PageType::Posts),
            ("open-questions.html", PageType::OpenQuestions),
            ("lists.html", PageType::Lists),
            ("projects.html", PageType::Projects),
            ("cv.html", PageType::Cv),
        ];
        for (name, expected) in cases {
            assert_eq!(classify_from_url(name), expected, "{name}");
            assert_eq!(
                classify_from_url(&format!("https://darlingx.example/{name}")),
                expected
            );
        }
    }

    #[test]
    fn test_url_ignores_query_and_fragment() {
        assert_eq!(
            classify_from_url("/book-details.html?id=dune#top"),
            PageType::BookDetails
        );
        assert_eq!(classify_from_url("/posts.html#latest"), PageType::Posts);
    }

    #[test]
    fn test_url_case_insensitive() {
        assert_eq!(classify_from_url("/CV.HTML"), PageType::Cv);
    }

    #[test]
    fn test_unmatched_urls_are_home() {
        for url in [
            "",
            "/",
            "/index.html",
            "https://darlingx.example/",
            "/notbooks.html",
            "/books.html/extra",
            "/books",
        ] {
            assert_eq!(classify_from_url(url), PageType::Home, "{url}");
        }
    }

    #[test]
    fn test_query_mentioning_page_is_not_a_match() {
        assert_eq!(classify_from_url("/index.html?from=books.html"), PageType::Home);
    }

    #[test]
    fn test_document_defers_to_url() {
        let summary = DocumentSummary::new([Marker::BooksGrid]);
        assert_eq!(
            classify_from_document(&summary, "/cv.html"),
            PageType::Cv
        );
    }

    #[test]
    fn test_document_markers() {
        let cases = [
            (Marker::BooksGrid, PageType::Books),
            (Marker::BookDetails, PageType::BookDetails),
            (Marker::PostGrid, PageType::Posts),
            (Marker::ArticleContent, PageType::OpenQuestions),
        ];
        for (marker, expected) in cases {
            let summary = DocumentSummary::new([marker]);
            assert_eq!(classify_from_document(&summary, "/library/"), expected);
        }
    }

    #[test]
    fn test_document_marker_precedence() {
        let summary = DocumentSummary::new([
            Marker::ArticleContent,
            Marker::PostGrid,
            Marker::BookDetails,
        ]);
        assert_eq!(
            classify_from_document(&summary, "/"),
            PageType::BookDetails
        );

        let summary = DocumentSummary::new([Marker::ArticleContent, Marker::PostGrid]);
        assert_eq!(classify_from_document(&summary, "/"), PageType::Posts);
    }

    #[test]
    fn test_document_without_markers_is_home() {
        assert_eq!(
            classify_from_document(&DocumentSummary::default(), "/about/"),
            PageType::Home
        );
    }
}
