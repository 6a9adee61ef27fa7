//! Static book catalog.
//!
//! The reading list is a TOML asset embedded at compile time. It backs both
//! the books grid and the book-details page.

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::Deserialize;

use crate::error::CatalogError;
use crate::models::{Book, BookSort};

/// Reading list asset.
const BOOKS_TOML: &str = include_str!("../assets/books.toml");

static EMBEDDED: LazyLock<BookCatalog> = LazyLock::new(|| {
    BookCatalog::from_toml(BOOKS_TOML).unwrap_or_else(|e| {
        log::error!("book catalog unavailable: {e}");
        BookCatalog::default()
    })
});

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "book")]
    books: Vec<Book>,
}

/// An ordered, id-unique list of books.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookCatalog {
    books: Vec<Book>,
}

impl BookCatalog {
    /// The catalog compiled into the binary.
    pub fn embedded() -> &'static BookCatalog {
        &EMBEDDED
    }

    pub fn from_toml(source: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(source)?;
        let mut seen = HashSet::new();
        for book in &file.books {
            if !seen.insert(book.id.as_str()) {
                return Err(CatalogError::DuplicateId(book.id.clone()));
            }
        }
        Ok(Self { books: file.books })
    }

    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Books in catalog order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Books in the given shelf order.
    pub fn sorted(&self, sort: BookSort) -> Vec<&Book> {
        let mut books: Vec<&Book> = self.books.iter().collect();
        sort.apply(&mut books);
        books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_parses() {
        let catalog = BookCatalog::from_toml(BOOKS_TOML).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(BookCatalog::embedded(), &catalog);
    }

    #[test]
    fn test_embedded_dates_are_sortable() {
        for book in BookCatalog::embedded().books() {
            assert!(book.finished_on().is_some(), "{} has no parsable date", book.id);
        }
    }

    #[test]
    fn test_lookup() {
        let catalog = BookCatalog::embedded();
        let book = catalog.get("the-48-laws-of-power").unwrap();
        assert_eq!(book.author, "Robert Greene");
        assert!(catalog.get("dune").is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let source = r#"
            [[book]]
            id = "x"
            title = "X"
            author = "A"
            cover_image = "x.webp"
            date_read = "March 1, 2025"
            description = ""
            pages = 1
            publish_date = "2000"
            genre = "g"

            [[book]]
            id = "x"
            title = "X again"
            author = "A"
            cover_image = "x.webp"
            date_read = "March 1, 2025"
            description = ""
            pages = 1
            publish_date = "2000"
            genre = "g"
        "#;
        assert!(matches!(
            BookCatalog::from_toml(source),
            Err(CatalogError::DuplicateId(id)) if id == "x"
        ));
    }

    #[test]
    fn test_sorted_by_date() {
        let ids: Vec<_> = BookCatalog::embedded()
            .sorted(BookSort::DateRead)
            .into_iter()
            .map(|b| b.id.as_str())
            .collect();
        assert_eq!(ids, vec!["the-48-laws-of-power", "transurfing-of-reality"]);
    }

    #[test]
    fn test_empty_source() {
        assert!(BookCatalog::from_toml("").unwrap().is_empty());
    }
}
