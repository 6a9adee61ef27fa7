//! Reading list entries and shelf ordering.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format of [`Book::date_read`], e.g. `March 1, 2025`.
const DATE_READ_FORMAT: &str = "%B %d, %Y";

/// A finished book.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub cover_image: String,
    pub date_read: String,
    pub description: String,
    pub pages: u32,
    pub publish_date: String,
    pub genre: String,
}

impl Book {
    /// Parsed [`Book::date_read`]; `None` if it is not a calendar date.
    pub fn finished_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date_read.trim(), DATE_READ_FORMAT).ok()
    }

    /// Link to this book's details page.
    pub fn details_href(&self) -> String {
        format!("book-details.html?id={}", urlencoding::encode(&self.id))
    }
}

/// Shelf ordering selected by the user.
///
/// Labels double as the persisted value and the `<option>` values of the
/// sort select.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BookSort {
    /// Catalog order.
    #[default]
    Default,
    AuthorAz,
    TitleAz,
    /// Most recently finished first.
    DateRead,
}

impl BookSort {
    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::AuthorAz => "Author (A-Z)",
            Self::TitleAz => "Title (A-Z)",
            Self::DateRead => "Date Read",
        }
    }

    /// Parse a stored label. Unknown labels fall back to catalog order.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Author (A-Z)" => Self::AuthorAz,
            "Title (A-Z)" => Self::TitleAz,
            "Date Read" => Self::DateRead,
            _ => Self::Default,
        }
    }

    /// Sort in place. Stable, so ties keep catalog order.
    pub fn apply(self, books: &mut [&Book]) {
        match self {
            Self::Default => {}
            Self::AuthorAz => books.sort_by(|a, b| caseless(&a.author, &b.author)),
            Self::TitleAz => books.sort_by(|a, b| caseless(&a.title, &b.title)),
            Self::DateRead => books.sort_by(|a, b| {
                match (a.finished_on(), b.finished_on()) {
                    (Some(a), Some(b)) => b.cmp(&a),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }),
        }
    }
}

impl fmt::Display for BookSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn caseless(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str, title: &str, author: &str, date_read: &str) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            cover_image: format!("{id}.webp"),
            date_read: date_read.to_string(),
            description: String::new(),
            pages: 100,
            publish_date: "2000".to_string(),
            genre: "Fiction".to_string(),
        }
    }

    fn sorted(books: &[Book], sort: BookSort) -> Vec<&str> {
        let mut refs: Vec<&Book> = books.iter().collect();
        sort.apply(&mut refs);
        refs.into_iter().map(|b| b.id.as_str()).collect()
    }

    fn shelf() -> Vec<Book> {
        vec![
            book("b", "zebra", "Yates", "March 1, 2025"),
            book("a", "Apple", "adams", "November 15, 2024"),
            book("c", "mango", "Moore", "someday"),
        ]
    }

    #[test]
    fn test_label_round_trip() {
        for sort in [
            BookSort::Default,
            BookSort::AuthorAz,
            BookSort::TitleAz,
            BookSort::DateRead,
        ] {
            assert_eq!(BookSort::from_label(sort.label()), sort);
        }
        assert_eq!(BookSort::from_label("Rating"), BookSort::Default);
    }

    #[test]
    fn test_default_keeps_insertion_order() {
        assert_eq!(sorted(&shelf(), BookSort::Default), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_author_sort_ignores_case() {
        assert_eq!(sorted(&shelf(), BookSort::AuthorAz), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_title_sort_ignores_case() {
        assert_eq!(sorted(&shelf(), BookSort::TitleAz), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_date_sort_newest_first_unparsable_last() {
        assert_eq!(sorted(&shelf(), BookSort::DateRead), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_finished_on_parses_unpadded_day() {
        let b = book("x", "X", "Y", "March 1, 2025");
        assert_eq!(b.finished_on(), NaiveDate::from_ymd_opt(2025, 3, 1));
    }

    #[test]
    fn test_details_href_encodes_id() {
        let b = book("the 48 laws", "X", "Y", "March 1, 2025");
        assert_eq!(b.details_href(), "book-details.html?id=the%2048%20laws");
    }
}
