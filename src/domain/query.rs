//! Search field and sort order selectors.

use super::book::Book;
use serde::{Deserialize, Serialize};

/// Which catalog field the query text is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchField {
    #[default]
    Title,
    Author,
    Isbn,
    /// Free-text search over all indexed fields.
    FreeText,
}

impl SearchField {
    /// Query-string parameter name used by the catalog for this field.
    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Isbn => "isbn",
            Self::FreeText => "q",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Author => "Author",
            Self::Isbn => "ISBN",
            Self::FreeText => "Any",
        }
    }

    /// Next field in selector order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::Author,
            Self::Author => Self::Isbn,
            Self::Isbn => Self::FreeText,
            Self::FreeText => Self::Title,
        }
    }

    /// Parses a configuration value (`title`, `author`, `isbn`, `q`).
    #[must_use]
    pub fn from_config(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "author" => Some(Self::Author),
            "isbn" => Some(Self::Isbn),
            "q" | "any" | "free" | "freetext" => Some(Self::FreeText),
            _ => None,
        }
    }
}

/// Ordering applied to each fetched page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    /// Keep the catalog's own ranking.
    #[default]
    Relevance,
    YearAscending,
    YearDescending,
}

impl SortOrder {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Relevance => "Relevance",
            Self::YearAscending => "Year ↑",
            Self::YearDescending => "Year ↓",
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Relevance => Self::YearAscending,
            Self::YearAscending => Self::YearDescending,
            Self::YearDescending => Self::Relevance,
        }
    }

    /// Parses a configuration value (`relevance`, `year_asc`, `year_desc`).
    #[must_use]
    pub fn from_config(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "relevance" => Some(Self::Relevance),
            "year_asc" | "year-asc" | "asc" => Some(Self::YearAscending),
            "year_desc" | "year-desc" | "desc" => Some(Self::YearDescending),
            _ => None,
        }
    }

    /// Stably sorts books by publish year, missing years counting as `0`.
    ///
    /// `Relevance` leaves the slice untouched. Books with equal years keep
    /// their relative order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookfinder::domain::{Book, SortOrder};
    ///
    /// let mut books: Vec<Book> = [Some(1995), None, Some(1980)]
    ///     .into_iter()
    ///     .map(|year| Book { first_publish_year: year, ..Book::default() })
    ///     .collect();
    ///
    /// SortOrder::YearAscending.apply(&mut books);
    /// let years: Vec<_> = books.iter().map(|b| b.first_publish_year).collect();
    /// assert_eq!(years, vec![None, Some(1980), Some(1995)]);
    /// ```
    pub fn apply(self, books: &mut [Book]) {
        match self {
            Self::Relevance => {}
            Self::YearAscending => books.sort_by_key(Book::sort_year),
            Self::YearDescending => books.sort_by_key(|b| std::cmp::Reverse(b.sort_year())),
        }
    }
}
