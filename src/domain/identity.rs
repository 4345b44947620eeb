//! Stable identifier derivation for books.
//!
//! Search results carry several optional identifiers whose presence varies by
//! record. Favorites are keyed by the first one available, in this order:
//!
//! 1. `key` (work key)
//! 2. `cover_edition_key`
//! 3. first entry of `edition_key`
//! 4. first entry of `isbn`
//! 5. `title`
//!
//! Empty strings are treated the same as absent values. Both favorite
//! toggling and favorite lookup go through [`derive_book_id`], so the two can
//! never disagree about what "the same book" means.

use super::book::Book;

/// Derives the favorite identifier for a search result.
///
/// Returns `None` only when every candidate field is absent or empty.
///
/// # Examples
///
/// ```
/// use bookfinder::domain::{derive_book_id, Book};
///
/// let mut book = Book::titled("Dune");
/// assert_eq!(derive_book_id(&book).as_deref(), Some("Dune"));
///
/// book.isbn = Some(vec!["9780441013593".into()]);
/// assert_eq!(derive_book_id(&book).as_deref(), Some("9780441013593"));
///
/// book.key = Some("/works/OL893415W".into());
/// assert_eq!(derive_book_id(&book).as_deref(), Some("/works/OL893415W"));
/// ```
#[must_use]
pub fn derive_book_id(book: &Book) -> Option<String> {
    let first_of = |list: &Option<Vec<String>>| list.as_ref().and_then(|v| v.first()).cloned();

    [
        book.key.clone(),
        book.cover_edition_key.clone(),
        first_of(&book.edition_key),
        first_of(&book.isbn),
        Some(book.title.clone()),
    ]
    .into_iter()
    .flatten()
    .find(|candidate| !candidate.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_book() -> Book {
        Book {
            key: Some("/works/OL1W".into()),
            cover_edition_key: Some("OL2M".into()),
            edition_key: Some(vec!["OL3M".into(), "OL4M".into()]),
            isbn: Some(vec!["111".into(), "222".into()]),
            title: "Title".into(),
            ..Book::default()
        }
    }

    #[test]
    fn follows_priority_order() {
        let mut book = full_book();
        assert_eq!(derive_book_id(&book).as_deref(), Some("/works/OL1W"));

        book.key = None;
        assert_eq!(derive_book_id(&book).as_deref(), Some("OL2M"));

        book.cover_edition_key = None;
        assert_eq!(derive_book_id(&book).as_deref(), Some("OL3M"));

        book.edition_key = None;
        assert_eq!(derive_book_id(&book).as_deref(), Some("111"));

        book.isbn = None;
        assert_eq!(derive_book_id(&book).as_deref(), Some("Title"));
    }

    #[test]
    fn skips_empty_values() {
        let book = Book {
            key: Some(String::new()),
            cover_edition_key: Some(String::new()),
            edition_key: Some(vec![]),
            isbn: Some(vec!["978".into()]),
            title: "Fallback".into(),
            ..Book::default()
        };
        assert_eq!(derive_book_id(&book).as_deref(), Some("978"));
    }

    #[test]
    fn none_when_nothing_is_usable() {
        assert_eq!(derive_book_id(&Book::default()), None);
    }
}
