//! Book search result model.
//!
//! A [`Book`] is one entry of the catalog's `docs` array. Results are transient:
//! they are decoded fresh from every response and never persisted. Only the
//! fields the plugin displays or derives identity from are kept; everything
//! else in the payload is ignored by serde.

use serde::{Deserialize, Deserializer, Serialize};

/// Base URL for Open Library cover images.
const COVERS_BASE_URL: &str = "https://covers.openlibrary.org/b/id";

/// A single search result returned by the catalog.
///
/// The catalog marks `title` as always present; a record that omits it or
/// sends `null` still decodes (with an empty title) so a single odd document
/// cannot fail a whole page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Work key, e.g. `/works/OL45804W`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Key of the edition whose cover represents the work.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_edition_key: Option<String>,

    /// Keys of all known editions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition_key: Option<Vec<String>>,

    /// ISBNs across editions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<Vec<String>>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_publish_year: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Vec<String>>,

    /// Cover image id, used to build [`Book::cover_url`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_i: Option<i64>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Book {
    /// Creates a book with only a title set.
    ///
    /// Mostly useful in tests and for building fixtures.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Publish year used for sorting; a missing year sorts as `0`.
    #[must_use]
    pub fn sort_year(&self) -> i32 {
        self.first_publish_year.unwrap_or(0)
    }

    /// Authors joined with `", "`, or an empty string when unknown.
    #[must_use]
    pub fn authors_display(&self) -> String {
        join_authors(self.author_name.as_deref())
    }

    /// Medium-size cover image URL, if the record carries a cover id.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookfinder::domain::Book;
    ///
    /// let mut book = Book::titled("Dune");
    /// assert_eq!(book.cover_url(), None);
    ///
    /// book.cover_i = Some(11481354);
    /// assert_eq!(
    ///     book.cover_url().as_deref(),
    ///     Some("https://covers.openlibrary.org/b/id/11481354-M.jpg")
    /// );
    /// ```
    #[must_use]
    pub fn cover_url(&self) -> Option<String> {
        self.cover_i.map(cover_url_for)
    }
}

/// Builds the medium-size cover URL for a cover id.
#[must_use]
pub fn cover_url_for(cover_i: i64) -> String {
    format!("{COVERS_BASE_URL}/{cover_i}-M.jpg")
}

/// Joins an optional author list for display.
pub(crate) fn join_authors(authors: Option<&[String]>) -> String {
    authors.map(|names| names.join(", ")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_catalog_doc_and_ignores_unknown_fields() {
        let json = r#"{
            "key": "/works/OL27448W",
            "title": "The Lord of the Rings",
            "author_name": ["J.R.R. Tolkien"],
            "first_publish_year": 1954,
            "edition_count": 120,
            "ratings_average": 4.5,
            "cover_i": 9255566
        }"#;

        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.key.as_deref(), Some("/works/OL27448W"));
        assert_eq!(book.title, "The Lord of the Rings");
        assert_eq!(book.first_publish_year, Some(1954));
        assert_eq!(book.edition_count, Some(120));
        assert_eq!(book.authors_display(), "J.R.R. Tolkien");
        assert!(book.isbn.is_none());
    }

    #[test]
    fn missing_title_decodes_as_empty() {
        let book: Book = serde_json::from_str(r#"{"key": "/works/OL1W"}"#).unwrap();
        assert_eq!(book.title, "");
    }

    #[test]
    fn null_title_decodes_as_empty() {
        let book: Book =
            serde_json::from_str(r#"{"key": "/works/OL1W", "title": null}"#).unwrap();
        assert_eq!(book.title, "");
        assert_eq!(book.key.as_deref(), Some("/works/OL1W"));
    }

    #[test]
    fn sort_year_defaults_to_zero() {
        let mut book = Book::titled("Untitled");
        assert_eq!(book.sort_year(), 0);
        book.first_publish_year = Some(1980);
        assert_eq!(book.sort_year(), 1980);
    }

    #[test]
    fn authors_display_joins_names() {
        let mut book = Book::titled("Good Omens");
        book.author_name = Some(vec!["Terry Pratchett".into(), "Neil Gaiman".into()]);
        assert_eq!(book.authors_display(), "Terry Pratchett, Neil Gaiman");
    }
}
