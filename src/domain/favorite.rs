//! Favorite book model.
//!
//! A [`Favorite`] is a snapshot of a search result taken at the moment the user
//! favorited it. It is not a live reference: later searches returning the same
//! book with a different title or author list do not change stored entries.

use super::book::{cover_url_for, join_authors, Book};
use super::identity::derive_book_id;
use serde::{Deserialize, Serialize};

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// A persisted favorite entry.
///
/// Serialized as `{"id", "title", "author_name"?, "cover_i"?, "added_at"?}`.
/// Optional fields are omitted when absent and tolerated when missing, so
/// lists written before `added_at` existed still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    /// Identifier derived by [`derive_book_id`].
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_i: Option<i64>,
    /// Unix timestamp of when the book was favorited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<i64>,
}

impl Favorite {
    /// Snapshots a search result as a favorite.
    ///
    /// Returns `None` when no identifier can be derived from the book.
    #[must_use]
    pub fn from_book(book: &Book, added_at: i64) -> Option<Self> {
        let id = derive_book_id(book)?;
        Some(Self {
            id,
            title: book.title.clone(),
            author_name: book.author_name.clone(),
            cover_i: book.cover_i,
            added_at: Some(added_at),
        })
    }

    #[must_use]
    pub fn authors_display(&self) -> String {
        join_authors(self.author_name.as_deref())
    }

    #[must_use]
    pub fn cover_url(&self) -> Option<String> {
        self.cover_i.map(cover_url_for)
    }

    /// Returns a human-readable string describing how long ago the book was
    /// favorited, relative to `now` (unix seconds).
    ///
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - Otherwise: "Xd ago"
    ///
    /// Entries without a timestamp return an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookfinder::domain::{Book, Favorite};
    ///
    /// let fav = Favorite::from_book(&Book::titled("Dune"), 1_000).unwrap();
    /// assert_eq!(fav.time_ago(1_030), "just now");
    /// assert_eq!(fav.time_ago(1_000 + 300), "5m ago");
    /// assert_eq!(fav.time_ago(1_000 + 3 * 86_400), "3d ago");
    /// ```
    #[must_use]
    pub fn time_ago(&self, now: i64) -> String {
        let Some(added_at) = self.added_at else {
            return String::new();
        };
        let diff = (now - added_at).max(0);

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            let mins = diff / SECONDS_PER_MINUTE;
            format!("{mins}m ago")
        } else if diff < SECONDS_PER_DAY {
            let hours = diff / SECONDS_PER_HOUR;
            format!("{hours}h ago")
        } else {
            let days = diff / SECONDS_PER_DAY;
            format!("{days}d ago")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_captures_display_fields() {
        let book = Book {
            key: Some("/works/OL1W".into()),
            title: "Emma".into(),
            author_name: Some(vec!["Jane Austen".into()]),
            cover_i: Some(42),
            first_publish_year: Some(1815),
            ..Book::default()
        };

        let fav = Favorite::from_book(&book, 10).unwrap();
        assert_eq!(fav.id, "/works/OL1W");
        assert_eq!(fav.title, "Emma");
        assert_eq!(fav.authors_display(), "Jane Austen");
        assert_eq!(fav.cover_i, Some(42));
        assert_eq!(fav.added_at, Some(10));
    }

    #[test]
    fn unidentifiable_book_has_no_favorite() {
        assert!(Favorite::from_book(&Book::default(), 0).is_none());
    }

    #[test]
    fn serializes_without_absent_optionals() {
        let fav = Favorite {
            id: "x".into(),
            title: "T".into(),
            author_name: None,
            cover_i: None,
            added_at: None,
        };
        assert_eq!(serde_json::to_string(&fav).unwrap(), r#"{"id":"x","title":"T"}"#);
    }

    #[test]
    fn loads_entries_without_timestamp() {
        let fav: Favorite =
            serde_json::from_str(r#"{"id":"OL1M","title":"T","author_name":["A"],"cover_i":7}"#)
                .unwrap();
        assert_eq!(fav.added_at, None);
        assert_eq!(fav.time_ago(100), "");
    }

    #[test]
    fn time_ago_hours() {
        let fav = Favorite::from_book(&Book::titled("T"), 0).unwrap();
        assert_eq!(fav.time_ago(2 * 3600 + 5), "2h ago");
    }
}
