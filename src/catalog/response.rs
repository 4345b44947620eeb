//! Search response decoding.

use crate::domain::{Book, BookfinderError, Result};
use serde::Deserialize;

/// One decoded page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub docs: Vec<Book>,

    /// Offset of the first returned document.
    #[serde(default)]
    pub start: u64,

    /// Total number of matches across all pages.
    #[serde(default, rename = "numFound", alias = "num_found")]
    pub num_found: u64,
}

impl SearchPage {
    /// Whether more results exist after this page.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookfinder::catalog::SearchPage;
    /// use bookfinder::domain::Book;
    ///
    /// let page = SearchPage {
    ///     docs: vec![Book::titled("x"); 20],
    ///     start: 0,
    ///     num_found: 45,
    /// };
    /// assert!(page.has_more());
    /// ```
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.start + (self.docs.len() as u64) < self.num_found
    }
}

/// Decodes a raw catalog response.
///
/// # Errors
///
/// - [`BookfinderError::Http`] for any status outside `200..300`
/// - [`BookfinderError::Decode`] when the body is not a search payload
pub fn decode_page(status: u16, body: &[u8]) -> Result<SearchPage> {
    if !(200..300).contains(&status) {
        return Err(BookfinderError::Http(status));
    }

    serde_json::from_slice(body).map_err(|e| BookfinderError::Decode(e.to_string()))
}
