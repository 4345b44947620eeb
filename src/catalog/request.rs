//! Search request construction.
//!
//! Builds the catalog search URL and the request context that travels with a
//! `web_request` so the response can be matched back to the fetch that issued
//! it.

use crate::domain::SearchField;
use std::collections::BTreeMap;

/// Number of documents requested per page.
pub const PAGE_SIZE: u32 = 20;

/// Default catalog base URL.
pub const DEFAULT_CATALOG_URL: &str = "https://openlibrary.org";

const CONTEXT_TOKEN: &str = "bookfinder_token";
const CONTEXT_PAGE: &str = "bookfinder_page";
const CONTEXT_REPLACE: &str = "bookfinder_replace";

/// Builds the search URL for one page of results.
///
/// The query is trimmed and percent-encoded; the parameter name follows the
/// search field (`title`, `author`, `isbn` or `q`).
///
/// # Examples
///
/// ```
/// use bookfinder::catalog::search_url;
/// use bookfinder::domain::SearchField;
///
/// let url = search_url("https://openlibrary.org", SearchField::Author, "  ursula le guin ", 2);
/// assert_eq!(
///     url,
///     "https://openlibrary.org/search.json?author=ursula%20le%20guin&page=2&limit=20"
/// );
/// ```
#[must_use]
pub fn search_url(base: &str, field: SearchField, query: &str, page: u32) -> String {
    let encoded = urlencoding::encode(query.trim());
    format!(
        "{}/search.json?{}={encoded}&page={page}&limit={PAGE_SIZE}",
        base.trim_end_matches('/'),
        field.param(),
    )
}

/// One outbound fetch, as handed to the host for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Fully built catalog URL.
    pub url: String,
    /// Monotonic request token; only the latest token's response is applied.
    pub token: u64,
    /// 1-based page being requested.
    pub page: u32,
    /// Whether the response replaces (`true`) or extends the result list.
    pub replace: bool,
}

impl SearchRequest {
    /// Encodes the request metadata as a `web_request` context map.
    #[must_use]
    pub fn context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(CONTEXT_TOKEN.to_string(), self.token.to_string());
        context.insert(CONTEXT_PAGE.to_string(), self.page.to_string());
        context.insert(CONTEXT_REPLACE.to_string(), self.replace.to_string());
        context
    }
}

/// Request metadata recovered from a response context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTag {
    pub token: u64,
    pub page: u32,
    pub replace: bool,
}

impl RequestTag {
    /// Recovers the tag from a context produced by [`SearchRequest::context`].
    ///
    /// Returns `None` for responses to requests this plugin did not issue.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        Some(Self {
            token: context.get(CONTEXT_TOKEN)?.parse().ok()?,
            page: context.get(CONTEXT_PAGE)?.parse().ok()?,
            replace: context.get(CONTEXT_REPLACE)?.parse().ok()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_uses_field_parameter() {
        let cases = [
            (SearchField::Title, "title="),
            (SearchField::Author, "author="),
            (SearchField::Isbn, "isbn="),
            (SearchField::FreeText, "q="),
        ];
        for (field, expected) in cases {
            let url = search_url(DEFAULT_CATALOG_URL, field, "x", 1);
            assert!(url.contains(&format!("?{expected}x&")), "{url}");
        }
    }

    #[test]
    fn url_encodes_reserved_characters() {
        let url = search_url("https://example.test/", SearchField::FreeText, "c++ & rust?", 1);
        assert_eq!(
            url,
            "https://example.test/search.json?q=c%2B%2B%20%26%20rust%3F&page=1&limit=20"
        );
    }

    #[test]
    fn context_round_trips_through_tag() {
        let request = SearchRequest {
            url: String::new(),
            token: 17,
            page: 3,
            replace: false,
        };
        let tag = RequestTag::from_context(&request.context()).unwrap();
        assert_eq!(tag, RequestTag { token: 17, page: 3, replace: false });
    }

    #[test]
    fn foreign_context_is_rejected() {
        let mut context = BTreeMap::new();
        context.insert("other".to_string(), "1".to_string());
        assert!(RequestTag::from_context(&context).is_none());
    }
}
