//! Open Library search client.
//!
//! The plugin never performs HTTP itself: the host executes `web_request`
//! calls on its behalf. This module covers the two pure halves around that
//! call.
//!
//! - [`request`]: URL building and the request context used to match
//!   responses back to fetches
//! - [`response`]: decoding of the `{docs, start, numFound}` payload

pub mod request;
pub mod response;

pub use request::{search_url, RequestTag, SearchRequest, DEFAULT_CATALOG_URL, PAGE_SIZE};
pub use response::{decode_page, SearchPage};
