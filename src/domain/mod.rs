//! Domain layer for the Bookfinder plugin.
//!
//! Core types independent of Zellij APIs and of how data is stored or fetched.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`book`]: Search result model
//! - [`favorite`]: Persisted favorite snapshot
//! - [`identity`]: Identifier derivation shared by favorite toggle and lookup
//! - [`query`]: Search field and sort order selectors

pub mod book;
pub mod error;
pub mod favorite;
pub mod identity;
pub mod query;

pub use book::Book;
pub use error::{BookfinderError, Result};
pub use favorite::Favorite;
pub use identity::derive_book_id;
pub use query::{SearchField, SortOrder};
