//! Persisted favorites.
//!
//! [`FavoritesStore`] keeps an ordered, deduplicated list of [`Favorite`]
//! snapshots in memory and mirrors every mutation to a [`Storage`] backend
//! under a single key.
//!
//! [`Favorite`]: crate::domain::Favorite
//! [`Storage`]: crate::storage::Storage

pub mod store;

pub use store::{FavoritesStore, ToggleOutcome, FAVORITES_KEY};
