//! Storage backend abstraction.
//!
//! The plugin persists a handful of whole-value records (today only the
//! favorites list) under fixed keys, much like browser local storage. The
//! [`Storage`] trait captures exactly that: read a record or overwrite it
//! whole. Records are opaque strings; callers own serialization.

use crate::domain::error::Result;

/// Abstraction over durable key/value storage.
///
/// # Implementations
///
/// - [`JsonFileStorage`](crate::storage::JsonFileStorage): one JSON file per
///   key with atomic writes (production)
/// - [`MemoryStorage`](crate::storage::MemoryStorage): in-memory map (tests)
pub trait Storage: Send + std::fmt::Debug {
    /// Reads the record stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been stored under the key yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the record stored under `key` with `contents`.
    ///
    /// The write is whole-value: no partial updates, no merging.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn write(&mut self, key: &str, contents: &str) -> Result<()>;
}
