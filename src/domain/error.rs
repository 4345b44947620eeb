//! Error types for the Bookfinder plugin.
//!
//! [`BookfinderError`] is the single error type shared by the catalog client,
//! the favorites store and the storage backends. Most failures never reach the
//! user directly: fetch failures collapse into one generic message and storage
//! failures are logged, so the variants exist mainly for diagnostics.

use thiserror::Error;

/// The main error type for Bookfinder operations.
///
/// # Examples
///
/// ```
/// use bookfinder::BookfinderError;
///
/// let err = BookfinderError::Http(503);
/// assert_eq!(err.to_string(), "Catalog returned HTTP 503");
/// ```
#[derive(Debug, Error)]
pub enum BookfinderError {
    /// Reading or writing the durable local store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog answered with a non-2xx status.
    ///
    /// Zellij reports transport failures (DNS, refused connections) as a
    /// non-2xx status as well, so this variant covers both.
    #[error("Catalog returned HTTP {0}")]
    Http(u16),

    /// The catalog payload was not the expected JSON shape.
    #[error("Failed to decode catalog response: {0}")]
    Decode(String),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Bookfinder operations.
pub type Result<T> = std::result::Result<T, BookfinderError>;
