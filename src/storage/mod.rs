//! Storage layer for durable local state.
//!
//! Provides a small key/value abstraction over whole-record persistence. The
//! favorites store sits on top of it and owns serialization.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction
//! - `json`: One-JSON-file-per-key implementation with atomic writes
//! - `memory`: In-memory implementation for tests and fallback

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::Storage;
pub use json::JsonFileStorage;
pub use memory::MemoryStorage;
