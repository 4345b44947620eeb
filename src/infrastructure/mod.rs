//! Filesystem conventions of the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, so user
//! supplied paths need translating on the way in and out.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, strip_host_prefix};
