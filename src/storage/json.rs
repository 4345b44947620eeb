//! JSON file-based storage backend.
//!
//! Each key is stored as its own file, `<dir>/<key>.json`. Writes go to a
//! temporary file first and are then renamed into place, so a crash mid-write
//! never leaves a truncated record behind.
//!
//! # Layout
//!
//! ```text
//! ~/.local/share/zellij/bookfinder/
//! ├── bf_favs.json           ← favorites list
//! └── bookfinder-otlp.json   ← trace export (observability)
//! ```

use crate::domain::error::{BookfinderError, Result};
use crate::storage::backend::Storage;
use std::path::PathBuf;

/// Directory-backed JSON storage.
///
/// Holds no in-memory cache: every read goes to disk and every write replaces
/// the whole file. Records are small (a favorites list), so this keeps the
/// file the single source of truth across plugin instances.
#[derive(Debug)]
pub struct JsonFileStorage {
    /// Directory containing one file per key.
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Opens storage rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bookfinder::storage::{JsonFileStorage, Storage};
    ///
    /// let mut storage = JsonFileStorage::open("/tmp/bookfinder")?;
    /// storage.write("bf_favs", "[]")?;
    /// # Ok::<(), bookfinder::BookfinderError>(())
    /// ```
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tracing::debug!(path = ?dir, "opening JSON storage");
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Path of the file backing `key`.
    ///
    /// Keys are restricted to `[A-Za-z0-9_-]` so a key can never escape the
    /// storage directory.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(BookfinderError::Storage(format!("invalid storage key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for JsonFileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        let _span = tracing::debug_span!("json_read", path = ?path).entered();

        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(bytes = contents.len(), "record loaded");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no record stored yet");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let _span = tracing::debug_span!("json_write", path = ?path, bytes = contents.len()).entered();

        let tmp_path = path.with_extension("json.tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, contents)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &path)?;

        tracing::debug!("record saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = JsonFileStorage::open(dir.path()).unwrap();
        assert_eq!(storage.read("bf_favs").unwrap(), None);
    }

    #[test]
    fn write_then_read_from_fresh_instance() {
        let dir = tempfile::TempDir::new().unwrap();
        {
            let mut storage = JsonFileStorage::open(dir.path()).unwrap();
            storage.write("bf_favs", r#"[{"id":"a","title":"A"}]"#).unwrap();
        }

        let reopened = JsonFileStorage::open(dir.path()).unwrap();
        assert_eq!(
            reopened.read("bf_favs").unwrap().as_deref(),
            Some(r#"[{"id":"a","title":"A"}]"#)
        );
        assert!(!dir.path().join("bf_favs.json.tmp").exists());
    }

    #[test]
    fn overwrite_replaces_whole_record() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut storage = JsonFileStorage::open(dir.path()).unwrap();
        storage.write("k", "first value that is long").unwrap();
        storage.write("k", "2").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn creates_nested_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut storage = JsonFileStorage::open(&nested).unwrap();
        assert!(nested.is_dir());
        storage.write("k", "v").unwrap();
        assert!(nested.join("k.json").is_file());
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut storage = JsonFileStorage::open(dir.path()).unwrap();
        assert!(matches!(
            storage.write("../escape", "x"),
            Err(BookfinderError::Storage(_))
        ));
        assert!(storage.read("").is_err());
    }
}
