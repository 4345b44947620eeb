//! Favorites store over an injected storage backend.

use crate::domain::error::{BookfinderError, Result};
use crate::domain::{derive_book_id, Book, Favorite};
use crate::storage::Storage;

/// Storage key the favorites list is persisted under.
pub const FAVORITES_KEY: &str = "bf_favs";

/// What a call to [`FavoritesStore::toggle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The book was prepended to the list.
    Added,
    /// The book was already a favorite and has been removed.
    Removed,
    /// No identifier could be derived; nothing changed.
    Unidentifiable,
}

/// Ordered set of favorite books, most recently added first.
///
/// The in-memory list is authoritative for the running plugin. Each mutation
/// rewrites the whole list to storage; if that write fails the mutation is
/// kept in memory and the error is returned so the caller can report it.
#[derive(Debug)]
pub struct FavoritesStore {
    storage: Box<dyn Storage>,
    entries: Vec<Favorite>,
}

impl FavoritesStore {
    /// Loads the persisted list from `storage`.
    ///
    /// Never fails: a missing, unreadable or malformed record yields an empty
    /// list and a warning in the log.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookfinder::domain::Book;
    /// use bookfinder::favorites::{FavoritesStore, ToggleOutcome};
    /// use bookfinder::storage::MemoryStorage;
    ///
    /// let mut store = FavoritesStore::load(Box::new(MemoryStorage::new()));
    /// let dune = Book { key: Some("/works/OL1W".into()), ..Book::titled("Dune") };
    ///
    /// assert_eq!(store.toggle(&dune, 0)?, ToggleOutcome::Added);
    /// assert!(store.is_favorite(&dune));
    /// # Ok::<(), bookfinder::BookfinderError>(())
    /// ```
    #[must_use]
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let _span = tracing::debug_span!("favorites_load").entered();

        let entries = match storage.read(FAVORITES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Favorite>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(error = %e, "stored favorites are malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored favorites, starting empty");
                Vec::new()
            }
        };

        tracing::debug!(count = entries.len(), "favorites loaded");
        Self { storage, entries }
    }

    /// Adds the book if it is not a favorite, removes it otherwise.
    ///
    /// Identity comes from [`derive_book_id`], so two search results for
    /// different editions of the same work toggle the same entry. New entries
    /// are prepended; the whole list is then written back to storage.
    ///
    /// # Parameters
    ///
    /// * `book` - Search result to add or remove
    /// * `now` - Unix timestamp recorded as `added_at` on a new entry
    ///
    /// # Returns
    ///
    /// - [`ToggleOutcome::Added`] if the book was prepended
    /// - [`ToggleOutcome::Removed`] if an entry with the same id was removed
    /// - [`ToggleOutcome::Unidentifiable`] if no id could be derived; nothing
    ///   is changed or written in that case
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the updated list fails. The in-memory
    /// list has already been updated at that point.
    ///
    /// # Example
    ///
    /// ```
    /// use bookfinder::domain::Book;
    /// use bookfinder::favorites::{FavoritesStore, ToggleOutcome};
    /// use bookfinder::storage::MemoryStorage;
    ///
    /// let mut store = FavoritesStore::load(Box::new(MemoryStorage::new()));
    /// let book = Book { isbn: Some(vec!["0140328726".into()]), ..Book::titled("Matilda") };
    ///
    /// assert_eq!(store.toggle(&book, 0)?, ToggleOutcome::Added);
    /// assert_eq!(store.toggle(&book, 0)?, ToggleOutcome::Removed);
    /// assert!(store.is_empty());
    /// # Ok::<(), bookfinder::BookfinderError>(())
    /// ```
    pub fn toggle(&mut self, book: &Book, now: i64) -> Result<ToggleOutcome> {
        let Some(id) = derive_book_id(book) else {
            tracing::debug!(title = %book.title, "cannot derive id, toggle ignored");
            return Ok(ToggleOutcome::Unidentifiable);
        };

        let outcome = if let Some(pos) = self.position(&id) {
            self.entries.remove(pos);
            ToggleOutcome::Removed
        } else {
            let Some(favorite) = Favorite::from_book(book, now) else {
                return Ok(ToggleOutcome::Unidentifiable);
            };
            self.entries.insert(0, favorite);
            ToggleOutcome::Added
        };

        tracing::debug!(%id, ?outcome, count = self.entries.len(), "favorite toggled");
        self.persist()?;
        Ok(outcome)
    }

    /// Removes the entry with `id`.
    ///
    /// Used by the favorites view, where entries are addressed by their
    /// stored id rather than by a search result.
    ///
    /// # Returns
    ///
    /// `true` if an entry was removed, `false` if no entry had that id (no
    /// write happens then).
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the updated list fails.
    pub fn remove_by_id(&mut self, id: &str) -> Result<bool> {
        let Some(pos) = self.position(id) else {
            return Ok(false);
        };
        self.entries.remove(pos);
        tracing::debug!(%id, "favorite removed");
        self.persist()?;
        Ok(true)
    }

    /// Whether `book` is in the list. Pure lookup by derived id; a book with
    /// no derivable id is never a favorite.
    #[must_use]
    pub fn is_favorite(&self, book: &Book) -> bool {
        derive_book_id(book).is_some_and(|id| self.contains_id(&id))
    }

    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Entries, most recently added first.
    #[must_use]
    pub fn entries(&self) -> &[Favorite] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|f| f.id == id)
    }

    fn persist(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("favorites_persist", count = self.entries.len()).entered();
        let json = serde_json::to_string(&self.entries)
            .map_err(|e| BookfinderError::Storage(format!("failed to serialize favorites: {e}")))?;
        self.storage.write(FAVORITES_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JsonFileStorage, MemoryStorage};

    fn keyed(key: &str, title: &str) -> Book {
        Book {
            key: Some(key.to_string()),
            ..Book::titled(title)
        }
    }

    #[test]
    fn toggle_twice_restores_original_list() {
        let mut store = FavoritesStore::load(Box::new(MemoryStorage::new()));
        store.toggle(&keyed("/works/OL1W", "Dune"), 10).unwrap();
        let before = store.entries().to_vec();

        let other = keyed("/works/OL2W", "Emma");
        assert_eq!(store.toggle(&other, 20).unwrap(), ToggleOutcome::Added);
        assert_eq!(store.toggle(&other, 30).unwrap(), ToggleOutcome::Removed);

        assert_eq!(store.entries(), before.as_slice());
        assert!(!store.is_favorite(&other));
    }

    #[test]
    fn newest_first() {
        let mut store = FavoritesStore::load(Box::new(MemoryStorage::new()));
        store.toggle(&keyed("/works/A", "A"), 1).unwrap();
        store.toggle(&keyed("/works/B", "B"), 2).unwrap();

        let ids: Vec<_> = store.entries().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["/works/B", "/works/A"]);
    }

    #[test]
    fn same_work_key_is_same_favorite_across_editions() {
        let mut store = FavoritesStore::load(Box::new(MemoryStorage::new()));
        let first = Book {
            key: Some("/works/OL45804W".into()),
            cover_edition_key: Some("OL1M".into()),
            ..Book::titled("Fantastic Mr Fox")
        };
        let second = Book {
            key: Some("/works/OL45804W".into()),
            cover_edition_key: Some("OL2M".into()),
            ..Book::titled("Fantastic Mr. Fox (Reissue)")
        };

        store.toggle(&first, 0).unwrap();
        assert!(store.is_favorite(&second));

        assert_eq!(store.toggle(&second, 1).unwrap(), ToggleOutcome::Removed);
        assert!(store.is_empty());
    }

    #[test]
    fn unidentifiable_book_is_noop() {
        let storage = MemoryStorage::new();
        let mut store = FavoritesStore::load(Box::new(storage.clone()));

        assert_eq!(
            store.toggle(&Book::default(), 0).unwrap(),
            ToggleOutcome::Unidentifiable
        );
        assert!(store.is_empty());
        assert_eq!(storage.read(FAVORITES_KEY).unwrap(), None);
    }

    #[test]
    fn every_mutation_rewrites_whole_list() {
        let storage = MemoryStorage::new();
        let mut store = FavoritesStore::load(Box::new(storage.clone()));
        store.toggle(&keyed("/works/A", "A"), 5).unwrap();

        let raw = storage.read(FAVORITES_KEY).unwrap().unwrap();
        let stored: Vec<Favorite> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, store.entries());

        assert!(store.remove_by_id("/works/A").unwrap());
        assert_eq!(storage.read(FAVORITES_KEY).unwrap().as_deref(), Some("[]"));
        assert!(!store.remove_by_id("/works/A").unwrap());
    }

    #[test]
    fn three_favorites_restored_in_order_after_restart() {
        let dir = tempfile::TempDir::new().unwrap();
        {
            let storage = JsonFileStorage::open(dir.path()).unwrap();
            let mut store = FavoritesStore::load(Box::new(storage));
            for (i, key) in ["/works/A", "/works/B", "/works/C"].iter().enumerate() {
                store.toggle(&keyed(key, key), i as i64).unwrap();
            }
        }

        let storage = JsonFileStorage::open(dir.path()).unwrap();
        let store = FavoritesStore::load(Box::new(storage));
        let ids: Vec<_> = store.entries().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["/works/C", "/works/B", "/works/A"]);
    }

    #[test]
    fn malformed_record_loads_empty() {
        let storage = MemoryStorage::with_record(FAVORITES_KEY, "{not json");
        let store = FavoritesStore::load(Box::new(storage));
        assert!(store.is_empty());
    }

    #[test]
    fn legacy_entries_without_timestamp_load() {
        let storage = MemoryStorage::with_record(
            FAVORITES_KEY,
            r#"[{"id":"/works/A","title":"A","author_name":["X"]},{"id":"/works/B","title":"B","cover_i":7}]"#,
        );
        let store = FavoritesStore::load(Box::new(storage));
        assert_eq!(store.len(), 2);
        assert_eq!(store.entries()[0].added_at, None);
        assert_eq!(store.entries()[1].cover_i, Some(7));
    }

    #[test]
    fn failed_write_keeps_in_memory_change() {
        let storage = MemoryStorage::new().failing_writes();
        let mut store = FavoritesStore::load(Box::new(storage));
        let book = keyed("/works/A", "A");

        assert!(store.toggle(&book, 0).is_err());
        assert!(store.is_favorite(&book));
    }
}
