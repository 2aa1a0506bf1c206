//! The favorites set.
//!
//! [`FavoritesStore`] is a write-through cache over one key of a
//! [`KeyValueStore`]. Handles are cheap to clone and all clones share one set,
//! so every view in the process sees the same favorites. Views that need to
//! re-render on change call [`FavoritesStore::subscribe`].
//!
//! The persisted value is a JSON array of summaries in insertion order, unique
//! by id, using the API's field names:
//!
//! ```json
//! [{"imdbID":"tt0111161","Title":"The Shawshank Redemption","Year":"1994","Poster":"N/A","Type":"movie"}]
//! ```

mod filter;
pub mod storage;

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::error::Result;
use crate::movie::MovieSummary;
use crate::paths;

pub use filter::{FilteredFavorite, filter_favorites};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

/// Storage key holding the favorites blob.
pub const FAVORITES_KEY: &str = "favorites";

/// What a toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

struct Inner {
    backend: Arc<dyn KeyValueStore>,
    items: Mutex<Vec<MovieSummary>>,
    changes: watch::Sender<Vec<MovieSummary>>,
}

/// Shared handle to the favorites set
#[derive(Clone)]
pub struct FavoritesStore {
    inner: Arc<Inner>,
}

impl FavoritesStore {
    /// Open the store over `backend`, loading whatever is persisted.
    pub fn open(backend: impl KeyValueStore + 'static) -> Self {
        let backend: Arc<dyn KeyValueStore> = Arc::new(backend);
        let items = load(backend.as_ref());
        let (changes, _) = watch::channel(items.clone());

        Self {
            inner: Arc::new(Inner {
                backend,
                items: Mutex::new(items),
                changes,
            }),
        }
    }

    /// Open the store under the marquee data directory.
    pub fn open_default() -> Self {
        Self::open(FileStore::new(paths::data_dir()))
    }

    /// Snapshot of the set in insertion order.
    pub fn list(&self) -> Vec<MovieSummary> {
        self.inner.items.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.items.lock().is_empty()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.inner.items.lock().iter().any(|fav| fav.id == id)
    }

    pub fn get(&self, id: &str) -> Option<MovieSummary> {
        self.inner
            .items
            .lock()
            .iter()
            .find(|fav| fav.id == id)
            .cloned()
    }

    /// Remove `movie` if present by id, else append it.
    pub fn toggle(&self, movie: &MovieSummary) -> Result<Toggled> {
        let mut items = self.inner.items.lock();

        let (updated, toggled) = if items.iter().any(|fav| fav.id == movie.id) {
            let kept = items
                .iter()
                .filter(|fav| fav.id != movie.id)
                .cloned()
                .collect();
            (kept, Toggled::Removed)
        } else {
            let mut appended = items.clone();
            appended.push(movie.clone());
            (appended, Toggled::Added)
        };

        self.commit(&mut items, updated)?;
        tracing::debug!(id = %movie.id, ?toggled, "favorite toggled");
        Ok(toggled)
    }

    /// Remove by id. Returns false, without writing, if it was not a favorite.
    pub fn remove(&self, id: &str) -> Result<bool> {
        let mut items = self.inner.items.lock();
        if !items.iter().any(|fav| fav.id == id) {
            return Ok(false);
        }

        let updated = items.iter().filter(|fav| fav.id != id).cloned().collect();
        self.commit(&mut items, updated)?;
        tracing::debug!(%id, "favorite removed");
        Ok(true)
    }

    /// Favorites matching a fuzzy pattern, best first.
    pub fn filter(&self, pattern: &str) -> Vec<FilteredFavorite> {
        filter_favorites(&self.list(), pattern)
    }

    /// Receiver that observes the set after every successful mutation.
    pub fn subscribe(&self) -> watch::Receiver<Vec<MovieSummary>> {
        self.inner.changes.subscribe()
    }

    /// Persist the full updated set, then make it current. On a failed write
    /// the in-memory set stays as it was.
    fn commit(&self, items: &mut Vec<MovieSummary>, updated: Vec<MovieSummary>) -> Result<()> {
        let blob = serde_json::to_string(&updated)?;
        self.inner.backend.set(FAVORITES_KEY, &blob)?;

        *items = updated;
        self.inner.changes.send_replace(items.clone());
        Ok(())
    }
}

/// Read the persisted set. Absent or unreadable content yields an empty set,
/// malformed entries are skipped and duplicate ids keep their first occurrence.
pub fn load(backend: &dyn KeyValueStore) -> Vec<MovieSummary> {
    let raw = match backend.get(FAVORITES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "could not read favorites, starting empty");
            return Vec::new();
        }
    };

    let entries: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "favorites are not a JSON array, starting empty");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<MovieSummary>(entry) {
            Ok(movie) => Some(movie),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed favorite");
                None
            }
        })
        .filter(|movie| seen.insert(movie.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarqueeError;
    use crate::testing::movie;
    use tempfile::TempDir;

    /// Backend whose writes always fail.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(MarqueeError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    fn shawshank() -> MovieSummary {
        MovieSummary::new("tt0111161", "Shawshank")
    }

    #[test]
    fn test_starts_empty_without_persisted_value() {
        let store = FavoritesStore::open(MemoryStore::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalid_blob_loads_empty() {
        let store = FavoritesStore::open(MemoryStore::new().with_entry(FAVORITES_KEY, "{not json"));
        assert!(store.is_empty());

        let store = FavoritesStore::open(MemoryStore::new().with_entry(FAVORITES_KEY, "null"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_drops_duplicate_ids() {
        let blob = r#"[
            {"imdbID":"tt1","Title":"First"},
            {"imdbID":"tt2","Title":"Second"},
            {"imdbID":"tt1","Title":"First again"}
        ]"#;
        let store = FavoritesStore::open(MemoryStore::new().with_entry(FAVORITES_KEY, blob));
        let titles: Vec<String> = store.list().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn test_load_skips_malformed_entries() {
        let blob = r#"[
            {"imdbID":"tt1","Title":"First"},
            {"imdbID":"tt2"},
            42,
            {"imdbID":"tt3","Title":"Third"}
        ]"#;
        let store = FavoritesStore::open(MemoryStore::new().with_entry(FAVORITES_KEY, blob));
        let ids: Vec<String> = store.list().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["tt1", "tt3"]);
    }

    #[test]
    fn test_toggle_twice_round_trips() {
        let store = FavoritesStore::open(MemoryStore::new());
        store.toggle(&movie("tt0068646", "The Godfather", "1972")).unwrap();
        let before = store.list();

        assert_eq!(store.toggle(&shawshank()).unwrap(), Toggled::Added);
        assert!(store.is_favorite("tt0111161"));
        assert_eq!(store.toggle(&shawshank()).unwrap(), Toggled::Removed);

        assert_eq!(store.list(), before);
        assert_eq!(store.len(), 1);
        assert!(!store.is_favorite("tt0111161"));
    }

    #[test]
    fn test_toggle_removes_by_id_not_by_value() {
        let store = FavoritesStore::open(MemoryStore::new());
        store.toggle(&shawshank()).unwrap();

        let renamed = MovieSummary::new("tt0111161", "The Shawshank Redemption");
        assert_eq!(store.toggle(&renamed).unwrap(), Toggled::Removed);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove() {
        let store = FavoritesStore::open(MemoryStore::new());
        store.toggle(&shawshank()).unwrap();

        assert!(!store.remove("tt9999999").unwrap());
        assert!(store.remove("tt0111161").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_persist_and_reload_preserves_order() {
        let temp = TempDir::new().unwrap();
        let store = FavoritesStore::open(FileStore::new(temp.path()));
        let movies = vec![
            movie("tt3", "Third", "2003").with_poster("https://img/3.jpg"),
            movie("tt1", "First", "2001"),
            movie("tt2", "Second", "2002"),
        ];
        for m in &movies {
            store.toggle(m).unwrap();
        }

        let reopened = FavoritesStore::open(FileStore::new(temp.path()));
        assert_eq!(reopened.list(), movies);
    }

    #[test]
    fn test_blob_uses_api_field_names() {
        let temp = TempDir::new().unwrap();
        let backend = FileStore::new(temp.path());
        let store = FavoritesStore::open(backend.clone());
        store.toggle(&shawshank()).unwrap();

        let raw = backend.get(FAVORITES_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["imdbID"], "tt0111161");
        assert_eq!(value[0]["Title"], "Shawshank");
        assert_eq!(value[0]["Poster"], "N/A");
    }

    #[test]
    fn test_failed_write_leaves_set_unchanged() {
        let store = FavoritesStore::open(ReadOnlyStore);
        assert!(store.toggle(&shawshank()).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_one_set() {
        let store = FavoritesStore::open(MemoryStore::new());
        let other_view = store.clone();

        store.toggle(&shawshank()).unwrap();
        assert!(other_view.is_favorite("tt0111161"));
    }

    #[tokio::test]
    async fn test_subscribers_are_notified() {
        let store = FavoritesStore::open(MemoryStore::new());
        let mut changes = store.subscribe();

        store.toggle(&shawshank()).unwrap();
        changes.changed().await.unwrap();
        assert_eq!(changes.borrow_and_update().len(), 1);

        store.remove("tt0111161").unwrap();
        changes.changed().await.unwrap();
        assert!(changes.borrow_and_update().is_empty());
    }

    #[test]
    fn test_filter_delegates_to_fuzzy_match() {
        let store = FavoritesStore::open(MemoryStore::new());
        store.toggle(&movie("tt0068646", "The Godfather", "1972")).unwrap();
        store.toggle(&shawshank()).unwrap();

        let results = store.filter("shaw");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].movie.id, "tt0111161");
    }
}
