//! # Favorites
//!
//! The user's favorited route ids, kept across sessions in a [`KeyValueStore`].
//!
//! [`FavoriteSet`] is the pure value: toggling returns a new set and touches no
//! storage. [`FavoritesStore`] owns a set plus the store it came from, and
//! writes the full set back after every mutation. Storage problems never reach
//! the caller from there; a failed read starts an empty set and a failed write
//! keeps the in-memory set authoritative for the rest of the session.

use std::collections::HashSet;

use log::{debug, error, info, warn};

use crate::config::WalkConfig;
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Storage key of the favorites record.
pub const FAVORITES_KEY: &str = "sammiewalk_favorites";

// ============================================================================
// Favorite Set
// ============================================================================

/// Unique route ids in the order they were favorited.
///
/// Equality is set equality: two sets with the same ids are equal whatever
/// order they were favorited in.
#[derive(Debug, Clone, Default)]
pub struct FavoriteSet {
    ids: Vec<String>,
}

impl PartialEq for FavoriteSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|id| other.contains(id))
    }
}

impl Eq for FavoriteSet {}

impl FavoriteSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from ids, keeping the first occurrence of duplicates.
    pub fn from_ids<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut seen = HashSet::new();
        let ids = ids
            .into_iter()
            .map(Into::into)
            .filter(|id| seen.insert(id.clone()))
            .collect();
        Self { ids }
    }

    /// Decode the persisted form: a JSON array of strings.
    pub fn from_json(json: &str) -> Result<Self> {
        let ids: Vec<String> = serde_json::from_str(json)?;
        Ok(Self::from_ids(ids))
    }

    /// Encode the persisted form: a JSON array of strings.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.ids)?)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|f| f == id)
    }

    /// The set with `id` removed if present, appended if absent.
    pub fn toggled(&self, id: &str) -> Self {
        let mut next = self.clone();
        if let Some(pos) = next.ids.iter().position(|f| f == id) {
            next.ids.remove(pos);
        } else {
            next.ids.push(id.to_string());
        }
        next
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Favorited ids that are not among `known_ids`.
    ///
    /// Stale favorites are harmless (they simply resolve to no route); this
    /// only reports them.
    pub fn stale_ids<'a, I>(&self, known_ids: I) -> Vec<&str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let known: HashSet<&str> = known_ids.into_iter().collect();
        self.iter().filter(|id| !known.contains(*id)).collect()
    }
}

// ============================================================================
// Favorites Store
// ============================================================================

/// A favorite set bound to the store it persists to.
pub struct FavoritesStore<S: KeyValueStore> {
    store: S,
    key: String,
    favorites: FavoriteSet,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Load favorites from `store` under the default key.
    pub fn load(store: S) -> Self {
        Self::load_with_key(store, FAVORITES_KEY)
    }

    /// Load favorites using the key from `config`.
    pub fn with_config(store: S, config: &WalkConfig) -> Self {
        Self::load_with_key(store, &config.favorites_key)
    }

    /// Load favorites stored under `key`.
    ///
    /// A missing, unreadable or malformed value yields an empty set.
    pub fn load_with_key(store: S, key: &str) -> Self {
        let favorites = Self::read(&store, key);
        info!(
            "[Favorites] Loaded {} favorites from '{}'",
            favorites.len(),
            key
        );
        Self {
            store,
            key: key.to_string(),
            favorites,
        }
    }

    fn read(store: &S, key: &str) -> FavoriteSet {
        match store.get(key) {
            Ok(Some(json)) => FavoriteSet::from_json(&json).unwrap_or_else(|e| {
                warn!("[Favorites] Ignoring unparseable value under '{}': {}", key, e);
                FavoriteSet::new()
            }),
            Ok(None) => FavoriteSet::new(),
            Err(e) => {
                warn!("[Favorites] Failed to read '{}': {}", key, e);
                FavoriteSet::new()
            }
        }
    }

    /// Current favorites.
    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub fn is_member(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Flip membership of `id`, then persist the whole set.
    ///
    /// The in-memory set is updated even when the write fails.
    pub fn toggle(&mut self, id: &str) -> &FavoriteSet {
        self.favorites = self.favorites.toggled(id);
        debug!(
            "[Favorites] Toggled '{}' (now {})",
            id,
            if self.favorites.contains(id) { "favorite" } else { "removed" }
        );
        self.persist_logged();
        &self.favorites
    }

    /// Remove every favorite and persist the empty set.
    pub fn clear(&mut self) {
        self.favorites = FavoriteSet::new();
        self.persist_logged();
    }

    /// Write the full set to the store.
    pub fn persist(&mut self) -> Result<()> {
        let json = self.favorites.to_json()?;
        self.store.set(&self.key, &json)
    }

    fn persist_logged(&mut self) {
        if let Err(e) = self.persist() {
            error!(
                "[Favorites] Failed to persist {} favorites to '{}': {}",
                self.favorites.len(),
                self.key,
                e
            );
        }
    }

    /// The storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WalkError;
    use crate::storage::MemoryStore;

    /// Store whose reads and writes always fail.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(WalkError::storage("access denied"))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(WalkError::storage("access denied"))
        }

        fn remove(&mut self, _key: &str) -> Result<()> {
            Err(WalkError::storage("access denied"))
        }
    }

    fn store_with(value: &str) -> MemoryStore {
        let mut store = MemoryStore::new();
        store.set(FAVORITES_KEY, value).unwrap();
        store
    }

    #[test]
    fn test_toggle_twice_restores_set() {
        let set = FavoriteSet::from_ids(["a", "b"]);
        for id in ["a", "b", "c", ""] {
            assert_eq!(set.toggled(id).toggled(id), set);
        }
    }

    #[test]
    fn test_toggle_pair_on_present_id_moves_it_last() {
        let set = FavoriteSet::from_ids(["a", "b"]);
        let after = set.toggled("a").toggled("a");
        assert_eq!(after, set);
        assert_eq!(after.iter().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_equality_ignores_order() {
        assert_eq!(FavoriteSet::from_ids(["x", "y"]), FavoriteSet::from_ids(["y", "x"]));
        assert_ne!(FavoriteSet::from_ids(["x", "y"]), FavoriteSet::from_ids(["x"]));
        assert_ne!(FavoriteSet::from_ids(["x", "y"]), FavoriteSet::from_ids(["x", "z"]));
    }

    #[test]
    fn test_toggle_membership() {
        let set = FavoriteSet::from_ids(["a"]);
        assert!(!set.toggled("a").contains("a"));
        assert!(set.toggled("b").contains("b"));
        // Original untouched
        assert!(set.contains("a"));
        assert!(!set.contains("b"));
    }

    #[test]
    fn test_toggle_preserves_insertion_order() {
        let set = FavoriteSet::new().toggled("x").toggled("y").toggled("z");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["x", "y", "z"]);
        let set = set.toggled("y");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["x", "z"]);
    }

    #[test]
    fn test_from_ids_dedupes() {
        let set = FavoriteSet::from_ids(["a", "b", "a"]);
        assert_eq!(set.as_slice(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_stale_ids() {
        let set = FavoriteSet::from_ids(["a", "gone", "b"]);
        assert_eq!(set.stale_ids(["a", "b", "c"]), vec!["gone"]);
    }

    #[test]
    fn test_load_absent_is_empty() {
        let favorites = FavoritesStore::load(MemoryStore::new());
        assert!(favorites.favorites().is_empty());
        assert!(!favorites.is_member("a"));
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        for bad in ["{not json", "{\"a\": 1}", "[1, 2]", "\"a\"", "null", ""] {
            let favorites = FavoritesStore::load(store_with(bad));
            assert!(favorites.favorites().is_empty(), "value {:?}", bad);
        }
    }

    #[test]
    fn test_load_unreadable_store_is_empty() {
        let favorites = FavoritesStore::load(BrokenStore);
        assert!(favorites.favorites().is_empty());
    }

    #[test]
    fn test_load_round_trip() {
        let set = FavoriteSet::from_ids(["r-1", "r-2", "r-3"]);
        let favorites = FavoritesStore::load(store_with(&set.to_json().unwrap()));
        assert_eq!(favorites.favorites(), &set);
    }

    #[test]
    fn test_toggle_persists_every_mutation() {
        let mut favorites = FavoritesStore::load(MemoryStore::new());
        favorites.toggle("a");
        favorites.toggle("b");
        favorites.toggle("a");
        favorites.toggle("c");

        let stored = favorites.store().get(FAVORITES_KEY).unwrap().unwrap();
        assert_eq!(stored, r#"["b","c"]"#);

        let reloaded = FavoritesStore::load(favorites.into_inner());
        assert_eq!(reloaded.favorites(), &FavoriteSet::from_ids(["b", "c"]));
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut favorites = FavoritesStore::load(BrokenStore);
        favorites.toggle("a");
        assert!(favorites.is_member("a"));
        assert!(favorites.persist().is_err());
    }

    #[test]
    fn test_quota_exceeded_is_not_rolled_back() {
        let mut favorites = FavoritesStore::load(MemoryStore::with_quota(FAVORITES_KEY.len() + 8));
        favorites.toggle("ab");
        favorites.toggle("cdefgh");
        assert!(favorites.is_member("cdefgh"));

        // Only the first write fit; a new session sees what was persisted
        let reloaded = FavoritesStore::load(favorites.into_inner());
        assert_eq!(reloaded.favorites(), &FavoriteSet::from_ids(["ab"]));
    }

    #[test]
    fn test_clear() {
        let mut favorites = FavoritesStore::load(store_with(r#"["a","b"]"#));
        favorites.clear();
        assert!(favorites.favorites().is_empty());
        assert_eq!(
            favorites.store().get(FAVORITES_KEY).unwrap(),
            Some("[]".to_string())
        );
    }

    #[test]
    fn test_custom_key_from_config() {
        let config = WalkConfig {
            favorites_key: "other_key".to_string(),
            ..WalkConfig::default()
        };
        let mut favorites = FavoritesStore::with_config(MemoryStore::new(), &config);
        favorites.toggle("a");
        assert_eq!(favorites.key(), "other_key");
        assert!(favorites.store().get("other_key").unwrap().is_some());
        assert!(favorites.store().get(FAVORITES_KEY).unwrap().is_none());
    }
}
