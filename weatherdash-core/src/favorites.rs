use anyhow::{Context, Result};

use crate::storage::KeyValueStore;

pub const FAVORITES_KEY: &str = "weather_favs";

/// Maximum number of saved cities.
pub const MAX_FAVORITES: usize = 6;

/// Ordered set of saved city names, most recently added first.
///
/// Names are compared exactly, so "Paris" and "paris" are distinct entries.
#[derive(Debug)]
pub struct FavoritesStore<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> FavoritesStore<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<String>> {
        let Some(raw) = self.store.get(FAVORITES_KEY)? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw).context("Failed to parse saved favorites")
    }

    /// Prepend `name` unless it is already saved; returns whether it was added.
    pub fn add(&self, name: &str) -> Result<bool> {
        let mut favs = self.list()?;
        if favs.iter().any(|f| f == name) {
            return Ok(false);
        }

        favs.insert(0, name.to_string());
        favs.truncate(MAX_FAVORITES);
        self.save(&favs)?;

        tracing::info!(city = name, "favorite saved");
        Ok(true)
    }

    /// Drop every entry equal to `name`; unknown names are ignored.
    pub fn remove(&self, name: &str) -> Result<()> {
        let mut favs = self.list()?;
        favs.retain(|f| f != name);
        self.save(&favs)
    }

    fn save(&self, favs: &[String]) -> Result<()> {
        let json = serde_json::to_string(favs).context("Failed to serialize favorites")?;
        self.store.set(FAVORITES_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn seeded(names: &[&str]) -> MemoryStore {
        let store = MemoryStore::new();
        store
            .set(FAVORITES_KEY, &serde_json::to_string(names).unwrap())
            .unwrap();
        store
    }

    #[test]
    fn empty_store_lists_nothing() {
        let store = MemoryStore::new();
        assert!(FavoritesStore::new(&store).list().unwrap().is_empty());
    }

    #[test]
    fn add_prepends_and_ignores_duplicates() {
        let store = seeded(&["Paris", "Tokyo"]);
        let favs = FavoritesStore::new(&store);

        assert!(!favs.add("Paris").unwrap());
        assert_eq!(favs.list().unwrap(), vec!["Paris", "Tokyo"]);

        assert!(favs.add("Rome").unwrap());
        assert_eq!(favs.list().unwrap(), vec!["Rome", "Paris", "Tokyo"]);
    }

    #[test]
    fn adding_twice_is_idempotent() {
        let store = MemoryStore::new();
        let favs = FavoritesStore::new(&store);

        favs.add("Oslo").unwrap();
        let after_first = favs.list().unwrap();
        favs.add("Oslo").unwrap();

        assert_eq!(favs.list().unwrap(), after_first);
    }

    #[test]
    fn seventh_city_evicts_the_oldest() {
        let store = MemoryStore::new();
        let favs = FavoritesStore::new(&store);

        for city in ["A", "B", "C", "D", "E", "F", "G"] {
            favs.add(city).unwrap();
        }

        assert_eq!(favs.list().unwrap(), vec!["G", "F", "E", "D", "C", "B"]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let store = seeded(&["Paris"]);
        let favs = FavoritesStore::new(&store);

        assert!(favs.add("paris").unwrap());
        assert_eq!(favs.list().unwrap(), vec!["paris", "Paris"]);
    }

    #[test]
    fn remove_filters_exact_matches() {
        let store = seeded(&["Rome", "Paris", "Tokyo"]);
        let favs = FavoritesStore::new(&store);

        favs.remove("Paris").unwrap();

        assert_eq!(favs.list().unwrap(), vec!["Rome", "Tokyo"]);
    }

    #[test]
    fn removing_unknown_city_changes_nothing() {
        let store = seeded(&["Rome", "Tokyo"]);
        let favs = FavoritesStore::new(&store);

        favs.remove("Lima").unwrap();

        assert_eq!(favs.list().unwrap(), vec!["Rome", "Tokyo"]);
    }

    #[test]
    fn corrupt_entry_is_an_error() {
        let store = MemoryStore::new();
        store.set(FAVORITES_KEY, "{oops").unwrap();

        let err = FavoritesStore::new(&store).list().unwrap_err();
        assert!(err.to_string().contains("Failed to parse saved favorites"));
    }
}
