use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::models::FavoriteEntry;

/// Per-identity favorites, keyed by tender id.
///
/// One shared mapping from identity (the token's email claim) to an ordered
/// list of saved tenders. The store-wide lock serializes read-modify-write
/// sequences, so two concurrent adds of the same new id cannot both insert.
/// An identity's set is created lazily on its first `add` and lives for the
/// process lifetime.
pub struct FavoritesStore {
    sets: RwLock<HashMap<String, Vec<FavoriteEntry>>>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self {
            sets: RwLock::new(HashMap::new()),
        }
    }

    /// Insert the entry into the identity's set unless its id is already
    /// present. Returns whether an insert happened: an id appears at most
    /// once per identity.
    pub async fn add(&self, identity: &str, entry: FavoriteEntry) -> bool {
        let mut sets = self.sets.write().await;
        let set = sets.entry(identity.to_string()).or_default();

        if set.iter().any(|f| f.id == entry.id) {
            return false;
        }
        set.push(entry);
        true
    }

    /// Remove any entry matching `tender_id` from the identity's set.
    ///
    /// Returns true whenever the identity's set exists, even if the id was
    /// not in it; false only for an identity that never added anything.
    pub async fn remove(&self, identity: &str, tender_id: &str) -> bool {
        let mut sets = self.sets.write().await;
        match sets.get_mut(identity) {
            Some(set) => {
                set.retain(|f| f.id != tender_id);
                true
            }
            None => false,
        }
    }

    /// The identity's favorites in insertion order; empty for an unknown
    /// identity, never an error.
    pub async fn list(&self, identity: &str) -> Vec<FavoriteEntry> {
        let sets = self.sets.read().await;
        sets.get(identity).cloned().unwrap_or_default()
    }
}

impl Default for FavoritesStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_entry(id: &str) -> FavoriteEntry {
        FavoriteEntry {
            id: id.to_string(),
            title: format!("Tender {}", id),
            description: String::new(),
            country: "DE".to_string(),
            value: 100_000.0,
        }
    }

    #[tokio::test]
    async fn test_add_is_idempotent_per_id() {
        let store = FavoritesStore::new();

        assert!(store.add("u1@test.com", create_entry("t1")).await);
        assert!(!store.add("u1@test.com", create_entry("t1")).await);

        assert_eq!(store.list("u1@test.com").await.len(), 1);
    }

    #[tokio::test]
    async fn test_sets_are_isolated_per_identity() {
        let store = FavoritesStore::new();

        store.add("u1@test.com", create_entry("t1")).await;
        store.add("u2@test.com", create_entry("t1")).await;
        store.add("u2@test.com", create_entry("t2")).await;

        assert_eq!(store.list("u1@test.com").await.len(), 1);
        assert_eq!(store.list("u2@test.com").await.len(), 2);
    }

    #[tokio::test]
    async fn test_remove_then_list_never_returns_the_id() {
        let store = FavoritesStore::new();
        store.add("u1@test.com", create_entry("t1")).await;
        store.add("u1@test.com", create_entry("t2")).await;

        assert!(store.remove("u1@test.com", "t1").await);

        let remaining = store.list("u1@test.com").await;
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|f| f.id != "t1"));
    }

    #[tokio::test]
    async fn test_remove_reports_success_for_a_missing_id() {
        let store = FavoritesStore::new();
        store.add("u1@test.com", create_entry("t1")).await;

        assert!(store.remove("u1@test.com", "never-added").await);
        assert_eq!(store.list("u1@test.com").await.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_fails_for_an_unknown_identity() {
        let store = FavoritesStore::new();

        assert!(!store.remove("nobody@test.com", "t1").await);
    }

    #[tokio::test]
    async fn test_list_is_empty_for_an_unknown_identity() {
        let store = FavoritesStore::new();

        assert!(store.list("nobody@test.com").await.is_empty());
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = FavoritesStore::new();
        store.add("u1@test.com", create_entry("t3")).await;
        store.add("u1@test.com", create_entry("t1")).await;
        store.add("u1@test.com", create_entry("t2")).await;

        let ids: Vec<String> = store
            .list("u1@test.com")
            .await
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids, vec!["t3", "t1", "t2"]);
    }
}
