//! Favorite products, kept on the client.
//!
//! Stored as a JSON array of product ids under [`FAVORITES_KEY`].

use std::sync::Arc;

use motoshop_api::{Storage, StorageError};
use motoshop_core::{Product, ProductId};
use tracing::{debug, warn};

/// Storage key of the favorites list.
pub const FAVORITES_KEY: &str = "favoritos";

/// The shopper's favorite products.
#[derive(Clone)]
pub struct Favorites {
    storage: Arc<dyn Storage>,
}

impl std::fmt::Debug for Favorites {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Favorites").finish_non_exhaustive()
    }
}

impl Favorites {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Favorite ids in the order they were added.
    ///
    /// A stored value that is not a JSON array of ids reads as empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage cannot be read.
    pub fn list(&self) -> Result<Vec<ProductId>, StorageError> {
        let Some(raw) = self.storage.get(FAVORITES_KEY)? else {
            return Ok(Vec::new());
        };
        Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring unreadable favorites");
            Vec::new()
        }))
    }

    /// Whether `id` is a favorite.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage cannot be read.
    pub fn contains(&self, id: &ProductId) -> Result<bool, StorageError> {
        Ok(self.list()?.contains(id))
    }

    /// Add `id` if absent, remove it if present.
    ///
    /// Returns whether `id` is a favorite afterwards.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage cannot be read or written.
    pub fn toggle(&self, id: &ProductId) -> Result<bool, StorageError> {
        let mut ids = self.list()?;
        let added = if let Some(pos) = ids.iter().position(|fav| fav == id) {
            ids.remove(pos);
            false
        } else {
            ids.push(id.clone());
            true
        };
        self.save(&ids)?;
        debug!(product = %id, added, "Favorite toggled");
        Ok(added)
    }

    /// Forget every favorite.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(FAVORITES_KEY)
    }

    /// The favorite products among `products`, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage cannot be read.
    pub fn select<'a>(&self, products: &'a [Product]) -> Result<Vec<&'a Product>, StorageError> {
        let ids = self.list()?;
        Ok(products.iter().filter(|p| ids.contains(&p.id)).collect())
    }

    fn save(&self, ids: &[ProductId]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(ids)?;
        self.storage.set(FAVORITES_KEY, &raw)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use motoshop_api::MemoryStorage;

    use super::*;

    fn favorites() -> (Favorites, Arc<dyn Storage>) {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        (Favorites::new(Arc::clone(&storage)), storage)
    }

    fn product(id: &str) -> Product {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "nombre": "Casco",
            "precio": "100",
            "categoria": "protecciones",
            "imagen": "https://x.com/c.jpg",
            "marca": "Shoei",
            "modelo": "GT",
            "descripcion": "Casco integral"
        }))
        .unwrap()
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let (favs, storage) = favorites();
        let id = ProductId::new("p1");

        assert!(favs.toggle(&id).unwrap());
        assert!(favs.contains(&id).unwrap());
        assert_eq!(storage.get(FAVORITES_KEY).unwrap().as_deref(), Some(r#"["p1"]"#));

        assert!(!favs.toggle(&id).unwrap());
        assert!(!favs.contains(&id).unwrap());
        assert!(favs.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let (favs, _) = favorites();
        for id in ["p3", "p1", "p2"] {
            favs.toggle(&ProductId::new(id)).unwrap();
        }
        let ids: Vec<String> = favs.list().unwrap().into_iter().map(String::from).collect();
        assert_eq!(ids, ["p3", "p1", "p2"]);
    }

    #[test]
    fn test_unreadable_value_reads_as_empty() {
        let (favs, storage) = favorites();
        storage.set(FAVORITES_KEY, "{not json").unwrap();
        assert!(favs.list().unwrap().is_empty());
        assert!(favs.toggle(&ProductId::new("p1")).unwrap());
        assert_eq!(favs.list().unwrap().len(), 1);
    }

    #[test]
    fn test_select_and_clear() {
        let (favs, _) = favorites();
        favs.toggle(&ProductId::new("p2")).unwrap();
        let products = vec![product("p1"), product("p2"), product("p3")];

        let selected = favs.select(&products).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id.as_str(), "p2");

        favs.clear().unwrap();
        assert!(favs.select(&products).unwrap().is_empty());
    }
}
