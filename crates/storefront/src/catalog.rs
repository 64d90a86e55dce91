//! Product catalog with a short-lived cache.
//!
//! The full listing and single products are cached for 5 minutes. Writes
//! happen in the admin panel, which calls [`CatalogService::invalidate`]
//! afterwards so shoppers see the change immediately.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use motoshop_api::{ApiClient, ApiError, ProductsApi};
use motoshop_core::{Category, Product, ProductId};
use tracing::{debug, instrument};

/// Cache key for catalog reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Products,
    Product(ProductId),
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Products(Arc<Vec<Product>>),
    Product(Box<Product>),
}

// =============================================================================
// CatalogService
// =============================================================================

/// Read access to the product catalog.
#[derive(Clone)]
pub struct CatalogService {
    inner: Arc<CatalogServiceInner>,
}

struct CatalogServiceInner {
    products: ProductsApi,
    cache: Cache<CacheKey, CacheValue>,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("cached_entries", &self.inner.cache.entry_count())
            .finish_non_exhaustive()
    }
}

impl CatalogService {
    #[must_use]
    pub fn new(client: &ApiClient) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogServiceInner {
                products: client.products(),
                cache,
            }),
        }
    }

    /// Every product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the listing cannot be fetched.
    #[instrument(skip(self))]
    pub async fn all(&self) -> Result<Arc<Vec<Product>>, ApiError> {
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("Cache hit for product listing");
            return Ok(products);
        }

        let products = Arc::new(self.inner.products.list().await?);
        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(Arc::clone(&products)))
            .await;
        Ok(products)
    }

    /// One product, served from the cached listing when possible.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the product cannot be fetched.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let key = CacheKey::Product(id.clone());
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&CacheKey::Products).await
            && let Some(product) = products.iter().find(|p| &p.id == id)
        {
            debug!("Product found in cached listing");
            return Ok(product.clone());
        }

        let product = self.inner.products.get(id).await?;
        self.inner
            .cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    /// Products flagged as featured.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the listing cannot be fetched.
    pub async fn featured(&self) -> Result<Vec<Product>, ApiError> {
        Ok(featured(&self.all().await?))
    }

    /// Products in `category`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the listing cannot be fetched.
    pub async fn by_category(&self, category: Category) -> Result<Vec<Product>, ApiError> {
        Ok(in_category(&self.all().await?, category))
    }

    /// Products whose name, brand, model or description contain `term`,
    /// ignoring case. A blank term matches everything.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the listing cannot be fetched.
    pub async fn search(&self, term: &str) -> Result<Vec<Product>, ApiError> {
        Ok(search(&self.all().await?, term))
    }

    /// Drop every cached entry.
    pub fn invalidate(&self) {
        self.inner.cache.invalidate_all();
        debug!("Catalog cache invalidated");
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn featured(products: &[Product]) -> Vec<Product> {
    products.iter().filter(|p| p.featured).cloned().collect()
}

fn in_category(products: &[Product], category: Category) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.category == category)
        .cloned()
        .collect()
}

fn search(products: &[Product], term: &str) -> Vec<Product> {
    products.iter().filter(|p| p.matches(term)).cloned().collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn product(id: &str, name: &str, category: &str, featured: bool) -> Product {
        serde_json::from_value(json!({
            "_id": id,
            "nombre": name,
            "precio": "100",
            "categoria": category,
            "imagen": "https://x.com/a.jpg",
            "marca": "Yamaha",
            "modelo": "Base",
            "descripcion": "Producto de prueba",
            "destacado": featured
        }))
        .unwrap()
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("p1", "MT-07", "motocicletas", true),
            product("p2", "Casco Integral", "protecciones", false),
            product("p3", "Guantes", "indumentaria", true),
        ]
    }

    #[test]
    fn test_featured() {
        let ids: Vec<_> = featured(&catalog()).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ProductId::new("p1"), ProductId::new("p3")]);
    }

    #[test]
    fn test_in_category() {
        let found = in_category(&catalog(), Category::Protecciones);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Casco Integral");
        assert!(in_category(&catalog(), Category::Repuestos).is_empty());
    }

    #[test]
    fn test_search_ignores_case() {
        assert_eq!(search(&catalog(), "casco").len(), 1);
        assert_eq!(search(&catalog(), "YAMAHA").len(), 3);
        assert_eq!(search(&catalog(), "   ").len(), 3);
        assert!(search(&catalog(), "honda").is_empty());
    }
}
