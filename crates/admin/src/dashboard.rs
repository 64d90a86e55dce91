//! Admin dashboard: user and catalog statistics.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use motoshop_core::{Category, Product, Role, User};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, instrument};

use crate::ports::{Notifier, ProductDirectory, StoreError, UserDirectory};

/// Suspensions older than this many days are flagged.
pub const LONG_SUSPENSION_DAYS: i64 = 30;

/// Counts over the user directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub total: usize,
    pub admins: usize,
    pub regular: usize,
    pub suspended: usize,
    /// Suspended for more than [`LONG_SUSPENSION_DAYS`] days.
    pub suspended_long: usize,
}

impl UserStats {
    #[must_use]
    pub fn compute(users: &[User], suspended: &[User], now: DateTime<Utc>) -> Self {
        Self {
            total: users.len(),
            admins: users.iter().filter(|u| u.role == Role::Admin).count(),
            regular: users.iter().filter(|u| u.role == Role::User).count(),
            suspended: suspended.len(),
            suspended_long: suspended
                .iter()
                .filter(|u| u.suspended_days(now).is_some_and(|d| d > LONG_SUSPENSION_DAYS))
                .count(),
        }
    }
}

/// Counts and value of the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub featured: usize,
    pub in_stock: usize,
    pub by_category: BTreeMap<Category, usize>,
    /// Sum of all prices.
    pub total_value: Decimal,
}

impl CatalogStats {
    #[must_use]
    pub fn compute(products: &[Product]) -> Self {
        let mut by_category = BTreeMap::new();
        for product in products {
            *by_category.entry(product.category).or_insert(0) += 1;
        }
        Self {
            total: products.len(),
            featured: products.iter().filter(|p| p.featured).count(),
            in_stock: products.iter().filter(|p| p.in_stock).count(),
            by_category,
            total_value: products.iter().map(|p| p.price.amount()).sum(),
        }
    }

    /// Total value with two decimals, e.g. `"1234.50"`.
    #[must_use]
    pub fn total_value_display(&self) -> String {
        format!("{:.2}", self.total_value)
    }
}

/// Snapshot of the directories the dashboard reads.
pub struct AdminDashboard {
    users: Arc<dyn UserDirectory>,
    products: Arc<dyn ProductDirectory>,
    notifier: Arc<dyn Notifier>,
    all_users: Vec<User>,
    suspended: Vec<User>,
    catalog: Vec<Product>,
}

impl std::fmt::Debug for AdminDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminDashboard")
            .field("users", &self.all_users.len())
            .field("suspended", &self.suspended.len())
            .field("products", &self.catalog.len())
            .finish_non_exhaustive()
    }
}

impl AdminDashboard {
    #[must_use]
    pub fn new(
        users: Arc<dyn UserDirectory>,
        products: Arc<dyn ProductDirectory>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            users,
            products,
            notifier,
            all_users: Vec::new(),
            suspended: Vec::new(),
            catalog: Vec::new(),
        }
    }

    /// Reload users, suspended users and products.
    ///
    /// The previous snapshot is kept if any read fails.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if a directory cannot be read.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<(), StoreError> {
        let users = self.users.users().await?;
        let suspended = self.users.suspended().await?;
        let catalog = self.products.products().await?;
        info!(
            users = users.len(),
            suspended = suspended.len(),
            products = catalog.len(),
            "Dashboard loaded"
        );
        self.all_users = users;
        self.suspended = suspended;
        self.catalog = catalog;
        Ok(())
    }

    /// Reload and tell the user how it went. Returns whether it succeeded.
    pub async fn sync(&mut self) -> bool {
        match self.load().await {
            Ok(()) => {
                self.notifier.success(&format!(
                    "Sincronizado: {} usuarios y {} productos",
                    self.all_users.len(),
                    self.catalog.len()
                ));
                true
            }
            Err(e) => {
                self.notifier.error(&format!("Error al sincronizar: {e}"));
                false
            }
        }
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.all_users
    }

    #[must_use]
    pub fn suspended_users(&self) -> &[User] {
        &self.suspended
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.catalog
    }

    #[must_use]
    pub fn user_stats(&self, now: DateTime<Utc>) -> UserStats {
        UserStats::compute(&self.all_users, &self.suspended, now)
    }

    #[must_use]
    pub fn catalog_stats(&self) -> CatalogStats {
        CatalogStats::compute(&self.catalog)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone};
    use motoshop_core::UserId;
    use serde_json::json;

    use super::*;
    use crate::testing::{MemoryProducts, MemoryUsers, Notice, RecordingNotifier};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
    }

    fn user(id: &str, role: Role, suspended_days_ago: Option<i64>) -> User {
        User {
            id: UserId::new(id),
            username: format!("user_{id}"),
            email: format!("u{id}@example.com"),
            country: "Chile".to_string(),
            birth_date: None,
            role,
            suspended_at: suspended_days_ago.map(|d| now() - Duration::days(d)),
        }
    }

    fn product(id: &str, price: &str, category: &str, featured: bool, stock: bool) -> Product {
        serde_json::from_value(json!({
            "_id": id,
            "nombre": "Producto",
            "precio": price,
            "categoria": category,
            "imagen": "https://x.com/a.jpg",
            "marca": "Marca",
            "modelo": "Modelo",
            "descripcion": "Descripción",
            "destacado": featured,
            "stock": stock
        }))
        .unwrap()
    }

    #[test]
    fn test_user_stats() {
        let users = vec![
            user("1", Role::Admin, None),
            user("2", Role::User, None),
            user("3", Role::User, Some(31)),
            user("4", Role::User, Some(30)),
        ];
        let suspended: Vec<User> = users.iter().filter(|u| u.is_suspended()).cloned().collect();

        let stats = UserStats::compute(&users, &suspended, now());
        assert_eq!(
            stats,
            UserStats {
                total: 4,
                admins: 1,
                regular: 3,
                suspended: 2,
                suspended_long: 1,
            }
        );
    }

    #[test]
    fn test_catalog_stats() {
        let products = vec![
            product("1", "999.99", "motocicletas", true, true),
            product("2", "100.50", "protecciones", false, false),
            product("3", "0", "protecciones", true, true),
        ];
        let stats = CatalogStats::compute(&products);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.featured, 2);
        assert_eq!(stats.in_stock, 2);
        assert_eq!(stats.by_category.get(&Category::Protecciones), Some(&2));
        assert_eq!(stats.by_category.get(&Category::Repuestos), None);
        assert_eq!(stats.total_value_display(), "1100.49");
    }

    #[test]
    fn test_empty_catalog_value() {
        assert_eq!(CatalogStats::compute(&[]).total_value_display(), "0.00");
    }

    #[tokio::test]
    async fn test_sync_loads_and_notifies() {
        let users = Arc::new(MemoryUsers::new(vec![
            user("1", Role::Admin, None),
            user("2", Role::User, Some(40)),
        ]));
        let products = Arc::new(MemoryProducts::new(vec![product(
            "1",
            "10",
            "accesorios",
            false,
            true,
        )]));
        let notifier = Arc::new(RecordingNotifier::new());
        let mut dashboard = AdminDashboard::new(users, products, Arc::clone(&notifier) as Arc<dyn Notifier>);

        assert!(dashboard.sync().await);
        assert_eq!(dashboard.users().len(), 2);
        assert_eq!(dashboard.suspended_users().len(), 1);
        assert_eq!(dashboard.products().len(), 1);
        assert_eq!(dashboard.user_stats(now()).suspended, 1);
        assert_eq!(dashboard.catalog_stats().total, 1);
        assert_eq!(
            notifier.last(),
            Some(Notice::Success("Sincronizado: 2 usuarios y 1 productos".into()))
        );
    }
}
