//! Product records.

use serde::{Deserialize, Serialize};

use crate::models::HasId;
use crate::types::{Category, Price, ProductId};

const fn default_in_stock() -> bool {
    true
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned id.
    #[serde(alias = "_id")]
    pub id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub price: Price,
    #[serde(rename = "categoria")]
    pub category: Category,
    /// Image URL.
    #[serde(rename = "imagen")]
    pub image: String,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "modelo")]
    pub model: String,
    /// Four-digit model year.
    #[serde(rename = "año", default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// Free-text mileage, e.g. `"15,000 km"`.
    #[serde(rename = "kilometros", default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<String>,
    #[serde(rename = "ubicacion", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "destacado", default)]
    pub featured: bool,
    #[serde(rename = "stock", default = "default_in_stock")]
    pub in_stock: bool,
}

impl HasId for Product {
    type Id = ProductId;

    fn id(&self) -> &ProductId {
        &self.id
    }
}

impl Product {
    /// Case-insensitive match of `term` against name, brand, model and
    /// description.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        [&self.name, &self.brand, &self.model, &self.description]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}
