//! Order records.

use serde::{Deserialize, Serialize};

use crate::models::HasId;
use crate::types::OrderId;

/// An order note kept by the admin panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Server id, or a timestamp-based id for locally created orders.
    #[serde(alias = "_id")]
    pub id: OrderId,
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    /// Fulfilment status reported by the server; local orders have none.
    #[serde(rename = "estado", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl HasId for Order {
    type Id = OrderId;

    fn id(&self) -> &OrderId {
        &self.id
    }
}
