//! Integration tests for Motoshop.
//!
//! Every test runs the real client stack against a `wiremock` server that
//! stands in for the backend, so no external service is needed:
//!
//! ```bash
//! cargo test -p motoshop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `api_transport` - Bearer header, 401 eviction, rejections, envelopes
//! - `storefront_flows` - Account, cart and catalog against the mock
//! - `admin_remote` - Admin view-models over the remote adapters

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use motoshop_api::{ApiClient, ApiConfig, MemoryStorage};
use serde_json::{Value, json};
use wiremock::MockServer;

/// Base path the mocked backend is mounted under.
pub const API_PREFIX: &str = "/api";

/// A client for `server` with fresh in-memory storage.
///
/// # Panics
///
/// Panics if the mock server URI is not a valid base URL.
#[must_use]
pub fn client_for(server: &MockServer) -> ApiClient {
    let config = ApiConfig::with_base_url(&format!("{}{API_PREFIX}", server.uri()))
        .expect("mock server URI is a valid base URL");
    ApiClient::with_storage(config, Arc::new(MemoryStorage::new()))
        .expect("HTTP client builds")
}

/// A client whose backend refuses connections.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn unreachable_client() -> ApiClient {
    let config = ApiConfig::with_base_url("http://127.0.0.1:9/api").expect("valid base URL");
    ApiClient::with_storage(config, Arc::new(MemoryStorage::new()))
        .expect("HTTP client builds")
}

/// `API_PREFIX` joined with `path`.
#[must_use]
pub fn api_path(path: &str) -> String {
    format!("{API_PREFIX}{path}")
}

/// Product body as the backend sends it.
#[must_use]
pub fn product_json(id: &str, name: &str, price: &str, featured: bool) -> Value {
    json!({
        "_id": id,
        "nombre": name,
        "precio": price,
        "categoria": "motocicletas",
        "imagen": "https://cdn.example.com/moto.jpg",
        "marca": "Yamaha",
        "modelo": "MT-07",
        "descripcion": "Moto en buen estado",
        "destacado": featured,
        "stock": true
    })
}

/// User body as the backend sends it.
#[must_use]
pub fn user_json(id: &str, role: &str, suspended_at: Option<&str>) -> Value {
    let mut user = json!({
        "_id": id,
        "nombreDeUsuario": format!("rider_{id}"),
        "email": format!("rider{id}@example.com"),
        "pais": "Chile",
        "fechaNacimiento": "1990-05-17T00:00:00.000Z",
        "role": role
    });
    if let (Some(at), Some(obj)) = (suspended_at, user.as_object_mut()) {
        obj.insert("fechaSuspension".to_string(), json!(at));
    }
    user
}
