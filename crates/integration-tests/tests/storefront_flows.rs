//! Storefront flows against a mocked backend.

#![allow(clippy::unwrap_used)]

use motoshop_core::schemas::{LoginDraft, LoginField, RecoveryDraft};
use motoshop_core::{Category, ProductId};
use motoshop_integration_tests::{api_path, client_for, product_json, user_json};
use motoshop_storefront::{AccountError, AccountService, CartError, CartService, CatalogService};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Account
// ============================================================================

#[tokio::test]
async fn test_login_stores_token_and_logout_clears_it() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/login")))
        .and(body_json(json!({ "credencial": "rider_1", "contrasena": "Moto#2024" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-123",
            "usuario": user_json("1", "user", None),
            "mensaje": "Bienvenido"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("/auth/perfil")))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("1", "user", None)))
        .expect(1)
        .mount(&server)
        .await;

    let account = AccountService::new(&client_for(&server));
    assert!(!account.is_authenticated());

    let session = account
        .login(&LoginDraft {
            credential: "rider_1".into(),
            password: "Moto#2024".into(),
        })
        .await
        .unwrap();
    assert_eq!(session.user.unwrap().username, "rider_1");
    assert!(account.is_authenticated());

    let profile = account.profile().await.unwrap();
    assert_eq!(profile.email, "rider1@example.com");

    account.logout().unwrap();
    assert!(!account.is_authenticated());
}

#[tokio::test]
async fn test_invalid_login_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/login")))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let account = AccountService::new(&client_for(&server));
    let err = account
        .login(&LoginDraft {
            credential: String::new(),
            password: String::new(),
        })
        .await
        .unwrap_err();

    let errors = err.field_errors().unwrap();
    assert!(errors.contains(LoginField::Credential));
    assert!(errors.contains(LoginField::Password));
}

#[tokio::test]
async fn test_recovery_rejection_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/recuperar")))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "mensaje": "Email no registrado" })),
        )
        .mount(&server)
        .await;

    let account = AccountService::new(&client_for(&server));
    let err = account
        .recover(&RecoveryDraft {
            email: "nadie@example.com".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(&err, AccountError::Api(e) if e.to_string() == "Email no registrado"));
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_cart_add_defaults_to_one_unit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/carrito")))
        .and(body_json(json!({ "productoId": "p1", "cantidad": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "_id": "i1", "productoId": "p1", "cantidad": 1 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cart = CartService::new(&client_for(&server));
    let updated = cart.add(&ProductId::new("p1"), None).await.unwrap();
    assert_eq!(updated.item_count(), 1);
    assert_eq!(updated.items[0].product.id(), &ProductId::new("p1"));

    let err = cart.add(&ProductId::new("p1"), Some(0)).await.unwrap_err();
    assert!(matches!(err, CartError::InvalidQuantity));
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn test_catalog_is_cached_until_invalidated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/productos")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json("p1", "MT-07", "5000", true),
            product_json("p2", "CB500F", "4200", false),
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let catalog = CatalogService::new(&client_for(&server));
    assert_eq!(catalog.all().await.unwrap().len(), 2);
    assert_eq!(catalog.featured().await.unwrap().len(), 1);
    assert_eq!(
        catalog.by_category(Category::Motocicletas).await.unwrap().len(),
        2
    );
    assert_eq!(catalog.search("cb500").await.unwrap()[0].id, ProductId::new("p2"));

    // A product from the cached listing needs no extra request.
    let product = catalog.product(&ProductId::new("p1")).await.unwrap();
    assert_eq!(product.name, "MT-07");

    catalog.invalidate();
    assert_eq!(catalog.all().await.unwrap().len(), 2);
}
