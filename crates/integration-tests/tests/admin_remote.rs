//! Admin view-models driving the remote adapters against a mocked backend.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::Utc;
use motoshop_admin::testing::{FixedConfirm, Notice, RecordingNotifier};
use motoshop_admin::{
    AdminDashboard, Confirm, EntityStore, Notifier, Outcome, ProductEditor, RemoteProducts,
    RemoteUsers, StoreError, SubmitOutcome, USER_CREATE_REFUSED, UserModerator,
};
use motoshop_api::UNREACHABLE_MESSAGE;
use motoshop_core::schemas::{ProductField, UserUpdate};
use motoshop_core::{ProductId, UserId};
use motoshop_integration_tests::{
    api_path, client_for, product_json, unreachable_client, user_json,
};
use motoshop_storefront::CatalogService;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn editor(
    store: RemoteProducts,
    confirm: bool,
) -> (ProductEditor<RemoteProducts>, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let editor = ProductEditor::new(
        Arc::new(store),
        Arc::new(FixedConfirm::new(confirm)) as Arc<dyn Confirm>,
        Arc::clone(&notifier) as Arc<dyn Notifier>,
    );
    (editor, notifier)
}

fn fill(editor: &mut ProductEditor<RemoteProducts>) {
    editor.open_create();
    editor.set(ProductField::Name, "MT-07");
    editor.set(ProductField::Price, "5000");
    editor.set(ProductField::Category, "motocicletas");
    editor.set(ProductField::Image, "https://cdn.example.com/moto.jpg");
    editor.set(ProductField::Brand, "Yamaha");
    editor.set(ProductField::Model, "MT-07");
    editor.set(ProductField::Description, "Moto en buen estado");
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
async fn test_create_product_invalidates_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/productos")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("/productos")))
        .and(body_partial_json(json!({
            "nombre": "MT-07",
            "precio": "5000",
            "categoria": "motocicletas"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(product_json(
            "p9", "MT-07", "5000", false,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let catalog = CatalogService::new(&client);
    assert!(catalog.all().await.unwrap().is_empty());

    let store = RemoteProducts::new(&client).with_catalog(catalog.clone());
    let (mut editor, notifier) = editor(store, true);
    fill(&mut editor);
    assert_eq!(editor.submit().await, SubmitOutcome::Saved);
    assert_eq!(
        notifier.last(),
        Some(Notice::Success("Producto agregado correctamente".into()))
    );

    // The write dropped the cached listing, so this fetches again.
    catalog.all().await.unwrap();
}

#[tokio::test]
async fn test_backend_rejection_is_shown_and_draft_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/productos")))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "mensaje": "El producto ya existe" })),
        )
        .mount(&server)
        .await;

    let (mut editor, notifier) = editor(RemoteProducts::new(&client_for(&server)), true);
    fill(&mut editor);
    assert_eq!(editor.submit().await, SubmitOutcome::Rejected);
    assert_eq!(
        notifier.last(),
        Some(Notice::Error("Error: El producto ya existe".into()))
    );
    assert_eq!(editor.form().draft().name, "MT-07");
}

#[tokio::test]
async fn test_unreachable_backend_is_reported() {
    let (mut editor, notifier) = editor(RemoteProducts::new(&unreachable_client()), true);
    fill(&mut editor);
    assert_eq!(editor.submit().await, SubmitOutcome::Failed);
    assert_eq!(notifier.last(), Some(Notice::Error(UNREACHABLE_MESSAGE.into())));
    assert!(!editor.form().is_submitting());
}

#[tokio::test]
async fn test_delete_product_only_after_confirmation() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(api_path("/productos/p1")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "mensaje": "Producto eliminado" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let (declined, _) = editor(RemoteProducts::new(&client), false);
    assert!(!declined.delete(&ProductId::new("p1")).await);

    let (confirmed, notifier) = editor(RemoteProducts::new(&client), true);
    assert!(confirmed.delete(&ProductId::new("p1")).await);
    assert_eq!(
        notifier.last(),
        Some(Notice::Success("Producto eliminado correctamente".into()))
    );
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_moderation_calls_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/usuarios/u1/suspender")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "mensaje": "ok" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("/usuarios/u1/reactivar")))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "mensaje": "El usuario no está suspendido" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let notifier = Arc::new(RecordingNotifier::new());
    let moderator = UserModerator::new(
        Arc::new(RemoteUsers::new(&client_for(&server))),
        Arc::new(FixedConfirm::new(true)) as Arc<dyn Confirm>,
        Arc::clone(&notifier) as Arc<dyn Notifier>,
    );

    assert!(moderator.suspend(&UserId::new("u1")).await);
    assert!(!moderator.reactivate(&UserId::new("u1")).await);
    assert_eq!(
        notifier.notices(),
        vec![
            Notice::Success("Usuario suspendido correctamente".into()),
            Notice::Error("Error: El usuario no está suspendido".into()),
        ]
    );
}

#[tokio::test]
async fn test_remote_users_refuse_create() {
    let server = MockServer::start().await;
    let users = RemoteUsers::new(&client_for(&server));
    let update = UserUpdate {
        username: "nuevo_1".into(),
        email: "nuevo@example.com".parse().unwrap(),
        country: "Chile".into(),
        birth_date: "1990-01-01".parse().unwrap(),
    };
    assert_eq!(
        users.create(&update).await.unwrap(),
        Outcome::Rejected(USER_CREATE_REFUSED.into())
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_dashboard_sync_over_remote_directories() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/usuarios")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            user_json("1", "admin", None),
            user_json("2", "user", Some("2020-01-01T00:00:00Z")),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("/usuarios/suspendidos")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([user_json(
            "2",
            "user",
            Some("2020-01-01T00:00:00Z")
        )])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("/productos")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json("p1", "MT-07", "5000", true),
            product_json("p2", "CB500F", "4200.50", false),
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let notifier = Arc::new(RecordingNotifier::new());
    let mut dashboard = AdminDashboard::new(
        Arc::new(RemoteUsers::new(&client)),
        Arc::new(RemoteProducts::new(&client)),
        Arc::clone(&notifier) as Arc<dyn Notifier>,
    );

    assert!(dashboard.sync().await);
    assert_eq!(
        notifier.last(),
        Some(Notice::Success("Sincronizado: 2 usuarios y 2 productos".into()))
    );

    let users = dashboard.user_stats(Utc::now());
    assert_eq!(users.admins, 1);
    assert_eq!(users.suspended, 1);
    assert_eq!(users.suspended_long, 1);

    let catalog = dashboard.catalog_stats();
    assert_eq!(catalog.featured, 1);
    assert_eq!(catalog.total_value_display(), "9200.50");
}

#[tokio::test]
async fn test_dashboard_sync_failure_keeps_snapshot() {
    let notifier = Arc::new(RecordingNotifier::new());
    let client = unreachable_client();
    let mut dashboard = AdminDashboard::new(
        Arc::new(RemoteUsers::new(&client)),
        Arc::new(RemoteProducts::new(&client)),
        Arc::clone(&notifier) as Arc<dyn Notifier>,
    );

    assert!(!dashboard.sync().await);
    assert!(dashboard.users().is_empty());
    assert_eq!(
        notifier.last(),
        Some(Notice::Error(format!(
            "Error al sincronizar: {}",
            StoreError::Unreachable
        )))
    );
}
