//! Product editor.

use std::sync::Arc;

use motoshop_core::schemas::{ProductDraft, ProductField, ProductInput};
use motoshop_core::{Product, ProductId};

use crate::form::{Draft, EntityForm, FieldValue, FormMessages, FormMode, SubmitOutcome};
use crate::ports::{Confirm, EntityStore, Notifier};

impl Draft for ProductDraft {
    type Record = Product;

    const MESSAGES: FormMessages = FormMessages {
        created: "Producto agregado correctamente",
        updated: "Producto actualizado correctamente",
        deleted: "Producto eliminado correctamente",
        confirm_delete_title: "¿Estás seguro de eliminar este producto?",
        confirm_delete_text: "Esta acción no se puede deshacer.",
    };

    fn from_record(record: &Product) -> Self {
        Self::from_record(record)
    }

    fn set(&mut self, field: ProductField, value: FieldValue) -> bool {
        match value {
            FieldValue::Text(text) => self.set_text(field, &text),
            FieldValue::Flag(flag) => self.set_flag(field, flag),
        }
    }
}

/// Product form plus the image-preview state.
///
/// The preview flag is cosmetic: it never blocks a submission.
pub struct ProductEditor<S> {
    form: EntityForm<ProductDraft, S>,
    image_failed: bool,
}

impl<S> std::fmt::Debug for ProductEditor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductEditor")
            .field("form", &self.form)
            .field("image_failed", &self.image_failed)
            .finish()
    }
}

impl<S> ProductEditor<S>
where
    S: EntityStore<Record = Product, Input = ProductInput>,
{
    #[must_use]
    pub fn new(store: Arc<S>, confirm: Arc<dyn Confirm>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            form: EntityForm::new(store, confirm, notifier),
            image_failed: false,
        }
    }

    #[must_use]
    pub const fn form(&self) -> &EntityForm<ProductDraft, S> {
        &self.form
    }

    /// Whether the image preview failed to load.
    #[must_use]
    pub const fn image_failed(&self) -> bool {
        self.image_failed
    }

    /// Open an empty form.
    pub fn open_create(&mut self) {
        self.form.open(FormMode::Create);
        self.image_failed = false;
    }

    /// Open the form on an existing product.
    pub fn open_edit(&mut self, product: Product) {
        self.form.open(FormMode::Edit(product));
        self.image_failed = false;
    }

    pub fn close(&mut self) {
        self.form.close();
        self.image_failed = false;
    }

    /// Store a field value; a new image URL resets the preview flag.
    pub fn set(&mut self, field: ProductField, value: impl Into<FieldValue>) -> bool {
        let applied = self.form.set(field, value);
        if applied && field == ProductField::Image {
            self.image_failed = false;
        }
        applied
    }

    /// The preview could not load the image URL.
    pub const fn image_load_failed(&mut self) {
        self.image_failed = true;
    }

    /// The preview loaded the image URL.
    pub const fn image_loaded(&mut self) {
        self.image_failed = false;
    }

    /// Validate and save; a successful save closes the editor.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let outcome = self.form.submit().await;
        if outcome == SubmitOutcome::Saved {
            self.image_failed = false;
        }
        outcome
    }

    /// Confirm, then delete a product.
    pub async fn delete(&self, id: &ProductId) -> bool {
        self.form.delete(id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use motoshop_api::UNREACHABLE_MESSAGE;
    use motoshop_core::schemas::ProductField as F;
    use serde_json::json;

    use super::*;
    use crate::form::FormPhase;
    use crate::ports::{Outcome, StoreError};
    use crate::testing::{FixedConfirm, Notice, RecordingNotifier, ScriptedStore, StoreCall};

    type Store = ScriptedStore<Product, ProductInput>;

    struct Harness {
        editor: ProductEditor<Store>,
        store: Arc<Store>,
        confirm: Arc<FixedConfirm>,
        notifier: Arc<RecordingNotifier>,
    }

    fn harness(confirm: bool) -> Harness {
        let store = Arc::new(Store::new());
        let confirm = Arc::new(FixedConfirm::new(confirm));
        let notifier = Arc::new(RecordingNotifier::new());
        let editor = ProductEditor::new(
            Arc::clone(&store),
            Arc::clone(&confirm) as Arc<dyn Confirm>,
            Arc::clone(&notifier) as Arc<dyn Notifier>,
        );
        Harness {
            editor,
            store,
            confirm,
            notifier,
        }
    }

    fn fill_valid(editor: &mut ProductEditor<Store>) {
        editor.set(F::Name, "MT-07");
        editor.set(F::Price, "999.99");
        editor.set(F::Category, "motocicletas");
        editor.set(F::Image, "https://x.com/a.jpg");
        editor.set(F::Brand, "Yamaha");
        editor.set(F::Model, "MT-07");
        editor.set(F::Description, "Moto usada");
    }

    fn existing() -> Product {
        serde_json::from_value(json!({
            "_id": "p1",
            "nombre": "MT-07 con un nombre demasiado largo",
            "precio": "5000",
            "categoria": "motocicletas",
            "imagen": "https://x.com/a.jpg",
            "marca": "Yamaha",
            "modelo": "MT-07",
            "descripcion": "Moto usada",
            "destacado": true
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_sends_coerced_price_and_resets() {
        let mut h = harness(true);
        h.editor.open_create();
        fill_valid(&mut h.editor);

        assert_eq!(h.editor.submit().await, SubmitOutcome::Saved);

        let calls = h.store.calls();
        assert_eq!(calls.len(), 1);
        let StoreCall::Create(payload) = &calls[0] else {
            panic!("expected a create call, got {calls:?}");
        };
        assert_eq!(payload["precio"], "999.99");
        assert_eq!(payload["stock"], true);
        assert_eq!(
            h.notifier.last(),
            Some(Notice::Success("Producto agregado correctamente".into()))
        );
        assert_eq!(h.editor.form().phase(), FormPhase::Idle);
        assert_eq!(h.editor.form().draft(), &ProductDraft::default());
    }

    #[tokio::test]
    async fn test_invalid_draft_sends_nothing() {
        let mut h = harness(true);
        h.editor.open_create();
        fill_valid(&mut h.editor);
        h.editor.set(F::Price, "-5");

        assert_eq!(h.editor.submit().await, SubmitOutcome::Invalid);
        assert!(h.store.calls().is_empty());
        let errors = h.editor.form().errors();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![F::Price]);
        assert_eq!(h.editor.form().phase(), FormPhase::Editing);

        // Editing the field clears its message before the next submit.
        h.editor.set(F::Price, "10");
        assert!(h.editor.form().errors().is_empty());
    }

    #[tokio::test]
    async fn test_edit_seeds_truncated_draft_and_updates() {
        let mut h = harness(true);
        h.editor.open_edit(existing());
        assert_eq!(h.editor.form().draft().name.chars().count(), 20);
        assert!(h.editor.form().draft().featured);

        h.editor.set(F::Name, "MT-07 2023");
        assert_eq!(h.editor.submit().await, SubmitOutcome::Saved);

        let calls = h.store.calls();
        assert!(matches!(&calls[0], StoreCall::Update(id, body) if id == "p1" && body["nombre"] == "MT-07 2023"));
        assert_eq!(
            h.notifier.last(),
            Some(Notice::Success("Producto actualizado correctamente".into()))
        );
    }

    #[tokio::test]
    async fn test_rejection_keeps_draft() {
        let mut h = harness(true);
        h.store
            .respond_with(Ok(Outcome::Rejected("El producto ya existe".into())));
        h.editor.open_create();
        fill_valid(&mut h.editor);

        assert_eq!(h.editor.submit().await, SubmitOutcome::Rejected);
        assert_eq!(h.editor.form().phase(), FormPhase::Editing);
        assert_eq!(h.editor.form().draft().name, "MT-07");
        assert_eq!(
            h.notifier.last(),
            Some(Notice::Error("Error: El producto ya existe".into()))
        );
    }

    #[tokio::test]
    async fn test_unreachable_and_unexpected_failures() {
        let mut h = harness(true);
        h.editor.open_create();
        fill_valid(&mut h.editor);

        h.store.respond_with(Err(StoreError::Unreachable));
        assert_eq!(h.editor.submit().await, SubmitOutcome::Failed);
        assert_eq!(h.notifier.last(), Some(Notice::Error(UNREACHABLE_MESSAGE.into())));

        h.store
            .respond_with(Err(StoreError::Unexpected("respuesta inválida".into())));
        assert_eq!(h.editor.submit().await, SubmitOutcome::Failed);
        assert_eq!(
            h.notifier.last(),
            Some(Notice::Error("Error inesperado: respuesta inválida".into()))
        );
        assert!(!h.editor.form().is_submitting());
        assert_eq!(h.editor.form().draft().brand, "Yamaha");
    }

    #[tokio::test]
    async fn test_declined_delete_never_calls_store() {
        let h = harness(false);
        assert!(!h.editor.delete(&ProductId::new("p1")).await);
        assert!(h.store.calls().is_empty());
        assert!(h.notifier.notices().is_empty());
        assert_eq!(
            h.confirm.asked(),
            vec![(
                "¿Estás seguro de eliminar este producto?".to_string(),
                "Esta acción no se puede deshacer.".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_confirmed_delete() {
        let h = harness(true);
        assert!(h.editor.delete(&ProductId::new("p1")).await);
        assert_eq!(h.store.calls(), vec![StoreCall::Delete("p1".into())]);
        assert_eq!(
            h.notifier.last(),
            Some(Notice::Success("Producto eliminado correctamente".into()))
        );

        h.store
            .respond_with(Ok(Outcome::Rejected("No encontrado".into())));
        assert!(!h.editor.delete(&ProductId::new("p2")).await);
        assert_eq!(
            h.notifier.last(),
            Some(Notice::Error("Error: No encontrado".into()))
        );
    }

    #[test]
    fn test_image_flag() {
        let mut h = harness(true);
        h.editor.open_create();
        h.editor.image_load_failed();
        assert!(h.editor.image_failed());

        h.editor.set(F::Image, "https://x.com/b.jpg");
        assert!(!h.editor.image_failed());

        h.editor.image_load_failed();
        h.editor.image_loaded();
        assert!(!h.editor.image_failed());

        h.editor.image_load_failed();
        h.editor.close();
        assert!(!h.editor.image_failed());
    }

    #[tokio::test]
    async fn test_image_flag_does_not_block_submit() {
        let mut h = harness(true);
        h.editor.open_create();
        fill_valid(&mut h.editor);
        h.editor.image_load_failed();
        assert_eq!(h.editor.submit().await, SubmitOutcome::Saved);
    }

    #[test]
    fn test_field_masking() {
        let mut h = harness(true);
        h.editor.open_create();
        assert!(h.editor.set(F::Year, "20a23b9"));
        assert_eq!(h.editor.form().draft().year, "2023");
        assert!(h.editor.set(F::Featured, true));
        assert!(!h.editor.set(F::Featured, "si"));
        assert!(!h.editor.set(F::Name, false));
        assert!(h.editor.set(F::Name, "x".repeat(40)));
        assert_eq!(h.editor.form().draft().name.len(), 20);
    }
}
