//! Order form and the in-memory order book it works against.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use motoshop_core::schemas::{OrderDraft, OrderField, OrderInput};
use motoshop_core::{Order, OrderId, timestamp_id};
use tracing::debug;

use crate::form::{Draft, EntityForm, FieldValue, FormMessages};
use crate::ports::{EntityStore, Outcome, StoreError};

impl Draft for OrderDraft {
    type Record = Order;

    const MESSAGES: FormMessages = FormMessages {
        created: "Pedido agregado correctamente",
        updated: "Pedido actualizado correctamente",
        deleted: "Pedido eliminado correctamente",
        confirm_delete_title: "¿Estás seguro de eliminar este pedido?",
        confirm_delete_text: "Esta acción no se puede deshacer.",
    };

    fn from_record(record: &Order) -> Self {
        Self::from_record(record)
    }

    fn set(&mut self, field: OrderField, value: FieldValue) -> bool {
        match value {
            FieldValue::Text(text) => {
                self.set_text(field, &text);
                true
            }
            FieldValue::Flag(_) => false,
        }
    }
}

/// Order create/edit form.
pub type OrderForm<S = LocalOrderBook> = EntityForm<OrderDraft, S>;

const NOT_FOUND: &str = "Pedido no encontrado";

/// Orders kept in memory with timestamp-based ids.
#[derive(Debug, Default)]
pub struct LocalOrderBook {
    orders: Mutex<Vec<Order>>,
}

impl LocalOrderBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Orders in creation order.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EntityStore for LocalOrderBook {
    type Record = Order;
    type Input = OrderInput;

    async fn create(&self, input: &OrderInput) -> Result<Outcome<Option<Order>>, StoreError> {
        let mut orders = self.orders.lock().unwrap_or_else(PoisonError::into_inner);
        let id = fresh_id(orders.iter().map(|o| o.id.as_str()));
        let order = Order {
            id: OrderId::new(id),
            title: input.title.clone(),
            description: input.description.clone(),
            status: None,
        };
        debug!(id = %order.id, "Order added");
        orders.push(order.clone());
        Ok(Outcome::Accepted(Some(order)))
    }

    async fn update(&self, id: &OrderId, input: &OrderInput) -> Result<Outcome, StoreError> {
        let mut orders = self.orders.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(order) = orders.iter_mut().find(|o| &o.id == id) else {
            return Ok(Outcome::Rejected(NOT_FOUND.to_string()));
        };
        order.title.clone_from(&input.title);
        order.description.clone_from(&input.description);
        Ok(Outcome::Accepted(()))
    }

    async fn delete(&self, id: &OrderId) -> Result<Outcome, StoreError> {
        let mut orders = self.orders.lock().unwrap_or_else(PoisonError::into_inner);
        let before = orders.len();
        orders.retain(|o| &o.id != id);
        if orders.len() < before {
            Ok(Outcome::Accepted(()))
        } else {
            Ok(Outcome::Rejected(NOT_FOUND.to_string()))
        }
    }
}

/// A timestamp id not already in `taken`.
///
/// Two records created within the same millisecond get consecutive ids.
pub(crate) fn fresh_id<'a>(taken: impl Iterator<Item = &'a str>) -> String {
    let now = Utc::now();
    match taken.filter_map(|id| id.parse::<i64>().ok()).max() {
        Some(latest) if latest >= now.timestamp_millis() => (latest + 1).to_string(),
        _ => timestamp_id(now),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::form::{FormMode, FormPhase, SUBMIT_INTERRUPTED, SubmitOutcome};
    use crate::ports::{Confirm, Notifier};
    use crate::testing::{FixedConfirm, Notice, RecordingNotifier, ScriptedStore, StoreCall};

    fn form<S>(store: &Arc<S>, notifier: &Arc<RecordingNotifier>) -> OrderForm<S>
    where
        S: EntityStore<Record = Order, Input = OrderInput>,
    {
        OrderForm::new(
            Arc::clone(store),
            Arc::new(FixedConfirm::new(true)) as Arc<dyn Confirm>,
            Arc::clone(notifier) as Arc<dyn Notifier>,
        )
    }

    #[tokio::test]
    async fn test_missing_title_is_a_no_op() {
        let store = Arc::new(ScriptedStore::<Order, OrderInput>::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let mut form = form(&store, &notifier);
        form.open(FormMode::Create);
        form.set(OrderField::Title, "");
        form.set(OrderField::Description, "algo");

        assert_eq!(form.submit().await, SubmitOutcome::Invalid);
        assert_eq!(
            form.errors().fields().collect::<Vec<_>>(),
            vec![OrderField::Title]
        );
        assert!(store.calls().is_empty());
        assert!(notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn test_create_edit_delete_in_local_book() {
        let book = Arc::new(LocalOrderBook::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let mut form = form(&book, &notifier);

        form.open(FormMode::Create);
        form.set(OrderField::Title, "Revisión");
        form.set(OrderField::Description, "Cambio de aceite");
        assert_eq!(form.submit().await, SubmitOutcome::Saved);

        form.open(FormMode::Create);
        form.set(OrderField::Title, "Neumáticos");
        form.set(OrderField::Description, "Par trasero");
        assert_eq!(form.submit().await, SubmitOutcome::Saved);

        let orders = book.orders();
        assert_eq!(orders.len(), 2);
        assert_ne!(orders[0].id, orders[1].id);

        form.open(FormMode::Edit(orders[0].clone()));
        assert_eq!(form.draft().title, "Revisión");
        form.set(OrderField::Title, "Revisión anual");
        assert_eq!(form.submit().await, SubmitOutcome::Saved);
        assert_eq!(book.orders()[0].title, "Revisión anual");
        assert_eq!(form.phase(), FormPhase::Idle);

        assert!(form.delete(&orders[1].id).await);
        assert_eq!(book.len(), 1);
        assert_eq!(
            notifier.last(),
            Some(Notice::Success("Pedido eliminado correctamente".into()))
        );
    }

    #[tokio::test]
    async fn test_loaded_draft_is_validated_untruncated() {
        let book = Arc::new(LocalOrderBook::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let mut form = form(&book, &notifier);

        form.load(OrderDraft {
            title: "t".repeat(51),
            description: "Cambio de aceite".into(),
        });
        assert_eq!(form.submit().await, SubmitOutcome::Invalid);
        assert!(form.errors().contains(OrderField::Title));
        assert!(book.is_empty());

        form.load(OrderDraft {
            title: "Revisión".into(),
            description: "Cambio de aceite".into(),
        });
        assert_eq!(form.submit().await, SubmitOutcome::Saved);
        assert_eq!(book.len(), 1);
    }

    /// Store whose create and update never answer.
    struct Stalled;

    #[async_trait]
    impl EntityStore for Stalled {
        type Record = Order;
        type Input = OrderInput;

        async fn create(&self, _: &OrderInput) -> Result<Outcome<Option<Order>>, StoreError> {
            std::future::pending().await
        }

        async fn update(&self, _: &OrderId, _: &OrderInput) -> Result<Outcome, StoreError> {
            std::future::pending().await
        }

        async fn delete(&self, _: &OrderId) -> Result<Outcome, StoreError> {
            Ok(Outcome::Accepted(()))
        }
    }

    #[tokio::test]
    async fn test_abandoned_submit_returns_to_editing() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut form = form(&Arc::new(Stalled), &notifier);
        form.open(FormMode::Create);
        form.set(OrderField::Title, "Revisión");
        form.set(OrderField::Description, "Cambio de aceite");

        let waited = tokio::time::timeout(Duration::from_millis(50), form.submit()).await;
        assert!(waited.is_err());

        assert_eq!(form.phase(), FormPhase::Editing);
        assert!(!form.is_submitting());
        assert_eq!(form.draft().title, "Revisión");
        assert_eq!(
            notifier.notices(),
            vec![Notice::Error(SUBMIT_INTERRUPTED.into())]
        );

        assert!(form.set(OrderField::Title, "Revisión anual"));
        assert_eq!(form.draft().title, "Revisión anual");
    }

    #[tokio::test]
    async fn test_unknown_order() {
        let book = LocalOrderBook::new();
        let input = OrderInput {
            title: "x".into(),
            description: "y".into(),
        };
        let id = OrderId::new("404");
        assert_eq!(
            book.update(&id, &input).await.unwrap(),
            Outcome::Rejected(NOT_FOUND.into())
        );
        assert_eq!(
            book.delete(&id).await.unwrap(),
            Outcome::Rejected(NOT_FOUND.into())
        );
    }

    #[test]
    fn test_edit_truncates_long_record() {
        let order = Order {
            id: OrderId::new("1"),
            title: "t".repeat(80),
            description: "d".repeat(200),
            status: None,
        };
        let draft = <OrderDraft as Draft>::from_record(&order);
        assert_eq!(draft.title.len(), 50);
        assert_eq!(draft.description.len(), 150);
    }

    #[test]
    fn test_fresh_id_skips_taken() {
        let far_future = "99999999999999";
        let id = fresh_id([far_future].into_iter());
        assert_eq!(id, "100000000000000");
        let id = fresh_id(["abc"].into_iter());
        assert!(id.parse::<i64>().is_ok());
    }

    #[tokio::test]
    async fn test_scripted_store_sees_order_payload() {
        let store = Arc::new(ScriptedStore::<Order, OrderInput>::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let mut form = form(&store, &notifier);
        form.open(FormMode::Create);
        form.set(OrderField::Title, "Revisión");
        form.set(OrderField::Description, "Cambio de aceite");
        form.submit().await;
        assert!(matches!(
            &store.calls()[0],
            StoreCall::Create(body) if body["titulo"] == "Revisión"
        ));
    }
}
