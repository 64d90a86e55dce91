//! Order form schema.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::limits::{self, Entity, truncate};
use crate::models::Order;
use crate::validation::{Checker, TextRule, ValidationError};

use super::{Schema, form_fields};

form_fields! {
    /// Fields of the order form.
    OrderField for Entity::Order => {
        Title => "titulo",
        Description => "descripcion",
    }
}

static TITLE: LazyLock<TextRule> = LazyLock::new(|| {
    TextRule::new()
        .min_chars(1, "Título obligatorio")
        .max_chars_default(limits::order::TITLE)
});

static DESCRIPTION: LazyLock<TextRule> = LazyLock::new(|| {
    TextRule::new()
        .min_chars(1, "Descripción obligatoria")
        .max_chars_default(limits::order::DESCRIPTION)
});

/// Order form values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
}

/// Validated order payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderInput {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
}

impl OrderDraft {
    /// Seed a draft from an existing order, truncated to current limits.
    #[must_use]
    pub fn from_record(order: &Order) -> Self {
        Self {
            title: truncate(&order.title, limits::order::TITLE),
            description: truncate(&order.description, limits::order::DESCRIPTION),
        }
    }

    /// Store a typed value, truncated to the field's limit.
    pub fn set_text(&mut self, field: OrderField, value: &str) {
        match field {
            OrderField::Title => self.title = truncate(value, limits::order::TITLE),
            OrderField::Description => {
                self.description = truncate(value, limits::order::DESCRIPTION);
            }
        }
    }
}

impl Schema for OrderDraft {
    type Field = OrderField;
    type Output = OrderInput;

    fn validate(&self) -> Result<OrderInput, ValidationError<OrderField>> {
        let mut checker = Checker::new();
        let title = checker.text_value(OrderField::Title, &TITLE, &self.title);
        let description =
            checker.text_value(OrderField::Description, &DESCRIPTION, &self.description);

        let output = title
            .zip(description)
            .map(|(title, description)| OrderInput { title, description });
        checker.finish(output)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::limits::LimitedField;
    use crate::types::OrderId;

    fn draft(title: &str, description: &str) -> OrderDraft {
        OrderDraft {
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_valid_order() {
        let input = draft("Revisión", "Cambio de aceite").validate().unwrap();
        assert_eq!(input.title, "Revisión");
    }

    #[test]
    fn test_empty_title_only() {
        let errors = draft("", "algo").validate_fields().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![OrderField::Title]);
        assert_eq!(errors.get(OrderField::Title), Some("Título obligatorio"));
    }

    #[test]
    fn test_both_invalid() {
        let errors = draft("", &"x".repeat(151)).validate_fields().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(OrderField::Description), Some("Máximo 150 caracteres"));
    }

    #[test]
    fn test_from_record_truncates() {
        let order = Order {
            id: OrderId::new("1"),
            title: "t".repeat(80),
            description: "d".repeat(10),
            status: None,
        };
        let draft = OrderDraft::from_record(&order);
        assert_eq!(draft.title.chars().count(), 50);
        assert_eq!(draft.description, "d".repeat(10));
    }

    #[test]
    fn test_field_limits_match_registry() {
        assert_eq!(OrderField::Title.max_len(), Some(limits::order::TITLE));
        assert_eq!(
            OrderField::Description.max_len(),
            Some(limits::order::DESCRIPTION)
        );
    }
}
