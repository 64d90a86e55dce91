//! Field-limit registry.
//!
//! Single source of truth for the maximum length of every free-text field.
//! Input masking in the view-models truncates against these numbers and the
//! schemas bound their max-length rules with the same constants, so the two
//! can never disagree. Lengths count Unicode scalar values.

/// Limits for product fields.
pub mod product {
    pub const NAME: usize = 20;
    pub const PRICE: usize = 15;
    pub const IMAGE: usize = 100;
    pub const BRAND: usize = 20;
    pub const MODEL: usize = 20;
    pub const YEAR: usize = 4;
    pub const MILEAGE: usize = 20;
    pub const LOCATION: usize = 60;
    pub const DESCRIPTION: usize = 150;
}

/// Limits for order fields.
pub mod order {
    pub const TITLE: usize = 50;
    pub const DESCRIPTION: usize = 150;
}

/// Limits for user fields.
pub mod user {
    pub const USERNAME: usize = 20;
    /// Shared by registration, user edit, recovery and the login credential.
    pub const EMAIL: usize = 100;
    pub const PASSWORD: usize = 50;
}

/// Entities covered by the registry, keyed by their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Product,
    Order,
    User,
}

impl Entity {
    /// Wire name of the entity (`producto`, `pedido`, `usuario`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "producto",
            Self::Order => "pedido",
            Self::User => "usuario",
        }
    }

    /// Field limits registered for this entity, in form order.
    #[must_use]
    pub const fn fields(self) -> &'static [(&'static str, usize)] {
        match self {
            Self::Product => &[
                ("nombre", product::NAME),
                ("precio", product::PRICE),
                ("imagen", product::IMAGE),
                ("marca", product::BRAND),
                ("modelo", product::MODEL),
                ("año", product::YEAR),
                ("kilometros", product::MILEAGE),
                ("ubicacion", product::LOCATION),
                ("descripcion", product::DESCRIPTION),
            ],
            Self::Order => &[
                ("titulo", order::TITLE),
                ("descripcion", order::DESCRIPTION),
            ],
            Self::User => &[
                ("nombreDeUsuario", user::USERNAME),
                ("email", user::EMAIL),
                ("contrasena", user::PASSWORD),
            ],
        }
    }

    /// All registered entities.
    pub const ALL: [Self; 3] = [Self::Product, Self::Order, Self::User];
}

impl std::str::FromStr for Entity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| format!("unknown entity: {s}"))
    }
}

/// Lookup over the registry by wire names.
pub struct FieldLimits;

impl FieldLimits {
    /// Maximum length for `field` of `entity`, if that field is limited.
    #[must_use]
    pub fn lookup(entity: &str, field: &str) -> Option<usize> {
        let entity = entity.parse::<Entity>().ok()?;
        Self::of(entity, field)
    }

    /// Maximum length for `field` of a typed `entity`.
    #[must_use]
    pub fn of(entity: Entity, field: &str) -> Option<usize> {
        entity
            .fields()
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, max)| *max)
    }
}

/// A form field that may carry a registry limit.
pub trait LimitedField: Copy {
    /// Registry entity the field belongs to.
    const ENTITY: Entity;

    /// Wire name of the field.
    fn as_str(self) -> &'static str;

    /// Maximum length, or `None` for unbounded / non-text fields.
    fn max_len(self) -> Option<usize> {
        FieldLimits::of(Self::ENTITY, self.as_str())
    }
}

/// Truncate `value` to at most `max` characters.
///
/// Idempotent: truncating an already truncated value is a no-op.
#[must_use]
pub fn truncate(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((byte_idx, _)) => value.get(..byte_idx).unwrap_or(value).to_owned(),
        None => value.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_wire_names() {
        assert_eq!(FieldLimits::lookup("producto", "nombre"), Some(20));
        assert_eq!(FieldLimits::lookup("producto", "año"), Some(4));
        assert_eq!(FieldLimits::lookup("pedido", "titulo"), Some(50));
        assert_eq!(FieldLimits::lookup("usuario", "email"), Some(100));
        assert_eq!(FieldLimits::lookup("producto", "categoria"), None);
        assert_eq!(FieldLimits::lookup("carrito", "nombre"), None);
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("Año nuevo", 3), "Año");
        assert_eq!(truncate("corto", 10), "corto");
        assert_eq!(truncate("", 0), "");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_truncate_idempotent() {
        let samples = ["", "MT-07", "Descripción con ñ y acentos áéí", "x".repeat(200).as_str()]
            .map(str::to_owned);
        for sample in &samples {
            for max in [0, 1, 4, 20, 150] {
                let once = truncate(sample, max);
                assert_eq!(truncate(&once, max), once);
                assert!(once.chars().count() <= max);
            }
        }
    }
}
