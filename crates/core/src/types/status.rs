//! Enumerations shared by the catalog and the user directory.

use serde::{Deserialize, Serialize};

/// Product category.
///
/// The catalog only knows these five categories; anything else is rejected
/// by the product schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Motocicletas,
    Protecciones,
    Indumentaria,
    Accesorios,
    Repuestos,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 5] = [
        Self::Motocicletas,
        Self::Protecciones,
        Self::Indumentaria,
        Self::Accesorios,
        Self::Repuestos,
    ];

    /// Wire value of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Motocicletas => "motocicletas",
            Self::Protecciones => "protecciones",
            Self::Indumentaria => "indumentaria",
            Self::Accesorios => "accesorios",
            Self::Repuestos => "repuestos",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Motocicletas => "Motocicletas",
            Self::Protecciones => "Protecciones",
            Self::Indumentaria => "Indumentaria",
            Self::Accesorios => "Accesorios",
            Self::Repuestos => "Repuestos",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("invalid category: {s}"))
    }
}

/// User role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access to the admin panel.
    Admin,
    /// Regular storefront customer.
    #[default]
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Countries a user may declare, sorted alphabetically.
pub const ALLOWED_COUNTRIES: [&str; 22] = [
    "Argentina",
    "Bolivia",
    "Brasil",
    "Chile",
    "Colombia",
    "Costa Rica",
    "Cuba",
    "Ecuador",
    "El Salvador",
    "España",
    "Estados Unidos",
    "Guatemala",
    "Honduras",
    "México",
    "Nicaragua",
    "Panamá",
    "Paraguay",
    "Perú",
    "Puerto Rico",
    "República Dominicana",
    "Uruguay",
    "Venezuela",
];

/// Returns `true` if `country` is one of [`ALLOWED_COUNTRIES`].
#[must_use]
pub fn is_allowed_country(country: &str) -> bool {
    ALLOWED_COUNTRIES.contains(&country)
}
