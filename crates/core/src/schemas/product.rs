//! Product form schema.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::limits::{self, Entity, truncate};
use crate::models::Product;
use crate::types::{Category, Price, PriceError, PriceInput};
use crate::validation::{Checker, TextRule, ValidationError};

use super::{Schema, form_fields};

form_fields! {
    /// Fields of the product form.
    ProductField for Entity::Product => {
        Name => "nombre",
        Price => "precio",
        Category => "categoria",
        Image => "imagen",
        Brand => "marca",
        Model => "modelo",
        Year => "año",
        Mileage => "kilometros",
        Location => "ubicacion",
        Description => "descripcion",
        Featured => "destacado",
        InStock => "stock",
    }
}

static NAME_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9áéíóúÁÉÍÓÚñÑüÜ\s\-.,]+$").expect("Invalid regex")
});

static BRAND_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9áéíóúÁÉÍÓÚñÑüÜ\s\-]+$").expect("Invalid regex"));

static YEAR_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("Invalid regex"));

static MILEAGE_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[\d\s.,]+(\s*km)?$").expect("Invalid regex"));

static LOCATION_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑüÜ\s,]+$").expect("Invalid regex"));

static NAME: LazyLock<TextRule> = LazyLock::new(|| {
    TextRule::new()
        .min_chars(1, "Nombre obligatorio")
        .max_chars_default(limits::product::NAME)
        .pattern(
            &NAME_CHARS,
            "Solo letras, números, espacios, guiones, puntos y comas",
        )
});

static IMAGE: LazyLock<TextRule> = LazyLock::new(|| {
    TextRule::new()
        .min_chars(1, "URL obligatoria")
        .refine(is_url, "URL válida")
        .max_chars_default(limits::product::IMAGE)
});

static BRAND: LazyLock<TextRule> = LazyLock::new(|| {
    TextRule::new()
        .min_chars(1, "Marca obligatoria")
        .max_chars_default(limits::product::BRAND)
        .pattern(&BRAND_CHARS, "Solo letras, números, espacios y guiones")
});

static MODEL: LazyLock<TextRule> = LazyLock::new(|| {
    TextRule::new()
        .min_chars(1, "Modelo obligatorio")
        .max_chars_default(limits::product::MODEL)
        .pattern(&BRAND_CHARS, "Solo letras, números, espacios y guiones")
});

static YEAR: LazyLock<TextRule> = LazyLock::new(|| {
    TextRule::new()
        .max_chars_default(limits::product::YEAR)
        .refine(
            |v| YEAR_DIGITS.is_match(v.trim()),
            "Año: 4 dígitos (ej. 2023)",
        )
});

static MILEAGE: LazyLock<TextRule> = LazyLock::new(|| {
    TextRule::new()
        .max_chars_default(limits::product::MILEAGE)
        .refine(
            |v| MILEAGE_TEXT.is_match(v.trim()),
            "Solo números; puede incluir \" km\"",
        )
});

static LOCATION: LazyLock<TextRule> = LazyLock::new(|| {
    TextRule::new()
        .max_chars_default(limits::product::LOCATION)
        .refine(
            |v| LOCATION_CHARS.is_match(v.trim()),
            "Solo letras, espacios y comas",
        )
});

static DESCRIPTION: LazyLock<TextRule> = LazyLock::new(|| {
    TextRule::new()
        .min_chars(1, "Descripción obligatoria")
        .max_chars_default(limits::product::DESCRIPTION)
});

fn is_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

const fn default_in_stock() -> bool {
    true
}

/// Product form values as typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(rename = "precio", default)]
    pub price: PriceInput,
    /// Category wire value; empty until one is picked.
    #[serde(rename = "categoria", default)]
    pub category: String,
    #[serde(rename = "imagen", default)]
    pub image: String,
    #[serde(rename = "marca", default)]
    pub brand: String,
    #[serde(rename = "modelo", default)]
    pub model: String,
    #[serde(rename = "año", default)]
    pub year: String,
    #[serde(rename = "kilometros", default)]
    pub mileage: String,
    #[serde(rename = "ubicacion", default)]
    pub location: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "destacado", default)]
    pub featured: bool,
    #[serde(rename = "stock", default = "default_in_stock")]
    pub in_stock: bool,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: PriceInput::default(),
            category: String::new(),
            image: String::new(),
            brand: String::new(),
            model: String::new(),
            year: String::new(),
            mileage: String::new(),
            location: String::new(),
            description: String::new(),
            featured: false,
            in_stock: true,
        }
    }
}

/// Validated product payload sent on create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductInput {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub price: Price,
    #[serde(rename = "categoria")]
    pub category: Category,
    #[serde(rename = "imagen")]
    pub image: String,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "año", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(rename = "kilometros", skip_serializing_if = "Option::is_none")]
    pub mileage: Option<String>,
    #[serde(rename = "ubicacion", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "destacado")]
    pub featured: bool,
    #[serde(rename = "stock")]
    pub in_stock: bool,
}

impl ProductDraft {
    /// Seed a draft from an existing product.
    ///
    /// Free-text fields are truncated to the registry limits so a record
    /// saved under older, looser limits still fits the inputs.
    #[must_use]
    pub fn from_record(product: &Product) -> Self {
        let optional = |value: &Option<String>, max| truncate(value.as_deref().unwrap_or(""), max);
        Self {
            name: truncate(&product.name, limits::product::NAME),
            price: PriceInput::from(product.price),
            category: product.category.as_str().to_owned(),
            image: truncate(&product.image, limits::product::IMAGE),
            brand: truncate(&product.brand, limits::product::BRAND),
            model: truncate(&product.model, limits::product::MODEL),
            year: optional(&product.year, limits::product::YEAR),
            mileage: optional(&product.mileage, limits::product::MILEAGE),
            location: optional(&product.location, limits::product::LOCATION),
            description: truncate(&product.description, limits::product::DESCRIPTION),
            featured: product.featured,
            in_stock: product.in_stock,
        }
    }

    /// Store a typed value for a text field, truncated to its limit.
    ///
    /// The year input only keeps digits. Returns `false` for the boolean
    /// fields, which take [`Self::set_flag`] instead.
    pub fn set_text(&mut self, field: ProductField, value: &str) -> bool {
        let limited = |max| truncate(value, max);
        match field {
            ProductField::Name => self.name = limited(limits::product::NAME),
            ProductField::Price => {
                self.price = PriceInput::Text(limited(limits::product::PRICE));
            }
            ProductField::Category => self.category = value.to_owned(),
            ProductField::Image => self.image = limited(limits::product::IMAGE),
            ProductField::Brand => self.brand = limited(limits::product::BRAND),
            ProductField::Model => self.model = limited(limits::product::MODEL),
            ProductField::Year => {
                let digits: String = value.chars().filter(char::is_ascii_digit).collect();
                self.year = truncate(&digits, limits::product::YEAR);
            }
            ProductField::Mileage => self.mileage = limited(limits::product::MILEAGE),
            ProductField::Location => self.location = limited(limits::product::LOCATION),
            ProductField::Description => {
                self.description = limited(limits::product::DESCRIPTION);
            }
            ProductField::Featured | ProductField::InStock => return false,
        }
        true
    }

    /// Store a checkbox value. Returns `false` for text fields.
    pub const fn set_flag(&mut self, field: ProductField, value: bool) -> bool {
        match field {
            ProductField::Featured => self.featured = value,
            ProductField::InStock => self.in_stock = value,
            _ => return false,
        }
        true
    }
}

fn check_price(input: &PriceInput) -> Result<Price, Cow<'static, str>> {
    let price = match input {
        PriceInput::Number(n) => Price::from_f64(*n),
        PriceInput::Text(text) => {
            if text.chars().count() > limits::product::PRICE {
                return Err(format!("Máximo {} caracteres", limits::product::PRICE).into());
            }
            Price::parse(text)
        }
    };
    price.map_err(|e| match e {
        PriceError::NotANumber => "Debe ser un número".into(),
        PriceError::Negative => "El precio debe ser mayor o igual a 0".into(),
    })
}

/// Blank optional fields are omitted; anything else must pass `rule`.
fn optional_text(
    checker: &mut Checker<ProductField>,
    field: ProductField,
    rule: &TextRule,
    value: &str,
) -> Result<Option<String>, ()> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    if checker.text(field, rule, value) {
        Ok(Some(value.trim().to_owned()))
    } else {
        Err(())
    }
}

impl Schema for ProductDraft {
    type Field = ProductField;
    type Output = ProductInput;

    fn validate(&self) -> Result<ProductInput, ValidationError<ProductField>> {
        let mut checker = Checker::new();
        let name = checker.text_value(ProductField::Name, &NAME, &self.name);
        let price = checker.record(ProductField::Price, check_price(&self.price));
        let category = checker.record(
            ProductField::Category,
            self.category
                .parse::<Category>()
                .map_err(|_| "Seleccione una categoría válida"),
        );
        let image = checker.text_value(ProductField::Image, &IMAGE, &self.image);
        let brand = checker.text_value(ProductField::Brand, &BRAND, &self.brand);
        let model = checker.text_value(ProductField::Model, &MODEL, &self.model);
        let year = optional_text(&mut checker, ProductField::Year, &YEAR, &self.year);
        let mileage = optional_text(&mut checker, ProductField::Mileage, &MILEAGE, &self.mileage);
        let location =
            optional_text(&mut checker, ProductField::Location, &LOCATION, &self.location);
        let description =
            checker.text_value(ProductField::Description, &DESCRIPTION, &self.description);

        let output = (|| {
            Some(ProductInput {
                name: name?,
                price: price?,
                category: category?,
                image: image?,
                brand: brand?,
                model: model?,
                year: year.ok()?,
                mileage: mileage.ok()?,
                location: location.ok()?,
                description: description?,
                featured: self.featured,
                in_stock: self.in_stock,
            })
        })();
        checker.finish(output)
    }
}
