//! `motoshop limits`: print the field-limit registry.

use motoshop_core::Entity;
use serde::Serialize;

use super::{CliError, print_json};

#[derive(Debug, Serialize)]
struct EntityLimits {
    entity: &'static str,
    fields: Vec<FieldLimit>,
}

#[derive(Debug, Serialize)]
struct FieldLimit {
    field: &'static str,
    max: usize,
}

fn registry() -> Vec<EntityLimits> {
    Entity::ALL
        .into_iter()
        .map(|entity| EntityLimits {
            entity: entity.as_str(),
            fields: entity
                .fields()
                .iter()
                .map(|&(field, max)| FieldLimit { field, max })
                .collect(),
        })
        .collect()
}

/// Print every entity's limits in form order.
pub fn print() -> Result<(), CliError> {
    print_json(&registry())
}
