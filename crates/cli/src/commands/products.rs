//! `motoshop products ...`: catalog management.

use std::path::Path;
use std::sync::Arc;

use motoshop_admin::{
    Confirm, EntityForm, Notifier, RemoteProducts, SubmitOutcome, TracingNotifier,
};
use motoshop_api::ApiConfig;
use motoshop_core::ProductId;
use motoshop_core::schemas::ProductDraft;
use motoshop_storefront::CatalogService;

use super::{CliError, TerminalConfirm, client, print_json, read_file};

/// Print the catalog.
pub async fn list(config: ApiConfig) -> Result<(), CliError> {
    let catalog = CatalogService::new(&client(config)?);
    print_json(catalog.all().await?.as_slice())
}

/// Create a product from the draft in `file`.
pub async fn create(config: ApiConfig, file: &Path) -> Result<(), CliError> {
    let draft: ProductDraft = serde_json::from_str(&read_file(file)?)?;
    let mut form = form(config)?;
    form.load(draft);

    match form.submit().await {
        SubmitOutcome::Saved => Ok(()),
        SubmitOutcome::Invalid => {
            print_json(form.errors())?;
            Err(CliError::Invalid(form.errors().len()))
        }
        _ => Err(CliError::NotApplied("Product was not created")),
    }
}

/// Delete a product after a terminal confirmation.
pub async fn delete(config: ApiConfig, id: String) -> Result<(), CliError> {
    if form(config)?.delete(&ProductId::new(id)).await {
        Ok(())
    } else {
        Err(CliError::NotApplied("Product was not deleted"))
    }
}

fn form(config: ApiConfig) -> Result<EntityForm<ProductDraft, RemoteProducts>, CliError> {
    let store = RemoteProducts::new(&client(config)?);
    Ok(EntityForm::new(
        Arc::new(store),
        Arc::new(TerminalConfirm) as Arc<dyn Confirm>,
        Arc::new(TracingNotifier) as Arc<dyn Notifier>,
    ))
}
