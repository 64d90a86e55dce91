//! Motoshop CLI - Terminal access to the Motoshop client stack.
//!
//! # Usage
//!
//! ```bash
//! # Print the field-limit registry
//! motoshop limits
//!
//! # Validate a product draft without sending it
//! motoshop validate product draft.json
//!
//! # Sign in (password from MOTOSHOP_PASSWORD or prompted)
//! motoshop login admin@example.com
//!
//! # Catalog and user management
//! motoshop products list
//! motoshop products create draft.json
//! motoshop products delete 64f1c2
//! motoshop users suspend 64f1c2
//! ```
//!
//! # Environment Variables
//!
//! See `motoshop_api::config` for the API settings. `SENTRY_DSN` enables
//! error reporting; `RUST_LOG` overrides the log filter.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use motoshop_api::ApiConfig;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::validate::FormKind;
use commands::CliError;

#[derive(Parser)]
#[command(name = "motoshop")]
#[command(author, version, about = "Motoshop CLI tools")]
struct Cli {
    /// Write logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the field-limit registry
    Limits,
    /// Validate a JSON draft and print its field errors
    Validate {
        /// Form the draft belongs to
        #[arg(value_enum)]
        form: FormKind,
        /// JSON file holding the draft
        file: std::path::PathBuf,
    },
    /// Sign in and store the session token
    Login {
        /// Email or username
        credential: String,
    },
    /// Manage the product catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Moderate registered users
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List every product
    List,
    /// Create a product from a JSON draft
    Create {
        /// JSON file holding the draft
        file: std::path::PathBuf,
    },
    /// Delete a product after confirmation
    Delete {
        /// Product id
        id: String,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List users
    List {
        /// Only suspended users
        #[arg(short, long)]
        suspended: bool,
    },
    /// Suspend a user
    Suspend {
        /// User id
        id: String,
    },
    /// Lift a user's suspension
    Reactivate {
        /// User id
        id: String,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(dsn: Option<&str>) -> Option<sentry::ClientInitGuard> {
    let dsn = dsn?;

    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Map tracing levels to Sentry: errors and warnings become events,
/// info and debug become breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configuration errors surface once logging is up
    let config = ApiConfig::from_env();
    let _sentry_guard = init_sentry(
        config
            .as_ref()
            .ok()
            .and_then(|c| c.sentry_dsn.as_deref()),
    );

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "motoshop=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            cli.log_json
                .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
        )
        .with(
            (!cli.log_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(CliError::from(e)),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: ApiConfig) -> Result<(), CliError> {
    match cli.command {
        Commands::Limits => commands::limits::print()?,
        Commands::Validate { form, file } => commands::validate::run(form, &file)?,
        Commands::Login { credential } => commands::session::login(config, credential).await?,
        Commands::Products { action } => match action {
            ProductAction::List => commands::products::list(config).await?,
            ProductAction::Create { file } => commands::products::create(config, &file).await?,
            ProductAction::Delete { id } => commands::products::delete(config, id).await?,
        },
        Commands::Users { action } => match action {
            UserAction::List { suspended } => commands::users::list(config, suspended).await?,
            UserAction::Suspend { id } => commands::users::suspend(config, id).await?,
            UserAction::Reactivate { id } => commands::users::reactivate(config, id).await?,
        },
    }
    Ok(())
}
