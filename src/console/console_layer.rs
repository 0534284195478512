// Console layer - the admin command surface.
//
// Commands only translate arguments into service calls and print the
// result as JSON on stdout. Failures become distinct process exit codes.

pub mod cli;

#[path = "commands/command_catalog.rs"]
pub mod commands;

use crate::core::catalog::{CatalogError, CatalogService};
use crate::core::failure::FailureKind;
use crate::core::moderation::{ModerationError, ModerationService};
use crate::infra::catalog::SqliteLiquorStore;
use crate::infra::moderation::SqliteFilterStore;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Services shared by every command.
pub struct Data {
    pub catalog: Arc<CatalogService<SqliteLiquorStore, SqliteFilterStore>>,
    pub moderation: Arc<ModerationService<SqliteFilterStore>>,
    /// Default `liquor list` page size
    pub page_size: usize,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Moderation(#[from] ModerationError),

    #[error("{0}")]
    Usage(String),

    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CommandError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CommandError::Catalog(e) => e.kind(),
            CommandError::Moderation(e) => e.kind(),
            CommandError::Usage(_) => FailureKind::InvalidInput,
            CommandError::Output(_) => FailureKind::Storage,
        }
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self.kind() {
            FailureKind::Storage => 1,
            FailureKind::InvalidInput => 2,
            FailureKind::NotFound => 3,
            FailureKind::ValidationRejected => 4,
            FailureKind::DuplicateFilterWord => 5,
        }
    }
}

/// Pretty-print a command result on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CommandError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run one parsed command against the services.
pub async fn dispatch(data: &Data, command: cli::Commands) -> Result<(), CommandError> {
    match command {
        cli::Commands::Liquor { command } => commands::liquor::run(data, command).await,
        cli::Commands::Review { command } => commands::review::run(data, command).await,
        cli::Commands::Store { command } => commands::store::run(data, command).await,
        cli::Commands::Filter { command } => commands::filter::run(data, command).await,
    }
}
