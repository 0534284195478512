// This is the entry point of the liquor catalog admin tool.
//
// **Architecture Overview:**
// - `core/` = Business logic (storage-agnostic)
// - `infra/` = Implementations of core traits (SQLite, in-memory doubles)
// - `console/` = Command line adapters (parse, call service, print JSON)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Dispatch the parsed command

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "console/console_layer.rs"]
mod console;
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;

mod config;

use crate::config::AppConfig;
use crate::console::cli::Cli;
use crate::console::Data;
use crate::core::catalog::CatalogService;
use crate::core::moderation::{ModerationEngine, ModerationService};
use crate::infra::catalog::SqliteLiquorStore;
use crate::infra::database;
use crate::infra::moderation::SqliteFilterStore;
use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::Level;

/// Wire stores and services together.
async fn build_data(config: &AppConfig) -> anyhow::Result<Data> {
    let pool = database::connect(&config.database_url).await?;

    let filter_store = SqliteFilterStore::new(pool.clone());
    filter_store
        .migrate()
        .await
        .context("Failed to migrate filter word table")?;

    let liquor_store = SqliteLiquorStore::new(pool);
    liquor_store
        .migrate()
        .await
        .context("Failed to migrate liquor table")?;

    let engine = ModerationEngine::new(&config.policy).context("Invalid moderation policy")?;
    let moderation = Arc::new(ModerationService::new(filter_store, engine));
    let catalog = Arc::new(CatalogService::new(liquor_store, Arc::clone(&moderation)));

    Ok(Data {
        catalog,
        moderation,
        page_size: config.page_size,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only command output
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================

    let data = match AppConfig::from_env() {
        Ok(config) => build_data(&config).await,
        Err(e) => Err(e),
    };
    let data = match data {
        Ok(data) => data,
        Err(e) => {
            tracing::error!("Startup failed: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match console::dispatch(&data, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(kind = ?e.kind(), "{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
