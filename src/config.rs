// Environment-driven configuration.
//
// Variables (all optional):
// - DATABASE_URL            SQLite database (default sqlite://data/liquor_cms.db)
// - MODERATION_POLICY_FILE  JSON ModerationPolicy; missing fields use defaults
// - LIQUOR_PAGE_SIZE        default page size for `liquor list` (default 20)

use crate::core::catalog::MAX_PAGE_SIZE;
use crate::core::moderation::ModerationPolicy;
use anyhow::{bail, Context};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/liquor_cms.db";
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub policy: ModerationPolicy,
    pub page_size: usize,
}

impl AppConfig {
    /// Read configuration from the process environment.
    /// Call `dotenv` first so a `.env` file is honoured.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let policy = match lookup("MODERATION_POLICY_FILE") {
            Some(path) => load_policy(&path)?,
            None => ModerationPolicy::default(),
        };

        let page_size = match lookup("LIQUOR_PAGE_SIZE") {
            Some(raw) => {
                let size: usize = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("LIQUOR_PAGE_SIZE is not a number: {}", raw))?;
                if size == 0 || size > MAX_PAGE_SIZE {
                    bail!("LIQUOR_PAGE_SIZE must be between 1 and {}, got {}", MAX_PAGE_SIZE, size);
                }
                size
            }
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            database_url,
            policy,
            page_size,
        })
    }
}

fn load_policy(path: &str) -> anyhow::Result<ModerationPolicy> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading moderation policy file {}", path))?;
    let policy = serde_json::from_str(&raw)
        .with_context(|| format!("parsing moderation policy file {}", path))?;
    tracing::info!(path, "Loaded moderation policy");
    Ok(policy)
}
