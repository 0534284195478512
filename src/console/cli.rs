// CLI argument definitions using clap.

use crate::core::catalog::{Profile, ReviewSort, StoreSort};
use crate::core::moderation::FilterKind;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Liquor catalog administration
#[derive(Parser)]
#[command(name = "liquor-cms")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage liquor records
    Liquor {
        #[command(subcommand)]
        command: LiquorCommand,
    },

    /// Manage the reviews embedded in a liquor
    Review {
        #[command(subcommand)]
        command: ReviewCommand,
    },

    /// Manage the store listings embedded in a liquor
    Store {
        #[command(subcommand)]
        command: StoreCommand,
    },

    /// Manage the moderation word lists
    Filter {
        #[command(subcommand)]
        command: FilterCommand,
    },
}

#[derive(Subcommand)]
pub enum LiquorCommand {
    /// Create a liquor
    Add {
        #[arg(long)]
        name: String,

        /// Liquor type, e.g. "위스키"
        #[arg(long = "type", value_name = "TYPE")]
        kind: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Overall rating, 0 to 5
        #[arg(long)]
        rating: f64,

        /// Tasting profile as JSON, e.g. {"smoothness":4,"aroma":4,...}
        #[arg(long, value_parser = parse_profile)]
        profile: Profile,

        /// Image file to attach
        #[arg(long, value_name = "FILE")]
        image: Option<PathBuf>,
    },

    /// List liquors by last update, oldest first
    List {
        /// Only liquors updated after this RFC 3339 timestamp
        #[arg(long)]
        after: Option<DateTime<Utc>>,

        /// Page size, 1 to 100 (default from LIQUOR_PAGE_SIZE)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one liquor with its reviews and stores
    Show {
        #[arg(value_name = "LIQUOR_ID")]
        id: String,
    },

    /// Delete a liquor with all of its reviews and stores
    Delete {
        #[arg(value_name = "LIQUOR_ID")]
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ReviewCommand {
    /// List reviews of a liquor
    List {
        liquor_id: String,

        /// recency or likes
        #[arg(short, long, default_value = "recency")]
        sort: ReviewSort,
    },

    /// Add a review (moderated)
    Add { liquor_id: String, content: String },

    /// Replace the content of a review (moderated)
    Edit {
        liquor_id: String,
        review_id: String,
        content: String,
    },

    /// Like a review
    Like { liquor_id: String, review_id: String },

    /// Delete a review by id, or by position with --index
    Delete {
        liquor_id: String,

        #[arg(required_unless_present = "index")]
        review_id: Option<String>,

        /// Zero-based position in the stored review array
        #[arg(long, conflicts_with = "review_id")]
        index: Option<usize>,
    },
}

#[derive(Subcommand)]
pub enum StoreCommand {
    /// List stores selling a liquor
    List {
        liquor_id: String,

        /// price or name
        #[arg(short, long, default_value = "price")]
        sort: StoreSort,
    },

    /// Add a store listing
    Add {
        liquor_id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        contact: Option<String>,

        #[arg(long)]
        price: u64,
    },

    /// Delete a store listing
    Delete { liquor_id: String, store_id: String },
}

#[derive(Subcommand)]
pub enum FilterCommand {
    /// List every filter word
    List,

    /// Register a filter word
    Add {
        word: String,

        /// profanity or ad
        #[arg(short, long, value_parser = parse_kind)]
        kind: FilterKind,
    },

    /// Delete a filter word by id
    Delete { id: String },

    /// Run text through moderation without storing anything
    Check { text: String },
}

fn parse_profile(s: &str) -> Result<Profile, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid profile JSON: {}", e))
}

fn parse_kind(s: &str) -> Result<FilterKind, String> {
    FilterKind::parse(s).ok_or_else(|| format!("unknown filter kind '{}' (expected profanity or ad)", s))
}
