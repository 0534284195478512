// SQLite connection bootstrap shared by every store.

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// How long a writer waits for the database lock before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(30);

/// Open a connection pool, creating the database file (and its folder) if needed.
pub async fn connect(database_url: &str) -> anyhow::Result<Pool<Sqlite>> {
    // Ensure the file exists if it's a file path
    let path_str = database_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
    if !database_url.contains(":memory:") && !Path::new(path_str).exists() {
        if let Some(parent) = Path::new(path_str).parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating database folder for {}", path_str))?;
        }
        std::fs::File::create(path_str).with_context(|| format!("creating database file {}", path_str))?;
    }

    let conn_str = if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else {
        format!("sqlite://{}", database_url)
    };

    let options = SqliteConnectOptions::from_str(&conn_str)
        .with_context(|| format!("parsing database url {}", conn_str))?
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .with_context(|| format!("connecting to {}", conn_str))?;

    tracing::debug!(database = %conn_str, "Connected to SQLite");
    Ok(pool)
}

/// Fixed-width RFC 3339 so stored timestamps sort correctly as text.
pub fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text).map(|dt| dt.with_timezone(&Utc))
}
