// SQLite-backed filter word store.
//
// Tables:
// - filter_words: moderation dictionary entries, unique per (word, kind)

use crate::core::moderation::{FilterKind, FilterWord, FilterWordStore, ModerationError};
use crate::infra::database::{parse_timestamp, timestamp};
use async_trait::async_trait;
use sqlx::{Pool, Row, Sqlite};

pub struct SqliteFilterStore {
    pool: Pool<Sqlite>,
}

impl SqliteFilterStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Run database migrations to create required tables.
    pub async fn migrate(&self) -> Result<(), ModerationError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS filter_words (
                id TEXT PRIMARY KEY,
                word TEXT NOT NULL,
                kind TEXT NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE (word, kind)
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| ModerationError::StorageError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl FilterWordStore for SqliteFilterStore {
    async fn load_words(&self, kind: FilterKind) -> Result<Vec<String>, ModerationError> {
        let rows = sqlx::query("SELECT word FROM filter_words WHERE kind = ?")
            .bind(kind.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ModerationError::StorageError(e.to_string()))?;

        Ok(rows.iter().map(|row| row.get::<String, _>("word")).collect())
    }

    async fn insert_word(&self, word: FilterWord) -> Result<(), ModerationError> {
        sqlx::query(
            r#"
            INSERT INTO filter_words (id, word, kind, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&word.id)
        .bind(&word.word)
        .bind(word.kind.as_str())
        .bind(timestamp(&word.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ModerationError::DuplicateFilterWord {
                    word: word.word.clone(),
                    kind: word.kind,
                }
            }
            _ => ModerationError::StorageError(e.to_string()),
        })?;

        Ok(())
    }

    async fn list_words(&self) -> Result<Vec<FilterWord>, ModerationError> {
        let rows = sqlx::query(
            r#"
            SELECT id, word, kind, created_at
            FROM filter_words
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ModerationError::StorageError(e.to_string()))?;

        let words = rows
            .iter()
            .filter_map(|row| {
                let id: String = row.get("id");
                let kind_str: String = row.get("kind");
                let Some(kind) = FilterKind::parse(&kind_str) else {
                    tracing::warn!(%id, kind = %kind_str, "Skipping filter word with unknown kind");
                    return None;
                };

                let created_at_str: String = row.get("created_at");
                let created_at = match parse_timestamp(&created_at_str) {
                    Ok(at) => at,
                    Err(e) => {
                        tracing::warn!(
                            %id,
                            created_at = %created_at_str,
                            error = %e,
                            "Skipping filter word with unreadable timestamp"
                        );
                        return None;
                    }
                };

                Some(FilterWord {
                    id,
                    word: row.get("word"),
                    kind,
                    created_at,
                })
            })
            .collect();

        Ok(words)
    }

    async fn delete_word(&self, id: &str) -> Result<u64, ModerationError> {
        let result = sqlx::query("DELETE FROM filter_words WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ModerationError::StorageError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
