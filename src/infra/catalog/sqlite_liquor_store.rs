// SQLite-backed liquor store.
//
// Tables:
// - liquors: one row per liquor document. The embedded `reviews` and
//   `stores` arrays are JSON text columns next to a `revision` counter.
//
// Embedded mutations run in one transaction whose first statement bumps
// `revision`. That write takes the database write lock before the document
// is read, so concurrent writers queue on the busy timeout and each one
// applies its mutation to the latest arrays.

use crate::core::catalog::{CatalogError, EmbeddedMutation, Liquor, LiquorStore, Profile};
use crate::infra::database::{parse_timestamp, timestamp};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};

pub struct SqliteLiquorStore {
    pool: Pool<Sqlite>,
}

impl SqliteLiquorStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Run database migrations to create required tables.
    pub async fn migrate(&self) -> Result<(), CatalogError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS liquors (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                kind TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                rating REAL NOT NULL,
                image BLOB,
                profile TEXT NOT NULL,
                reviews TEXT NOT NULL DEFAULT '[]',
                stores TEXT NOT NULL DEFAULT '[]',
                revision INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_liquors_updated_at
                ON liquors(updated_at, id);
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }
}

fn storage_error(e: impl std::fmt::Display) -> CatalogError {
    CatalogError::StorageError(e.to_string())
}

fn row_to_liquor(row: &SqliteRow) -> Result<Liquor, CatalogError> {
    let profile_json: String = row.get("profile");
    let reviews_json: String = row.get("reviews");
    let stores_json: String = row.get("stores");
    let created_at_str: String = row.get("created_at");
    let updated_at_str: String = row.get("updated_at");

    let profile: Profile = serde_json::from_str(&profile_json).map_err(storage_error)?;

    Ok(Liquor {
        id: row.get("id"),
        name: row.get("name"),
        kind: row.get("kind"),
        description: row.get("description"),
        rating: row.get("rating"),
        image: row.get("image"),
        profile,
        reviews: serde_json::from_str(&reviews_json).map_err(storage_error)?,
        stores: serde_json::from_str(&stores_json).map_err(storage_error)?,
        created_at: parse_timestamp(&created_at_str).map_err(storage_error)?,
        updated_at: parse_timestamp(&updated_at_str).map_err(storage_error)?,
    })
}

#[async_trait]
impl LiquorStore for SqliteLiquorStore {
    async fn insert_liquor(&self, liquor: Liquor) -> Result<(), CatalogError> {
        let profile = serde_json::to_string(&liquor.profile).map_err(storage_error)?;
        let reviews = serde_json::to_string(&liquor.reviews).map_err(storage_error)?;
        let stores = serde_json::to_string(&liquor.stores).map_err(storage_error)?;

        sqlx::query(
            r#"
            INSERT INTO liquors (
                id, name, kind, description, rating, image, profile,
                reviews, stores, revision, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?)
            "#,
        )
        .bind(&liquor.id)
        .bind(&liquor.name)
        .bind(&liquor.kind)
        .bind(&liquor.description)
        .bind(liquor.rating)
        .bind(liquor.image.as_deref())
        .bind(profile)
        .bind(reviews)
        .bind(stores)
        .bind(timestamp(&liquor.created_at))
        .bind(timestamp(&liquor.updated_at))
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }

    async fn find_liquor(&self, id: &str) -> Result<Option<Liquor>, CatalogError> {
        let row = sqlx::query("SELECT * FROM liquors WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(row_to_liquor).transpose()
    }

    async fn list_liquors(
        &self,
        after: Option<DateTime<Utc>>,
        limit: usize,
    ) -> Result<Vec<Liquor>, CatalogError> {
        let after = after.map(|at| timestamp(&at));
        let rows = sqlx::query(
            r#"
            SELECT * FROM liquors
            WHERE ?1 IS NULL OR updated_at > ?1
            ORDER BY updated_at ASC, id ASC
            LIMIT ?2
            "#,
        )
        .bind(after)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.iter().map(row_to_liquor).collect()
    }

    async fn delete_liquor(&self, id: &str) -> Result<u64, CatalogError> {
        let result = sqlx::query("DELETE FROM liquors WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected())
    }

    async fn apply_update(&self, id: &str, mutation: &EmbeddedMutation) -> Result<u64, CatalogError> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        // Writing first claims the write lock; dropping `tx` rolls it back
        let claimed = sqlx::query("UPDATE liquors SET revision = revision + 1 WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;
        if claimed.rows_affected() == 0 {
            return Ok(0);
        }

        let row = sqlx::query("SELECT * FROM liquors WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(storage_error)?;
        let mut liquor = row_to_liquor(&row)?;

        if !mutation.apply(&mut liquor) {
            return Ok(0);
        }

        let reviews = serde_json::to_string(&liquor.reviews).map_err(storage_error)?;
        let stores = serde_json::to_string(&liquor.stores).map_err(storage_error)?;

        sqlx::query("UPDATE liquors SET reviews = ?, stores = ? WHERE id = ?")
            .bind(reviews)
            .bind(stores)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;

        tx.commit().await.map_err(storage_error)?;
        Ok(1)
    }
}
