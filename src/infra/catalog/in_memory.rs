// In-memory implementation of LiquorStore, used as a test double.

use crate::core::catalog::{CatalogError, EmbeddedMutation, Liquor, LiquorStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// DashMap-backed liquor store.
///
/// `apply_update` mutates the document while holding its shard write lock,
/// which makes every embedded mutation atomic per liquor.
pub struct InMemoryLiquorStore {
    /// id -> liquor document
    liquors: DashMap<String, Liquor>,
}

impl InMemoryLiquorStore {
    pub fn new() -> Self {
        Self {
            liquors: DashMap::new(),
        }
    }
}

impl Default for InMemoryLiquorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LiquorStore for InMemoryLiquorStore {
    async fn insert_liquor(&self, liquor: Liquor) -> Result<(), CatalogError> {
        match self.liquors.entry(liquor.id.clone()) {
            Entry::Occupied(_) => Err(CatalogError::StorageError(format!(
                "duplicate liquor id: {}",
                liquor.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(liquor);
                Ok(())
            }
        }
    }

    async fn find_liquor(&self, id: &str) -> Result<Option<Liquor>, CatalogError> {
        Ok(self.liquors.get(id).map(|entry| entry.value().clone()))
    }

    async fn list_liquors(
        &self,
        after: Option<DateTime<Utc>>,
        limit: usize,
    ) -> Result<Vec<Liquor>, CatalogError> {
        let mut liquors: Vec<Liquor> = self
            .liquors
            .iter()
            .filter(|entry| after.map_or(true, |at| entry.updated_at > at))
            .map(|entry| entry.value().clone())
            .collect();
        liquors.sort_by(|a, b| (a.updated_at, &a.id).cmp(&(b.updated_at, &b.id)));
        liquors.truncate(limit);
        Ok(liquors)
    }

    async fn delete_liquor(&self, id: &str) -> Result<u64, CatalogError> {
        Ok(self.liquors.remove(id).map_or(0, |_| 1))
    }

    async fn apply_update(&self, id: &str, mutation: &EmbeddedMutation) -> Result<u64, CatalogError> {
        match self.liquors.get_mut(id) {
            Some(mut entry) => Ok(mutation.apply(entry.value_mut()) as u64),
            None => Ok(0),
        }
    }
}
