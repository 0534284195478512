// In-memory implementation of FilterWordStore, used as a test double.

use crate::core::moderation::{FilterKind, FilterWord, FilterWordStore, ModerationError};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// DashMap-backed filter word store.
///
/// The (word, kind) index is claimed through the entry API, so two
/// concurrent inserts of the same pair cannot both succeed.
pub struct InMemoryFilterStore {
    /// id -> word
    words: DashMap<String, FilterWord>,
    /// (word, kind) -> id
    index: DashMap<(String, FilterKind), String>,
}

impl InMemoryFilterStore {
    pub fn new() -> Self {
        Self {
            words: DashMap::new(),
            index: DashMap::new(),
        }
    }
}

impl Default for InMemoryFilterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FilterWordStore for InMemoryFilterStore {
    async fn load_words(&self, kind: FilterKind) -> Result<Vec<String>, ModerationError> {
        Ok(self
            .words
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.word.clone())
            .collect())
    }

    async fn insert_word(&self, word: FilterWord) -> Result<(), ModerationError> {
        match self.index.entry((word.word.clone(), word.kind)) {
            Entry::Occupied(_) => Err(ModerationError::DuplicateFilterWord {
                word: word.word,
                kind: word.kind,
            }),
            Entry::Vacant(slot) => {
                slot.insert(word.id.clone());
                self.words.insert(word.id.clone(), word);
                Ok(())
            }
        }
    }

    async fn list_words(&self) -> Result<Vec<FilterWord>, ModerationError> {
        let mut words: Vec<FilterWord> = self.words.iter().map(|entry| entry.value().clone()).collect();
        words.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(words)
    }

    async fn delete_word(&self, id: &str) -> Result<u64, ModerationError> {
        match self.words.remove(id) {
            Some((_, word)) => {
                self.index.remove(&(word.word, word.kind));
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
