// Review moderation service - core business logic for text filtering.
//
// This service handles:
// - Profanity detection against the stored word list
// - Advertising detection (URLs, phone numbers, promotional keywords)
// - Managing the filter word dictionaries
//
// NO storage dependencies here - just pure domain logic.

use super::moderation_models::{
    FilterKind, FilterWord, ModerationPolicy, ModerationVerdict, RejectionReason, WordLists,
};
use crate::core::failure::FailureKind;
use crate::core::ids;
use async_trait::async_trait;
use chrono::Utc;
use regex::Regex;
use thiserror::Error;

/// Filter words are limited to this many characters.
pub const MAX_FILTER_WORD_CHARS: usize = 50;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("Filter word not found: {0}")]
    NotFound(String),

    #[error("Filter word already exists: {word} ({kind})")]
    DuplicateFilterWord { word: String, kind: FilterKind },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid moderation pattern: {0}")]
    InvalidPattern(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl ModerationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ModerationError::NotFound(_) => FailureKind::NotFound,
            ModerationError::DuplicateFilterWord { .. } => FailureKind::DuplicateFilterWord,
            ModerationError::InvalidInput(_) | ModerationError::InvalidPattern(_) => {
                FailureKind::InvalidInput
            }
            ModerationError::StorageError(_) => FailureKind::Storage,
        }
    }
}

// ============================================================================
// STORAGE TRAIT (PORT)
// ============================================================================

/// Trait for persisting the moderation dictionaries.
#[async_trait]
pub trait FilterWordStore: Send + Sync {
    /// Every word registered under `kind`.
    async fn load_words(&self, kind: FilterKind) -> Result<Vec<String>, ModerationError>;

    /// Insert a new word. Must fail with `DuplicateFilterWord` if the
    /// (word, kind) pair already exists, even under concurrent inserts.
    async fn insert_word(&self, word: FilterWord) -> Result<(), ModerationError>;

    /// All words of both kinds, oldest first.
    async fn list_words(&self) -> Result<Vec<FilterWord>, ModerationError>;

    /// Delete a word by id. Returns the number of deleted entries.
    async fn delete_word(&self, id: &str) -> Result<u64, ModerationError>;
}

// ============================================================================
// ENGINE
// ============================================================================

/// Compiled moderation policy. Classifies text against a word-list snapshot.
#[derive(Debug, Clone)]
pub struct ModerationEngine {
    url: Regex,
    phone: Regex,
    ad_lexicon: Vec<String>,
}

impl ModerationEngine {
    pub fn new(policy: &ModerationPolicy) -> Result<Self, ModerationError> {
        let url = Regex::new(&policy.url_pattern)
            .map_err(|e| ModerationError::InvalidPattern(format!("url_pattern: {}", e)))?;
        let phone = Regex::new(&policy.phone_pattern)
            .map_err(|e| ModerationError::InvalidPattern(format!("phone_pattern: {}", e)))?;

        Ok(Self {
            url,
            phone,
            ad_lexicon: normalize_words(policy.ad_lexicon.iter()),
        })
    }

    /// Classify `text`. Profanity is checked before advertising.
    pub fn validate(&self, text: &str, lists: &WordLists) -> ModerationVerdict {
        let text = text.to_lowercase();

        if contains_any(&text, &normalize_words(lists.profanity.iter())) {
            return ModerationVerdict::Rejected(RejectionReason::Profanity);
        }

        if self.is_advertising(&text, lists) {
            return ModerationVerdict::Rejected(RejectionReason::Advertising);
        }

        ModerationVerdict::Accepted
    }

    /// `text` must already be lowercased.
    fn is_advertising(&self, text: &str, lists: &WordLists) -> bool {
        self.url.is_match(text)
            || self.phone.is_match(text)
            || contains_any(text, &self.ad_lexicon)
            || contains_any(text, &normalize_words(lists.ad_keywords.iter()))
    }
}

fn normalize_words<'a>(words: impl Iterator<Item = &'a String>) -> Vec<String> {
    words
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

fn contains_any(text: &str, words: &[String]) -> bool {
    words.iter().any(|w| text.contains(w.as_str()))
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Moderation service: validates review text and manages the dictionaries.
pub struct ModerationService<S: FilterWordStore> {
    store: S,
    engine: ModerationEngine,
}

impl<S: FilterWordStore> ModerationService<S> {
    /// Create a new moderation service with the given store and compiled policy.
    pub fn new(store: S, engine: ModerationEngine) -> Self {
        Self { store, engine }
    }

    /// Load both dictionaries from the store.
    ///
    /// Called on every validation so word-list edits take effect immediately.
    pub async fn load_word_lists(&self) -> Result<WordLists, ModerationError> {
        let profanity = self.store.load_words(FilterKind::Profanity).await?;
        let ad_keywords = self.store.load_words(FilterKind::Ad).await?;

        Ok(WordLists {
            profanity: profanity.into_iter().collect(),
            ad_keywords: ad_keywords.into_iter().collect(),
        })
    }

    /// Check a candidate review text against the current dictionaries.
    pub async fn check_text(&self, text: &str) -> Result<ModerationVerdict, ModerationError> {
        let lists = self.load_word_lists().await?;
        let verdict = self.engine.validate(text, &lists);

        if let ModerationVerdict::Rejected(reason) = &verdict {
            tracing::warn!(%reason, "Review text rejected by moderation");
        }

        Ok(verdict)
    }

    /// Register a new filter word.
    pub async fn add_word(&self, word: &str, kind: FilterKind) -> Result<FilterWord, ModerationError> {
        let word = word.trim();
        let len = word.chars().count();
        if len == 0 || len > MAX_FILTER_WORD_CHARS {
            return Err(ModerationError::InvalidInput(format!(
                "filter word must be 1-{} characters",
                MAX_FILTER_WORD_CHARS
            )));
        }

        let filter_word = FilterWord {
            id: ids::new_document_id(),
            word: word.to_string(),
            kind,
            created_at: Utc::now(),
        };

        // The store enforces (word, kind) uniqueness itself.
        self.store.insert_word(filter_word.clone()).await?;

        tracing::info!(id = %filter_word.id, kind = %kind, "Filter word added");
        Ok(filter_word)
    }

    /// List every registered filter word.
    pub async fn list_words(&self) -> Result<Vec<FilterWord>, ModerationError> {
        self.store.list_words().await
    }

    /// Remove a filter word by id.
    pub async fn delete_word(&self, id: &str) -> Result<(), ModerationError> {
        if !ids::is_document_id(id) {
            return Err(ModerationError::InvalidInput(format!("malformed filter word id: {}", id)));
        }

        if self.store.delete_word(id).await? == 0 {
            return Err(ModerationError::NotFound(id.to_string()));
        }

        tracing::info!(id, "Filter word deleted");
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::moderation::InMemoryFilterStore;

    fn lists(profanity: &[&str], ads: &[&str]) -> WordLists {
        WordLists {
            profanity: profanity.iter().map(|s| s.to_string()).collect(),
            ad_keywords: ads.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn engine() -> ModerationEngine {
        ModerationEngine::new(&ModerationPolicy::default()).unwrap()
    }

    fn service() -> ModerationService<InMemoryFilterStore> {
        ModerationService::new(InMemoryFilterStore::new(), engine())
    }

    #[test]
    fn test_clean_text_is_accepted() {
        let engine = engine();
        let verdict = engine.validate("좋은 위스키네요!", &lists(&["비속어1"], &[]));
        assert_eq!(verdict, ModerationVerdict::Accepted);

        let verdict = engine.validate("Smooth, honeyed and long on the finish", &WordLists::default());
        assert!(verdict.is_accepted());
    }

    #[test]
    fn test_profanity_is_case_insensitive_substring() {
        let engine = engine();
        let words = lists(&["Darn"], &[]);

        assert_eq!(
            engine.validate("well DARNIT that was harsh", &words),
            ModerationVerdict::Rejected(RejectionReason::Profanity)
        );
    }

    #[test]
    fn test_profanity_takes_precedence_over_advertising() {
        let engine = engine();
        let words = lists(&["비속어1"], &[]);

        assert_eq!(
            engine.validate("비속어1 광고 www.example.com", &words),
            ModerationVerdict::Rejected(RejectionReason::Profanity)
        );
    }

    #[test]
    fn test_urls_are_advertising() {
        let engine = engine();
        let empty = WordLists::default();

        for text in [
            "buy here https://shop.example/deals",
            "see Example.IO for more",
            "visit liquor.store/sale now",
        ] {
            assert_eq!(
                engine.validate(text, &empty),
                ModerationVerdict::Rejected(RejectionReason::Advertising),
                "{} should be flagged",
                text
            );
        }
    }

    #[test]
    fn test_phone_numbers_are_advertising() {
        let engine = engine();
        let empty = WordLists::default();

        for text in ["연락 주세요 010-1234-5678", "call 02 123 4567", "01012345678"] {
            assert_eq!(
                engine.validate(text, &empty),
                ModerationVerdict::Rejected(RejectionReason::Advertising),
                "{} should be flagged",
                text
            );
        }
    }

    #[test]
    fn test_lexicon_and_stored_keywords_are_advertising() {
        let engine = engine();

        assert_eq!(
            engine.validate("오늘만 특가 판매", &WordLists::default()),
            ModerationVerdict::Rejected(RejectionReason::Advertising)
        );
        assert_eq!(
            engine.validate("join my discord", &lists(&[], &["Discord"])),
            ModerationVerdict::Rejected(RejectionReason::Advertising)
        );
    }

    #[test]
    fn test_custom_policy_replaces_patterns() {
        let policy = ModerationPolicy {
            url_pattern: r"never-matches-\d{40}".to_string(),
            phone_pattern: r"never-matches-\d{40}".to_string(),
            ad_lexicon: vec!["promo".to_string()],
        };
        let engine = ModerationEngine::new(&policy).unwrap();

        assert!(engine.validate("010-1234-5678", &WordLists::default()).is_accepted());
        assert!(!engine.validate("PROMO inside", &WordLists::default()).is_accepted());
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let policy = ModerationPolicy {
            url_pattern: "(unclosed".to_string(),
            ..Default::default()
        };
        let err = ModerationEngine::new(&policy).unwrap_err();
        assert!(matches!(err, ModerationError::InvalidPattern(_)));
    }

    #[tokio::test]
    async fn test_word_list_edits_take_effect_immediately() {
        let service = service();

        let verdict = service.check_text("비속어1 포함된 리뷰").await.unwrap();
        assert!(verdict.is_accepted());

        let word = service.add_word("비속어1", FilterKind::Profanity).await.unwrap();
        let verdict = service.check_text("비속어1 포함된 리뷰").await.unwrap();
        assert_eq!(verdict, ModerationVerdict::Rejected(RejectionReason::Profanity));

        service.delete_word(&word.id).await.unwrap();
        let verdict = service.check_text("비속어1 포함된 리뷰").await.unwrap();
        assert!(verdict.is_accepted());
    }

    #[tokio::test]
    async fn test_duplicate_filter_word_is_rejected() {
        let service = service();

        service.add_word("광고", FilterKind::Ad).await.unwrap();
        let err = service.add_word("광고", FilterKind::Ad).await.unwrap_err();
        assert!(matches!(err, ModerationError::DuplicateFilterWord { .. }));
        assert_eq!(err.kind(), FailureKind::DuplicateFilterWord);

        // Same word under the other kind is a distinct entry
        service.add_word("광고", FilterKind::Profanity).await.unwrap();

        assert_eq!(service.list_words().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_filter_word_length_is_validated() {
        let service = service();

        let err = service.add_word("   ", FilterKind::Ad).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidInput);

        let long = "가".repeat(MAX_FILTER_WORD_CHARS + 1);
        let err = service.add_word(&long, FilterKind::Ad).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidInput);

        let exact = "가".repeat(MAX_FILTER_WORD_CHARS);
        assert!(service.add_word(&exact, FilterKind::Ad).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_unknown_word() {
        let service = service();

        let err = service.delete_word(&ids::new_document_id()).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::NotFound);

        let err = service.delete_word("garbage").await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidInput);
    }
}
