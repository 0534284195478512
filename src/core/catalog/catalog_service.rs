// Catalog service - liquor records and their embedded reviews and stores.
//
// This service handles:
// - Liquor creation, lookup, paging and deletion
// - Review add/edit/like/delete, gated by the moderation service
// - Store listing add/delete
// - Sorted snapshots of the embedded collections
//
// Every embedded change is a single EmbeddedMutation handed to the store,
// which applies it atomically to one liquor document.

use super::catalog_models::{
    Liquor, LiquorSummary, NewLiquor, NewStore, Review, ReviewRef, ReviewSort, Store, StoreSort,
    MAX_SCORE,
};
use super::catalog_mutation::EmbeddedMutation;
use crate::core::failure::FailureKind;
use crate::core::ids;
use crate::core::moderation::{
    FilterWordStore, ModerationError, ModerationService, ModerationVerdict, RejectionReason,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Review content is limited to this many characters.
pub const MAX_REVIEW_CHARS: usize = 500;
/// Largest page `list_liquors` will return.
pub const MAX_PAGE_SIZE: usize = 100;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Liquor not found: {0}")]
    LiquorNotFound(String),

    #[error("Review not found: {review} (liquor {liquor_id})")]
    ReviewNotFound { liquor_id: String, review: String },

    #[error("Store not found: {store_id} (liquor {liquor_id})")]
    StoreNotFound { liquor_id: String, store_id: String },

    #[error("Review rejected: {0}")]
    Rejected(RejectionReason),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Moderation(#[from] ModerationError),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl CatalogError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CatalogError::LiquorNotFound(_)
            | CatalogError::ReviewNotFound { .. }
            | CatalogError::StoreNotFound { .. } => FailureKind::NotFound,
            CatalogError::Rejected(_) => FailureKind::ValidationRejected,
            CatalogError::InvalidInput(_) => FailureKind::InvalidInput,
            CatalogError::Moderation(e) => e.kind(),
            CatalogError::StorageError(_) => FailureKind::Storage,
        }
    }
}

// ============================================================================
// STORAGE TRAIT (PORT)
// ============================================================================

/// Trait for persisting liquor documents.
#[async_trait]
pub trait LiquorStore: Send + Sync {
    /// Insert a brand new liquor document.
    async fn insert_liquor(&self, liquor: Liquor) -> Result<(), CatalogError>;

    /// Fetch one liquor with its embedded collections.
    async fn find_liquor(&self, id: &str) -> Result<Option<Liquor>, CatalogError>;

    /// Liquors updated strictly after `after` (all if None), oldest update first.
    async fn list_liquors(
        &self,
        after: Option<DateTime<Utc>>,
        limit: usize,
    ) -> Result<Vec<Liquor>, CatalogError>;

    /// Delete a liquor and everything embedded in it. Returns the deleted count.
    async fn delete_liquor(&self, id: &str) -> Result<u64, CatalogError>;

    /// Apply one mutation to one liquor atomically.
    ///
    /// Returns the number of modified documents: 0 when the liquor does not
    /// exist or the mutation matched nothing.
    async fn apply_update(&self, id: &str, mutation: &EmbeddedMutation) -> Result<u64, CatalogError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Catalog service over a liquor store, with review moderation.
pub struct CatalogService<L: LiquorStore, F: FilterWordStore> {
    store: L,
    moderation: Arc<ModerationService<F>>,
}

impl<L: LiquorStore, F: FilterWordStore> CatalogService<L, F> {
    /// Create a new catalog service with the given store and moderation service.
    pub fn new(store: L, moderation: Arc<ModerationService<F>>) -> Self {
        Self { store, moderation }
    }

    // ------------------------------------------------------------------------
    // Liquors
    // ------------------------------------------------------------------------

    pub async fn create_liquor(&self, new: NewLiquor) -> Result<Liquor, CatalogError> {
        let name = required(&new.name, "name")?;
        let kind = required(&new.kind, "type")?;
        check_score("rating", new.rating)?;
        for (axis, score) in new.profile.scores() {
            check_score(axis, score)?;
        }

        let now = Utc::now();
        let liquor = Liquor {
            id: ids::new_document_id(),
            name,
            kind,
            description: new.description.trim().to_string(),
            rating: new.rating,
            image: new.image,
            profile: new.profile,
            reviews: Vec::new(),
            stores: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        self.store.insert_liquor(liquor.clone()).await?;

        tracing::info!(liquor_id = %liquor.id, name = %liquor.name, "Liquor created");
        Ok(liquor)
    }

    pub async fn get_liquor(&self, liquor_id: &str) -> Result<Liquor, CatalogError> {
        check_id(liquor_id, "liquor")?;
        self.store
            .find_liquor(liquor_id)
            .await?
            .ok_or_else(|| CatalogError::LiquorNotFound(liquor_id.to_string()))
    }

    /// Page through liquors by last update, for incremental sync.
    pub async fn list_liquors(
        &self,
        after: Option<DateTime<Utc>>,
        limit: usize,
    ) -> Result<Vec<LiquorSummary>, CatalogError> {
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(CatalogError::InvalidInput(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        let liquors = self.store.list_liquors(after, limit).await?;
        tracing::debug!(count = liquors.len(), "Listed liquors");
        Ok(liquors.iter().map(LiquorSummary::from).collect())
    }

    /// Delete a liquor together with all of its reviews and stores.
    pub async fn delete_liquor(&self, liquor_id: &str) -> Result<(), CatalogError> {
        check_id(liquor_id, "liquor")?;
        if self.store.delete_liquor(liquor_id).await? == 0 {
            return Err(CatalogError::LiquorNotFound(liquor_id.to_string()));
        }

        tracing::info!(liquor_id, "Liquor deleted");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Reviews
    // ------------------------------------------------------------------------

    pub async fn add_review(&self, liquor_id: &str, content: &str) -> Result<Review, CatalogError> {
        check_id(liquor_id, "liquor")?;
        let content = self.moderate(content).await?;

        let now = Utc::now();
        let review = Review {
            id: ids::new_document_id(),
            content,
            created_at: now,
            updated_at: now,
            likes: 0,
        };

        let mutation = EmbeddedMutation::PushReview(review.clone());
        if self.apply(liquor_id, &mutation).await? == 0 {
            return Err(self
                .not_modified(liquor_id, || {
                    CatalogError::StorageError(format!("review id collision: {}", review.id))
                })
                .await);
        }

        tracing::info!(liquor_id, review_id = %review.id, "Review added");
        Ok(review)
    }

    pub async fn update_review(
        &self,
        liquor_id: &str,
        review_id: &str,
        content: &str,
    ) -> Result<Review, CatalogError> {
        check_id(liquor_id, "liquor")?;
        check_id(review_id, "review")?;
        let content = self.moderate(content).await?;

        let mutation = EmbeddedMutation::SetReviewContent {
            review_id: review_id.to_string(),
            content,
            updated_at: Utc::now(),
        };
        if self.apply(liquor_id, &mutation).await? == 0 {
            return Err(self
                .not_modified(liquor_id, || review_not_found(liquor_id, review_id))
                .await);
        }

        tracing::info!(liquor_id, review_id, "Review updated");
        self.find_review(liquor_id, review_id).await
    }

    pub async fn like_review(&self, liquor_id: &str, review_id: &str) -> Result<Review, CatalogError> {
        check_id(liquor_id, "liquor")?;
        check_id(review_id, "review")?;

        let mutation = EmbeddedMutation::IncrementReviewLikes {
            review_id: review_id.to_string(),
        };
        if self.apply(liquor_id, &mutation).await? == 0 {
            return Err(self
                .not_modified(liquor_id, || review_not_found(liquor_id, review_id))
                .await);
        }

        tracing::debug!(liquor_id, review_id, "Review liked");
        self.find_review(liquor_id, review_id).await
    }

    /// Remove one review, addressed by id or by its current position.
    pub async fn delete_review(&self, liquor_id: &str, target: ReviewRef) -> Result<(), CatalogError> {
        check_id(liquor_id, "liquor")?;
        if let ReviewRef::Id(review_id) = &target {
            check_id(review_id, "review")?;
        }

        let mutation = EmbeddedMutation::PullReview(target.clone());
        if self.apply(liquor_id, &mutation).await? == 0 {
            return Err(self
                .not_modified(liquor_id, || match &target {
                    ReviewRef::Id(review_id) => review_not_found(liquor_id, review_id),
                    ReviewRef::Position(index) => {
                        CatalogError::InvalidInput(format!("review index {} is out of bounds", index))
                    }
                })
                .await);
        }

        tracing::info!(liquor_id, review = %target, "Review deleted");
        Ok(())
    }

    pub async fn list_reviews(&self, liquor_id: &str, sort: ReviewSort) -> Result<Vec<Review>, CatalogError> {
        let mut reviews = self.get_liquor(liquor_id).await?.reviews;
        sort.sort(&mut reviews);
        Ok(reviews)
    }

    // ------------------------------------------------------------------------
    // Stores
    // ------------------------------------------------------------------------

    pub async fn add_store(&self, liquor_id: &str, new: NewStore) -> Result<Store, CatalogError> {
        check_id(liquor_id, "liquor")?;
        let store = Store {
            id: ids::new_document_id(),
            name: required(&new.name, "store name")?,
            address: optional(new.address),
            contact: optional(new.contact),
            price: new.price,
        };

        let mutation = EmbeddedMutation::PushStore(store.clone());
        if self.apply(liquor_id, &mutation).await? == 0 {
            return Err(self
                .not_modified(liquor_id, || {
                    CatalogError::StorageError(format!("store id collision: {}", store.id))
                })
                .await);
        }

        tracing::info!(liquor_id, store_id = %store.id, "Store added");
        Ok(store)
    }

    pub async fn delete_store(&self, liquor_id: &str, store_id: &str) -> Result<(), CatalogError> {
        check_id(liquor_id, "liquor")?;
        check_id(store_id, "store")?;

        let mutation = EmbeddedMutation::PullStore {
            store_id: store_id.to_string(),
        };
        if self.apply(liquor_id, &mutation).await? == 0 {
            return Err(self
                .not_modified(liquor_id, || CatalogError::StoreNotFound {
                    liquor_id: liquor_id.to_string(),
                    store_id: store_id.to_string(),
                })
                .await);
        }

        tracing::info!(liquor_id, store_id, "Store deleted");
        Ok(())
    }

    pub async fn list_stores(&self, liquor_id: &str, sort: StoreSort) -> Result<Vec<Store>, CatalogError> {
        let mut stores = self.get_liquor(liquor_id).await?.stores;
        sort.sort(&mut stores);
        Ok(stores)
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    /// Trim, length-check and moderate review content.
    async fn moderate(&self, content: &str) -> Result<String, CatalogError> {
        let content = content.trim();
        let len = content.chars().count();
        if len == 0 || len > MAX_REVIEW_CHARS {
            return Err(CatalogError::InvalidInput(format!(
                "review content must be 1-{} characters",
                MAX_REVIEW_CHARS
            )));
        }

        match self.moderation.check_text(content).await? {
            ModerationVerdict::Accepted => Ok(content.to_string()),
            ModerationVerdict::Rejected(reason) => Err(CatalogError::Rejected(reason)),
        }
    }

    async fn apply(&self, liquor_id: &str, mutation: &EmbeddedMutation) -> Result<u64, CatalogError> {
        let modified = self.store.apply_update(liquor_id, mutation).await?;
        tracing::debug!(liquor_id, mutation = mutation.name(), modified, "Applied embedded mutation");
        Ok(modified)
    }

    /// Explain a zero modified count: either the liquor is gone or the
    /// element-level error from `otherwise` applies.
    async fn not_modified(
        &self,
        liquor_id: &str,
        otherwise: impl FnOnce() -> CatalogError,
    ) -> CatalogError {
        match self.store.find_liquor(liquor_id).await {
            Ok(Some(_)) => otherwise(),
            Ok(None) => CatalogError::LiquorNotFound(liquor_id.to_string()),
            Err(e) => e,
        }
    }

    async fn find_review(&self, liquor_id: &str, review_id: &str) -> Result<Review, CatalogError> {
        self.get_liquor(liquor_id)
            .await?
            .reviews
            .into_iter()
            .find(|r| r.id == review_id)
            .ok_or_else(|| review_not_found(liquor_id, review_id))
    }
}

fn review_not_found(liquor_id: &str, review_id: &str) -> CatalogError {
    CatalogError::ReviewNotFound {
        liquor_id: liquor_id.to_string(),
        review: review_id.to_string(),
    }
}

fn check_id(id: &str, what: &str) -> Result<(), CatalogError> {
    if ids::is_document_id(id) {
        Ok(())
    } else {
        Err(CatalogError::InvalidInput(format!("malformed {} id: {}", what, id)))
    }
}

fn check_score(field: &str, score: f64) -> Result<(), CatalogError> {
    if score.is_finite() && (0.0..=MAX_SCORE).contains(&score) {
        Ok(())
    } else {
        Err(CatalogError::InvalidInput(format!(
            "{} must be between 0 and {}, got {}",
            field, MAX_SCORE, score
        )))
    }
}

fn required(value: &str, field: &str) -> Result<String, CatalogError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CatalogError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(value.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Profile;
    use crate::core::moderation::{FilterKind, ModerationEngine, ModerationPolicy};
    use crate::infra::catalog::InMemoryLiquorStore;
    use crate::infra::moderation::InMemoryFilterStore;

    type TestService = CatalogService<InMemoryLiquorStore, InMemoryFilterStore>;

    fn setup() -> (TestService, Arc<ModerationService<InMemoryFilterStore>>) {
        let engine = ModerationEngine::new(&ModerationPolicy::default()).unwrap();
        let moderation = Arc::new(ModerationService::new(InMemoryFilterStore::new(), engine));
        let service = CatalogService::new(InMemoryLiquorStore::new(), Arc::clone(&moderation));
        (service, moderation)
    }

    fn whisky() -> NewLiquor {
        NewLiquor {
            name: "테스트 위스키".to_string(),
            kind: "위스키".to_string(),
            description: "테스트용 위스키입니다.".to_string(),
            rating: 4.5,
            image: None,
            profile: Profile::uniform(4.0),
        }
    }

    fn shop(name: &str, price: u64) -> NewStore {
        NewStore {
            name: name.to_string(),
            address: Some("서울".to_string()),
            contact: None,
            price,
        }
    }

    #[tokio::test]
    async fn test_review_lifecycle() {
        let (service, _) = setup();
        let liquor = service.create_liquor(whisky()).await.unwrap();
        assert_eq!(liquor.rating, 4.5);
        assert_eq!(liquor.profile, Profile::uniform(4.0));

        let review = service.add_review(&liquor.id, "좋은 위스키네요!").await.unwrap();
        assert_eq!(review.likes, 0);
        assert_eq!(review.created_at, review.updated_at);

        let liked = service.like_review(&liquor.id, &review.id).await.unwrap();
        assert_eq!(liked.likes, 1);

        service
            .delete_review(&liquor.id, ReviewRef::Position(0))
            .await
            .unwrap();
        let reviews = service.list_reviews(&liquor.id, ReviewSort::RecencyDesc).await.unwrap();
        assert!(reviews.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_review_is_not_appended() {
        let (service, moderation) = setup();
        moderation.add_word("비속어1", FilterKind::Profanity).await.unwrap();
        let liquor = service.create_liquor(whisky()).await.unwrap();

        let err = service.add_review(&liquor.id, "비속어1 포함된 리뷰").await.unwrap_err();
        assert!(matches!(err, CatalogError::Rejected(RejectionReason::Profanity)));
        assert_eq!(err.kind(), FailureKind::ValidationRejected);
        assert!(err.to_string().contains("profanity"));

        let err = service.add_review(&liquor.id, "광고 포함된 리뷰").await.unwrap_err();
        assert!(matches!(err, CatalogError::Rejected(RejectionReason::Advertising)));

        let reviews = service.list_reviews(&liquor.id, ReviewSort::RecencyDesc).await.unwrap();
        assert!(reviews.is_empty());
    }

    #[tokio::test]
    async fn test_new_review_listed_first_by_recency() {
        let (service, _) = setup();
        let liquor = service.create_liquor(whisky()).await.unwrap();

        service.add_review(&liquor.id, "첫 번째 리뷰").await.unwrap();
        let newest = service.add_review(&liquor.id, "두 번째 리뷰").await.unwrap();

        let reviews = service.list_reviews(&liquor.id, ReviewSort::RecencyDesc).await.unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].id, newest.id);
    }

    #[tokio::test]
    async fn test_likes_sort_and_double_like() {
        let (service, _) = setup();
        let liquor = service.create_liquor(whisky()).await.unwrap();

        let popular = service.add_review(&liquor.id, "향이 좋아요").await.unwrap();
        service.add_review(&liquor.id, "무난합니다").await.unwrap();

        service.like_review(&liquor.id, &popular.id).await.unwrap();
        let liked = service.like_review(&liquor.id, &popular.id).await.unwrap();
        assert_eq!(liked.likes, 2);
        assert_eq!(liked.updated_at, popular.updated_at);

        let reviews = service.list_reviews(&liquor.id, ReviewSort::LikesDesc).await.unwrap();
        assert_eq!(reviews[0].id, popular.id);
    }

    #[tokio::test]
    async fn test_update_review() {
        let (service, _) = setup();
        let liquor = service.create_liquor(whisky()).await.unwrap();
        let review = service.add_review(&liquor.id, "처음 느낌").await.unwrap();

        let updated = service
            .update_review(&liquor.id, &review.id, "다시 마셔보니 더 좋네요")
            .await
            .unwrap();
        assert_eq!(updated.content, "다시 마셔보니 더 좋네요");
        assert!(updated.updated_at >= review.updated_at);
        assert_eq!(updated.created_at, review.created_at);

        let err = service
            .update_review(&liquor.id, &review.id, "연락처 남겨요")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::ValidationRejected);

        let unknown = ids::new_document_id();
        let err = service.update_review(&liquor.id, &unknown, "괜찮네요").await.unwrap_err();
        assert!(matches!(err, CatalogError::ReviewNotFound { .. }));
    }

    #[tokio::test]
    async fn test_missing_liquor_is_not_found() {
        let (service, _) = setup();
        let ghost = ids::new_document_id();

        let err = service.add_review(&ghost, "좋아요").await.unwrap_err();
        assert!(matches!(err, CatalogError::LiquorNotFound(_)));

        let err = service.like_review(&ghost, &ids::new_document_id()).await.unwrap_err();
        assert!(matches!(err, CatalogError::LiquorNotFound(_)));

        let err = service.add_store(&ghost, shop("보틀샵", 1000)).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::NotFound);

        let err = service.list_reviews(&ghost, ReviewSort::RecencyDesc).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::NotFound);

        let err = service.get_liquor("not-an-id").await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_delete_review_errors() {
        let (service, _) = setup();
        let liquor = service.create_liquor(whisky()).await.unwrap();
        service.add_review(&liquor.id, "좋아요").await.unwrap();

        let err = service
            .delete_review(&liquor.id, ReviewRef::Position(1))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidInput);

        let err = service
            .delete_review(&liquor.id, ReviewRef::Id(ids::new_document_id()))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::ReviewNotFound { .. }));

        let err = service
            .delete_review(&ids::new_document_id(), ReviewRef::Position(0))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::LiquorNotFound(_)));

        let reviews = service.list_reviews(&liquor.id, ReviewSort::RecencyDesc).await.unwrap();
        assert_eq!(reviews.len(), 1);
    }

    #[tokio::test]
    async fn test_review_content_length() {
        let (service, _) = setup();
        let liquor = service.create_liquor(whisky()).await.unwrap();

        let err = service.add_review(&liquor.id, "   ").await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidInput);

        let too_long = "맛".repeat(MAX_REVIEW_CHARS + 1);
        let err = service.add_review(&liquor.id, &too_long).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidInput);

        let longest = "맛".repeat(MAX_REVIEW_CHARS);
        assert!(service.add_review(&liquor.id, &longest).await.is_ok());
    }

    #[tokio::test]
    async fn test_store_listing() {
        let (service, _) = setup();
        let liquor = service.create_liquor(whisky()).await.unwrap();

        service.add_store(&liquor.id, shop("Cellar", 52000)).await.unwrap();
        let cheap = service.add_store(&liquor.id, shop("Bottle Shop", 48000)).await.unwrap();
        service.add_store(&liquor.id, shop("Aroma", 52000)).await.unwrap();

        let by_price = service.list_stores(&liquor.id, StoreSort::PriceAsc).await.unwrap();
        let names: Vec<_> = by_price.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Bottle Shop", "Aroma", "Cellar"]);

        service.delete_store(&liquor.id, &cheap.id).await.unwrap();
        let by_name = service.list_stores(&liquor.id, StoreSort::NameAsc).await.unwrap();
        let names: Vec<_> = by_name.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Aroma", "Cellar"]);

        let err = service.delete_store(&liquor.id, &cheap.id).await.unwrap_err();
        assert!(matches!(err, CatalogError::StoreNotFound { .. }));

        let err = service.add_store(&liquor.id, shop("  ", 100)).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_create_liquor_validation() {
        let (service, _) = setup();

        let mut bad_rating = whisky();
        bad_rating.rating = 5.5;
        assert_eq!(
            service.create_liquor(bad_rating).await.unwrap_err().kind(),
            FailureKind::InvalidInput
        );

        let mut bad_profile = whisky();
        bad_profile.profile.finish = f64::NAN;
        assert_eq!(
            service.create_liquor(bad_profile).await.unwrap_err().kind(),
            FailureKind::InvalidInput
        );

        let mut unnamed = whisky();
        unnamed.name = " ".to_string();
        assert_eq!(
            service.create_liquor(unnamed).await.unwrap_err().kind(),
            FailureKind::InvalidInput
        );
    }

    #[tokio::test]
    async fn test_list_and_delete_liquors() {
        let (service, _) = setup();
        let first = service.create_liquor(whisky()).await.unwrap();
        let second = service.create_liquor(whisky()).await.unwrap();
        service.add_review(&first.id, "좋아요").await.unwrap();

        let all = service.list_liquors(None, 20).await.unwrap();
        assert_eq!(all.len(), 2);

        let page = service.list_liquors(None, 1).await.unwrap();
        assert_eq!(page.len(), 1);

        let after_first = service.list_liquors(Some(first.updated_at), 20).await.unwrap();
        assert!(after_first.iter().all(|s| s.id != first.id));

        assert!(service.list_liquors(None, 0).await.is_err());
        assert!(service.list_liquors(None, MAX_PAGE_SIZE + 1).await.is_err());

        service.delete_liquor(&first.id).await.unwrap();
        let err = service.list_reviews(&first.id, ReviewSort::RecencyDesc).await.unwrap_err();
        assert!(matches!(err, CatalogError::LiquorNotFound(_)));
        assert!(service.get_liquor(&second.id).await.is_ok());

        let err = service.delete_liquor(&first.id).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::NotFound);
    }

    #[tokio::test]
    async fn test_concurrent_adds_and_deletes_do_not_lose_updates() {
        let (service, _) = setup();
        let service = Arc::new(service);
        let liquor = service.create_liquor(whisky()).await.unwrap();

        let seed = service.add_review(&liquor.id, "지울 리뷰").await.unwrap();

        let mut handles = Vec::new();
        for i in 0..16 {
            let service = Arc::clone(&service);
            let liquor_id = liquor.id.clone();
            handles.push(tokio::spawn(async move {
                service.add_review(&liquor_id, &format!("리뷰 {}", i)).await.map(|_| ())
            }));
        }
        {
            let service = Arc::clone(&service);
            let liquor_id = liquor.id.clone();
            let seed_id = seed.id.clone();
            handles.push(tokio::spawn(async move {
                service.delete_review(&liquor_id, ReviewRef::Id(seed_id)).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let reviews = service.list_reviews(&liquor.id, ReviewSort::RecencyDesc).await.unwrap();
        assert_eq!(reviews.len(), 16);
        assert!(reviews.iter().all(|r| r.id != seed.id));
    }
}
