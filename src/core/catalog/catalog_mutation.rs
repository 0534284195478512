// Structural changes to a liquor's embedded `reviews` and `stores` arrays.
//
// Store implementations receive an EmbeddedMutation and must apply it to a
// single liquor document atomically. `apply` is the only place where array
// semantics live, so every backend behaves the same way.

use super::catalog_models::{Liquor, Review, ReviewRef, Store};
use chrono::{DateTime, Utc};

/// One change to a liquor's embedded collections.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddedMutation {
    /// Append a review to the end of `reviews`
    PushReview(Review),
    /// Replace the content of a review and bump its `updated_at`
    SetReviewContent {
        review_id: String,
        content: String,
        updated_at: DateTime<Utc>,
    },
    /// Add one like. Leaves `updated_at` alone
    IncrementReviewLikes { review_id: String },
    /// Remove one review; the array is compacted
    PullReview(ReviewRef),
    /// Append a store to the end of `stores`
    PushStore(Store),
    /// Remove one store by id; the array is compacted
    PullStore { store_id: String },
}

impl EmbeddedMutation {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            EmbeddedMutation::PushReview(_) => "push_review",
            EmbeddedMutation::SetReviewContent { .. } => "set_review_content",
            EmbeddedMutation::IncrementReviewLikes { .. } => "increment_review_likes",
            EmbeddedMutation::PullReview(_) => "pull_review",
            EmbeddedMutation::PushStore(_) => "push_store",
            EmbeddedMutation::PullStore { .. } => "pull_store",
        }
    }

    /// Apply the change to `liquor`. Returns whether anything was modified.
    ///
    /// Pushes are refused when the id is already present in the array, which
    /// keeps ids unique within their parent.
    pub fn apply(&self, liquor: &mut Liquor) -> bool {
        match self {
            EmbeddedMutation::PushReview(review) => {
                if liquor.reviews.iter().any(|r| r.id == review.id) {
                    return false;
                }
                liquor.reviews.push(review.clone());
                true
            }
            EmbeddedMutation::SetReviewContent {
                review_id,
                content,
                updated_at,
            } => match liquor.reviews.iter_mut().find(|r| &r.id == review_id) {
                Some(review) => {
                    review.content = content.clone();
                    review.updated_at = *updated_at;
                    true
                }
                None => false,
            },
            EmbeddedMutation::IncrementReviewLikes { review_id } => {
                match liquor.reviews.iter_mut().find(|r| &r.id == review_id) {
                    Some(review) => {
                        review.likes = review.likes.saturating_add(1);
                        true
                    }
                    None => false,
                }
            }
            EmbeddedMutation::PullReview(target) => {
                let position = match target {
                    ReviewRef::Id(id) => liquor.reviews.iter().position(|r| &r.id == id),
                    ReviewRef::Position(index) => Some(*index).filter(|i| *i < liquor.reviews.len()),
                };
                match position {
                    Some(index) => {
                        // Vec::remove shifts the tail down, no gaps left behind
                        liquor.reviews.remove(index);
                        true
                    }
                    None => false,
                }
            }
            EmbeddedMutation::PushStore(store) => {
                if liquor.stores.iter().any(|s| s.id == store.id) {
                    return false;
                }
                liquor.stores.push(store.clone());
                true
            }
            EmbeddedMutation::PullStore { store_id } => {
                match liquor.stores.iter().position(|s| &s.id == store_id) {
                    Some(index) => {
                        liquor.stores.remove(index);
                        true
                    }
                    None => false,
                }
            }
        }
    }
}
