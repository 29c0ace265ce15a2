//! # Review Submission
//!
//! Rating and comment for a delivered order, stored as a separate record.

pub mod error;

pub use error::ReviewError;

use crate::backend::Backend;
use crate::model::{Order, OrderStatus, Rating, Review, ReviewId};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// What the user has entered so far. A rating of 0 means no star is selected yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewDraft {
    pub rating: u8,
    pub comment: String,
}

impl ReviewDraft {
    pub fn new(rating: u8, comment: impl Into<String>) -> Self {
        Self {
            rating,
            comment: comment.into(),
        }
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        Rating::try_from(self.rating).is_ok()
    }
}

pub struct ReviewSubmitter {
    backend: Arc<dyn Backend>,
}

impl ReviewSubmitter {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Stores a review of `order` written by `customer_name`.
    ///
    /// The order must be `completed` and the rating in `1..=5`; both are checked before the
    /// backend is called. The draft is only borrowed, so it survives a failed attempt.
    #[instrument(skip(self, order, draft), fields(order_id = %order.id, rating = draft.rating))]
    pub async fn submit(
        &self,
        order: &Order,
        draft: &ReviewDraft,
        customer_name: &str,
    ) -> Result<ReviewId, ReviewError> {
        if order.status != OrderStatus::Completed {
            warn!(status = %order.status, "Review before completion");
            return Err(ReviewError::NotCompleted(order.id.to_string()));
        }
        let rating = Rating::try_from(draft.rating)?;
        let comment = Some(draft.comment.trim().to_string()).filter(|c| !c.is_empty());

        let review = Review {
            id: ReviewId::new(),
            canteen_id: order.canteen_id.clone(),
            order_id: Some(order.id),
            customer_name: customer_name.to_string(),
            rating,
            comment,
            created_at: Utc::now(),
        };
        let id = self.backend.insert_review(review).await.map_err(|e| {
            warn!(error = %e, "Review insert failed");
            ReviewError::from(e)
        })?;
        info!(review_id = %id, "Review saved");
        Ok(id)
    }
}
