use super::error::ReviewRowError;
use crate::framework::TableRow;
use crate::model::{Review, ReviewId};
use async_trait::async_trait;
use std::convert::Infallible;

/// Reviews are append-only. The comment is trimmed on insert and a blank comment is stored
/// as `None`.
#[async_trait]
impl TableRow for Review {
    type Id = ReviewId;
    type Update = Infallible;
    type Error = ReviewRowError;
    const TABLE: &'static str = "reviews";

    fn id(&self) -> ReviewId {
        self.id
    }

    async fn on_insert(&mut self) -> Result<(), ReviewRowError> {
        if self.customer_name.trim().is_empty() {
            return Err(ReviewRowError::ValidationError("customer name is required".into()));
        }
        self.comment = self
            .comment
            .take()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        Ok(())
    }

    fn on_update(&mut self, update: Infallible) -> Result<(), ReviewRowError> {
        match update {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rating;
    use chrono::Utc;

    fn review(comment: Option<&str>) -> Review {
        Review {
            id: ReviewId::new(),
            canteen_id: "c1".into(),
            order_id: None,
            customer_name: "Hira".into(),
            rating: Rating::try_from(4).unwrap(),
            comment: comment.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_blank_comment_becomes_none() {
        let mut row = review(Some("   "));
        row.on_insert().await.unwrap();
        assert_eq!(row.comment, None);

        let mut row = review(Some("  tasty  "));
        row.on_insert().await.unwrap();
        assert_eq!(row.comment.as_deref(), Some("tasty"));
    }

    #[tokio::test]
    async fn test_requires_customer_name() {
        let mut row = review(None);
        row.customer_name = " ".into();
        assert!(row.on_insert().await.is_err());
    }
}
