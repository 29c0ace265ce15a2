use crate::clients::row_client::RowClient;
use crate::framework::{StoreError, TableClient};
use crate::model::{OrderId, Review, ReviewId};
use crate::review_actor::ReviewRowError;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the reviews table.
#[derive(Clone)]
pub struct ReviewClient {
    inner: TableClient<Review>,
}

impl ReviewClient {
    pub fn new(inner: TableClient<Review>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, review), fields(canteen_id = %review.canteen_id))]
    pub async fn insert_review(&self, review: Review) -> Result<ReviewId, ReviewRowError> {
        debug!(rating = review.rating.get(), "insert_review called");
        self.inner.insert(review).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn for_order(&self, order_id: OrderId) -> Result<Vec<Review>, ReviewRowError> {
        self.inner
            .select(move |r: &Review| r.order_id == Some(order_id))
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl RowClient<Review> for ReviewClient {
    type Error = ReviewRowError;

    fn inner(&self) -> &TableClient<Review> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        e.into_row_error::<ReviewRowError>()
            .unwrap_or_else(|other| ReviewRowError::TableCommunicationError(other.to_string()))
    }
}
