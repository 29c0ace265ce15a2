use crate::framework::{StoreError, TableClient, TableRow};
use async_trait::async_trait;

/// Trait for table-specific clients to inherit standard read operations.
///
/// Provides a default `get` on top of [`RowClient::inner`] and [`RowClient::map_error`].
#[async_trait]
pub trait RowClient<T: TableRow>: Send + Sync {
    /// The table-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic TableClient.
    fn inner(&self) -> &TableClient<T>;

    /// Map store errors to the table's error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch a row by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }
}
