//! # Table Client
//!
//! Typed async handle to a [`TableActor`](crate::framework::TableActor).

use crate::framework::entity::TableRow;
use crate::framework::error::StoreError;
use crate::framework::message::{ChangeReceiver, TableRequest};
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `TableActor`.
///
/// Holds only a sender, so cloning is cheap. The table task stops once every clone is dropped.
pub struct TableClient<T: TableRow> {
    sender: mpsc::Sender<TableRequest<T>>,
}

impl<T: TableRow> Clone for TableClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: TableRow> TableClient<T> {
    pub fn new(sender: mpsc::Sender<TableRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, StoreError>>) -> TableRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::TableClosed)?;
        response.await.map_err(|_| StoreError::TableDropped)?
    }

    pub async fn insert(&self, row: T) -> Result<T::Id, StoreError> {
        self.request(|respond_to| TableRequest::Insert { row, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| TableRequest::Get { id, respond_to })
            .await
    }

    pub async fn select(
        &self,
        filter: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Result<Vec<T>, StoreError> {
        let filter = Box::new(filter);
        self.request(|respond_to| TableRequest::Select { filter, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, StoreError> {
        self.request(|respond_to| TableRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        self.request(|respond_to| TableRequest::Delete { id, respond_to })
            .await
    }

    pub async fn subscribe(&self, id: T::Id) -> Result<ChangeReceiver<T>, StoreError> {
        self.request(|respond_to| TableRequest::Subscribe { id, respond_to })
            .await
    }

    pub async fn subscribers(&self, id: T::Id) -> Result<usize, StoreError> {
        self.request(|respond_to| TableRequest::Subscribers { id, respond_to })
            .await
    }
}
