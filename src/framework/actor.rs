//! # Generic Table Actor
//!
//! `TableActor` is the server half of a table. It owns the rows and the change feeds of one
//! record type and processes every request sequentially, so neither the store nor the feed
//! lists need a lock.

use crate::framework::client::TableClient;
use crate::framework::entity::TableRow;
use crate::framework::error::StoreError;
use crate::framework::message::{ChangeReceiver, TableRequest};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages one table of rows.
///
/// # Concurrency Model
/// Each table runs in its own Tokio task and handles one message at a time. Mutations and
/// the notifications they trigger therefore reach subscribers in commit order.
///
/// # Change Feeds
/// `Subscribe { id }` hands out the receiving half of an unbounded channel. Every successful
/// insert or update of that row sends the new row to each open feed. A feed whose receiver
/// was dropped is pruned on the next publish, which is how unsubscribing works. Deleting a
/// row drops its senders so the feeds end.
///
/// # Usage Pattern
///
/// ```rust,ignore
/// let (actor, client) = TableActor::<Order>::new(32);
/// tokio::spawn(actor.run());
/// let id = client.insert(order).await?;
/// let mut feed = client.subscribe(id.clone()).await?;
/// ```
pub struct TableActor<T: TableRow> {
    receiver: mpsc::Receiver<TableRequest<T>>,
    store: HashMap<T::Id, T>,
    subscribers: HashMap<T::Id, Vec<mpsc::UnboundedSender<T>>>,
}

impl<T: TableRow> TableActor<T> {
    /// Creates a new `TableActor` and its associated `TableClient`.
    ///
    /// `buffer_size` is the request channel capacity; clients wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, TableClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            subscribers: HashMap::new(),
        };
        (actor, TableClient::new(sender))
    }

    /// Runs the table's event loop until every client has been dropped.
    pub async fn run(mut self) {
        let table = T::TABLE;
        info!(table, "Table started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                TableRequest::Insert { mut row, respond_to } => {
                    let id = row.id();
                    debug!(table, %id, "Insert");
                    if self.store.contains_key(&id) {
                        warn!(table, %id, "Duplicate key");
                        let _ = respond_to.send(Err(StoreError::Conflict(id.to_string())));
                        continue;
                    }
                    if let Err(e) = row.on_insert().await {
                        warn!(table, %id, error = %e, "on_insert failed");
                        let _ = respond_to.send(Err(StoreError::RowError(Box::new(e))));
                        continue;
                    }
                    self.store.insert(id.clone(), row.clone());
                    self.publish(&id, &row);
                    info!(table, %id, size = self.store.len(), "Inserted");
                    let _ = respond_to.send(Ok(id));
                }
                TableRequest::Get { id, respond_to } => {
                    let row = self.store.get(&id).cloned();
                    debug!(table, %id, found = row.is_some(), "Get");
                    let _ = respond_to.send(Ok(row));
                }
                TableRequest::Select { filter, respond_to } => {
                    let rows: Vec<T> = self.store.values().filter(|r| filter(r)).cloned().collect();
                    debug!(table, matched = rows.len(), "Select");
                    let _ = respond_to.send(Ok(rows));
                }
                TableRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(table, %id, ?update, "Update");
                    let Some(row) = self.store.get_mut(&id) else {
                        warn!(table, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = row.on_update(update) {
                        warn!(table, %id, error = %e, "Update rejected");
                        let _ = respond_to.send(Err(StoreError::RowError(Box::new(e))));
                        continue;
                    }
                    let row = row.clone();
                    self.publish(&id, &row);
                    info!(table, %id, "Updated");
                    let _ = respond_to.send(Ok(row));
                }
                TableRequest::Delete { id, respond_to } => {
                    debug!(table, %id, "Delete");
                    if self.store.remove(&id).is_some() {
                        self.subscribers.remove(&id);
                        info!(table, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(table, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
                TableRequest::Subscribe { id, respond_to } => {
                    let (sender, feed): (_, ChangeReceiver<T>) = mpsc::unbounded_channel();
                    let feeds = self.subscribers.entry(id.clone()).or_default();
                    feeds.push(sender);
                    info!(table, %id, feeds = feeds.len(), "Subscribed");
                    let _ = respond_to.send(Ok(feed));
                }
                TableRequest::Subscribers { id, respond_to } => {
                    let count = match self.subscribers.get_mut(&id) {
                        Some(feeds) => {
                            feeds.retain(|f| !f.is_closed());
                            feeds.len()
                        }
                        None => 0,
                    };
                    debug!(table, %id, count, "Subscribers");
                    let _ = respond_to.send(Ok(count));
                }
            }
        }

        info!(table, size = self.store.len(), "Shutdown");
    }

    fn publish(&mut self, id: &T::Id, row: &T) {
        let Some(feeds) = self.subscribers.get_mut(id) else {
            return;
        };
        let before = feeds.len();
        feeds.retain(|f| f.send(row.clone()).is_ok());
        if feeds.len() < before {
            debug!(table = T::TABLE, %id, released = before - feeds.len(), "Pruned closed feeds");
        }
        if feeds.is_empty() {
            self.subscribers.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        name: String,
        value: u32,
    }

    #[derive(Debug)]
    struct Bump(u32);

    #[derive(Debug, thiserror::Error)]
    #[error("counter error: {0}")]
    struct CounterError(String);

    #[async_trait::async_trait]
    impl TableRow for Counter {
        type Id = String;
        type Update = Bump;
        type Error = CounterError;
        const TABLE: &'static str = "counters";

        fn id(&self) -> String {
            self.name.clone()
        }

        async fn on_insert(&mut self) -> Result<(), CounterError> {
            if self.name.is_empty() {
                return Err(CounterError("empty name".into()));
            }
            Ok(())
        }

        fn on_update(&mut self, update: Bump) -> Result<(), CounterError> {
            if update.0 == 0 {
                return Err(CounterError("zero bump".into()));
            }
            self.value += update.0;
            Ok(())
        }
    }

    fn counter(name: &str) -> Counter {
        Counter {
            name: name.into(),
            value: 0,
        }
    }

    #[tokio::test]
    async fn test_insert_get_update_delete() {
        let (actor, client) = TableActor::<Counter>::new(8);
        let handle = tokio::spawn(actor.run());

        let id = client.insert(counter("a")).await.unwrap();
        assert_eq!(id, "a");

        let dup = client.insert(counter("a")).await;
        assert!(matches!(dup, Err(StoreError::Conflict(_))));

        let rejected = client.insert(counter("")).await;
        assert!(matches!(rejected, Err(StoreError::RowError(_))));

        let updated = client.update("a".into(), Bump(3)).await.unwrap();
        assert_eq!(updated.value, 3);

        let zero = client.update("a".into(), Bump(0)).await;
        assert!(matches!(zero, Err(StoreError::RowError(_))));

        let missing = client.update("b".into(), Bump(1)).await;
        assert!(matches!(missing, Err(StoreError::NotFound(_))));

        client.delete("a".into()).await.unwrap();
        assert!(client.get("a".into()).await.unwrap().is_none());

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_select_filters_rows() {
        let (actor, client) = TableActor::<Counter>::new(8);
        tokio::spawn(actor.run());

        client.insert(counter("apple")).await.unwrap();
        client.insert(counter("avocado")).await.unwrap();
        client.insert(counter("banana")).await.unwrap();

        let mut rows = client
            .select(|c: &Counter| c.name.starts_with('a'))
            .await
            .unwrap();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        let names: Vec<_> = rows.into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["apple", "avocado"]);
    }

    #[tokio::test]
    async fn test_feed_receives_updates_in_commit_order() {
        let (actor, client) = TableActor::<Counter>::new(8);
        tokio::spawn(actor.run());

        client.insert(counter("a")).await.unwrap();
        let mut feed = client.subscribe("a".into()).await.unwrap();

        client.update("a".into(), Bump(1)).await.unwrap();
        client.update("a".into(), Bump(2)).await.unwrap();

        assert_eq!(feed.recv().await.unwrap().value, 1);
        assert_eq!(feed.recv().await.unwrap().value, 3);
    }

    #[tokio::test]
    async fn test_dropped_feed_is_released() {
        let (actor, client) = TableActor::<Counter>::new(8);
        tokio::spawn(actor.run());

        client.insert(counter("a")).await.unwrap();
        let feed = client.subscribe("a".into()).await.unwrap();
        let _other = client.subscribe("a".into()).await.unwrap();
        assert_eq!(client.subscribers("a".into()).await.unwrap(), 2);

        drop(feed);
        assert_eq!(client.subscribers("a".into()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_ends_feeds() {
        let (actor, client) = TableActor::<Counter>::new(8);
        tokio::spawn(actor.run());

        client.insert(counter("a")).await.unwrap();
        let mut feed = client.subscribe("a".into()).await.unwrap();
        client.delete("a".into()).await.unwrap();

        assert!(feed.recv().await.is_none());
    }
}
