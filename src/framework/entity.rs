//! # TableRow Trait
//!
//! The `TableRow` trait is the contract every stored record (order, review, account, menu item,
//! canteen) implements so a generic [`TableActor`](crate::framework::TableActor) can keep it.
//!
//! # Architecture Note
//! The table actor handles storage, change fan-out and error plumbing once. A row type only
//! says how it is identified and how it reacts to inserts and updates. Associated types keep
//! the payloads apart: an `OrderUpdate` cannot be sent to the reviews table.
//!
//! # Provided Methods (Hooks)
//! - [`TableRow::on_insert`] runs before the row is stored. The default accepts the row.
//!
//! [`TableRow::on_update`] has no default: rows that are never updated return an error.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record must implement to be stored by a `TableActor`.
///
/// Ids are chosen by the row itself (client-generated UUIDs, emails, slugs), never by the
/// table, so an insert carries the full row.
#[async_trait]
pub trait TableRow: Clone + Send + Sync + 'static {
    /// Primary key of the row.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Partial update accepted by [`TableRow::on_update`].
    type Update: Send + Sync + Debug;

    /// Row-level validation error, boxed into `StoreError::RowError` by the table.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Table name used in logs and error messages.
    const TABLE: &'static str;

    /// Primary key of this row.
    fn id(&self) -> Self::Id;

    /// Called before the row is stored. Reject the row by returning an error.
    async fn on_insert(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update in place. The table publishes the new row to subscribers on success.
    fn on_update(&mut self, update: Self::Update) -> Result<(), Self::Error>;
}
