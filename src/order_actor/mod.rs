//! # Orders Table
//!
//! Backend-side storage for [`Order`] rows.
//!
//! - [`entity`] - [`TableRow`](crate::framework::TableRow) implementation for [`Order`]
//! - [`error`] - [`OrderError`]
//! - [`new()`] - Factory function that creates the table actor and its client

pub mod entity;
pub mod error;

pub use error::*;

use crate::framework::{TableActor, TableClient};
use crate::model::Order;

/// Creates a new orders table and its client.
pub fn new(buffer_size: usize) -> (TableActor<Order>, TableClient<Order>) {
    TableActor::new(buffer_size)
}
