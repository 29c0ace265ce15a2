//! # Reviews Table

pub mod entity;
pub mod error;

pub use error::*;

use crate::framework::{TableActor, TableClient};
use crate::model::Review;

/// Creates a new reviews table and its client.
pub fn new(buffer_size: usize) -> (TableActor<Review>, TableClient<Review>) {
    TableActor::new(buffer_size)
}
