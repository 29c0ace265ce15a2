//! # Catalog Tables
//!
//! Canteens and their menu items, stored in two tables.

pub mod entity;
pub mod error;

pub use error::*;

use crate::framework::{TableActor, TableClient};
use crate::model::{Canteen, MenuItem};

pub fn new_canteens(buffer_size: usize) -> (TableActor<Canteen>, TableClient<Canteen>) {
    TableActor::new(buffer_size)
}

pub fn new_menu_items(buffer_size: usize) -> (TableActor<MenuItem>, TableClient<MenuItem>) {
    TableActor::new(buffer_size)
}
