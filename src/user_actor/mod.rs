//! # Users Table
//!
//! Accounts (profile + password hash) plus the argon2 helpers used at sign-up and sign-in.

pub mod entity;
pub mod error;
pub mod password;

pub use error::*;

use crate::framework::{TableActor, TableClient};
use crate::model::Account;

/// Creates a new users table and its client.
pub fn new(buffer_size: usize) -> (TableActor<Account>, TableClient<Account>) {
    TableActor::new(buffer_size)
}
