//! In-process table engine.
//!
//! A small relational store with per-row change feeds, used as the storage side of the
//! in-memory [`MemoryBackend`](crate::backend::MemoryBackend).
//!
//! # Main Components
//!
//! - [`TableRow`] - Trait that stored record types implement
//! - [`TableActor`] - Generic actor that owns one table and its change feeds
//! - [`TableClient`] - Typed async handle used to talk to a table
//! - [`StoreError`] - Common error type
//!
//! # Testing
//!
//! See the [`mock`] module for scripted tables that answer without a running actor.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::TableActor;
pub use client::TableClient;
pub use entity::TableRow;
pub use error::StoreError;
pub use message::{ChangeReceiver, Filter, Response, TableRequest};
