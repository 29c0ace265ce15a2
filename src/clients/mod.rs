//! Type-safe wrappers around [`TableClient`](crate::framework::TableClient).
//!
//! Each wrapper maps [`StoreError`](crate::framework::StoreError) into its table's own error
//! type so callers never see the engine's error.

pub mod catalog_client;
pub mod order_client;
pub mod review_client;
pub mod row_client;
pub mod user_client;

pub use catalog_client::*;
pub use order_client::*;
pub use review_client::*;
pub use row_client::*;
pub use user_client::*;
