//! Plain data types shared by the client core and the backend tables.
//!
//! Records that live in a table implement [`TableRow`](crate::framework::TableRow) in the
//! matching `*_actor` module.

pub mod menu;
pub mod order;
pub mod review;
pub mod user;

pub use menu::*;
pub use order::*;
pub use review::*;
pub use user::*;
