//! Runtime orchestration and lifecycle management.
//!
//! # Main Components
//!
//! - [`BackendSystem`] - Spawns the in-memory backend's tables and shuts them down
//! - [`CanteenSession`] - Per-user state: profile, cart, live order and tracker
//! - [`AppConfig`] - Settings read from the environment
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod backend_system;
pub mod config;
pub mod session;
pub mod tracing;

pub use backend_system::*;
pub use config::*;
pub use session::*;
pub use tracing::*;
