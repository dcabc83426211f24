//! User Server Library
//!
//! gRPC service exposing create/get/update/delete over the `users` table,
//! plus the process lifecycle that hosts it.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod proto;
pub mod server;
pub mod services;

// Re-export commonly used types for convenience
pub use crate::config::ServerConfig;
pub use error::{Result, ServerError};
pub use lifecycle::{Lifecycle, Phase};
pub use services::UserService;
