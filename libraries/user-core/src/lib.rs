//! User Service Core
//!
//! Storage-agnostic domain types, the store trait, and error handling shared
//! by the storage layer and the RPC server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `NewUser`, `UserChanges`, `UserId`
//! - **Store Trait**: `UserStore`, one method per remote operation
//! - **Error Handling**: `StoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use user_core::{NewUser, UserId};
//!
//! let new_user = NewUser::new("Alice", "alice@example.com");
//! assert_eq!(new_user.name, "Alice");
//!
//! // Remote ids are unsigned; only those that fit the store key are valid.
//! assert!(UserId::try_from(1_u64).is_ok());
//! assert!(UserId::try_from(u64::MAX).is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{Result, StoreError};
pub use store::UserStore;
pub use types::{IdOutOfRange, NegativeId, NewUser, User, UserChanges, UserId};
