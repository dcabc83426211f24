//! Store trait for user records

use crate::error::Result;
use crate::types::{NewUser, User, UserChanges, UserId};
use async_trait::async_trait;

/// Access to the store of record for users
///
/// Every method is a single round trip to the store. Implementations hold no
/// cached copies; the RPC layer receives one of these by injection and calls
/// it concurrently from many requests.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user, stamping `created_at` and `updated_at` with the same instant
    async fn create_user(&self, user: NewUser) -> Result<User>;

    /// Fetch a user by id
    ///
    /// Returns `StoreError::NotFound` if no row matches.
    async fn get_user(&self, id: UserId) -> Result<User>;

    /// Replace name and email and refresh `updated_at`
    ///
    /// Returns the row as stored after the update, or
    /// `StoreError::NotFound` if no row matches.
    async fn update_user(&self, id: UserId, changes: UserChanges) -> Result<User>;

    /// Delete a user
    ///
    /// Returns the number of rows removed; zero is not an error.
    async fn delete_user(&self, id: UserId) -> Result<u64>;
}
