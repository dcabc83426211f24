//! User record queries
//!
//! One parameterized statement per function. Timestamps are taken from the
//! application clock, once per call.

use chrono::Utc;
use sqlx::PgPool;
use user_core::{NewUser, Result, StoreError, User, UserChanges, UserId};

const ENTITY: &str = "User";

/// Insert a new user and return the stored row
///
/// `created_at` and `updated_at` receive the same instant.
pub async fn create(pool: &PgPool, user: NewUser) -> Result<User> {
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, created_at, updated_at)
         VALUES ($1, $2, $3, $3)
         RETURNING id, name, email, created_at, updated_at",
    )
    .bind(&user.name)
    .bind(&user.email)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get a user by ID
pub async fn get_by_id(pool: &PgPool, id: UserId) -> Result<User> {
    sqlx::query_as::<_, User>(
        "SELECT id, name, email, created_at, updated_at
         FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| StoreError::not_found(ENTITY, id))
}

/// Replace name and email, refresh `updated_at`, and return the updated row
pub async fn update(pool: &PgPool, id: UserId, changes: UserChanges) -> Result<User> {
    let now = Utc::now();

    sqlx::query_as::<_, User>(
        "UPDATE users
         SET name = $1, email = $2, updated_at = $3
         WHERE id = $4
         RETURNING id, name, email, created_at, updated_at",
    )
    .bind(&changes.name)
    .bind(&changes.email)
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| StoreError::not_found(ENTITY, id))
}

/// Delete a user
///
/// Returns the number of rows removed. Deleting an id that does not exist
/// removes nothing and is not an error.
pub async fn delete(pool: &PgPool, id: UserId) -> Result<u64> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
