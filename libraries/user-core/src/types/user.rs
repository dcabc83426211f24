/// User domain type
use super::UserId;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// User account, as held by the store of record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    /// Store-generated identifier, immutable once assigned
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Set once on insert
    pub created_at: DateTime<Utc>,

    /// Set on insert and refreshed by every successful update
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creation time in RFC3339 form (UTC, second precision)
    pub fn created_at_rfc3339(&self) -> String {
        rfc3339(self.created_at)
    }

    /// Last update time in RFC3339 form (UTC, second precision)
    pub fn updated_at_rfc3339(&self) -> String {
        rfc3339(self.updated_at)
    }
}

fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Fields supplied by the caller when creating a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
}

impl NewUser {
    /// Create the insert payload
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Replacement values for the mutable fields of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserChanges {
    /// New display name
    pub name: String,
    /// New contact email
    pub email: String,
}

impl UserChanges {
    /// Create the update payload
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
