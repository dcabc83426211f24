/// ID types for stored entities
use serde::{Deserialize, Serialize};
use std::fmt;

/// User identifier
///
/// Generated by the store on insert. The store key is a signed 64-bit
/// integer, while callers address users with unsigned ids, so conversion
/// from `u64` is fallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw store key
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw store key
    pub fn get(self) -> i64 {
        self.0
    }
}

/// A caller-supplied id that no stored row can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("user id {0} is outside the store key range")]
pub struct IdOutOfRange(pub u64);

impl TryFrom<u64> for UserId {
    type Error = IdOutOfRange;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        i64::try_from(value).map(Self).map_err(|_| IdOutOfRange(value))
    }
}

/// A stored key that has no caller-facing form
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("stored user id {0} is negative")]
pub struct NegativeId(pub i64);

impl TryFrom<UserId> for u64 {
    type Error = NegativeId;

    fn try_from(id: UserId) -> Result<Self, Self::Error> {
        u64::try_from(id.0).map_err(|_| NegativeId(id.0))
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
