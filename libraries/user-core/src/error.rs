/// Core error types for the user service
use thiserror::Error;

/// Result type alias using `StoreError`
pub type Result<T> = std::result::Result<T, StoreError>;

/// Per-call store failure
///
/// Each variant keeps the store's own error code (SQLSTATE for
/// PostgreSQL) when the driver reported one, so callers can tell a missing
/// row apart from every other failure.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No row matched
    #[error("{entity} not found: {id}")]
    #[allow(missing_docs)]
    NotFound { entity: String, id: String },

    /// Unique constraint violated
    #[error("Conflict ({code}): {message}")]
    #[allow(missing_docs)]
    Conflict { code: String, message: String },

    /// Any other integrity constraint violated
    #[error("Constraint violation ({code}): {message}")]
    #[allow(missing_docs)]
    Constraint { code: String, message: String },

    /// The store could not be reached or the connection broke mid-call
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Error reported by the database itself
    #[error("Database error ({}): {message}", .code.as_deref().unwrap_or("-"))]
    Database {
        /// SQLSTATE, when reported
        code: Option<String>,
        /// Driver message
        message: String,
    },

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl StoreError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Whether this error means "no such row"
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The store's error code, if it reported one
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Conflict { code, .. } | Self::Constraint { code, .. } => Some(code),
            Self::Database { code, .. } => code.as_deref(),
            Self::NotFound { .. } | Self::Unavailable(_) | Self::Other(_) => None,
        }
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        match err {
            sqlx::Error::RowNotFound => Self::not_found("row", "<unspecified>"),
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.into_owned());
                let message = db_err.message().to_string();
                match (db_err.kind(), code) {
                    (ErrorKind::UniqueViolation, Some(code)) => Self::Conflict { code, message },
                    (
                        ErrorKind::ForeignKeyViolation
                        | ErrorKind::NotNullViolation
                        | ErrorKind::CheckViolation,
                        Some(code),
                    ) => Self::Constraint { code, message },
                    (_, code) => Self::Database { code, message },
                }
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_) => Self::Unavailable(err.to_string()),
            other => Self::Other(other.to_string()),
        }
    }
}
