/// Server error types
use std::net::SocketAddr;
use thiserror::Error;
use tonic::{metadata::MetadataValue, Code, Status};
use user_core::StoreError;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Metadata key carrying the store's own error code (SQLSTATE) to the caller
pub const STORE_ERROR_CODE_KEY: &str = "x-store-error-code";

/// Process-level failures; every one of these is fatal
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unable to connect to database: {0}")]
    Connectivity(#[source] sqlx::Error),

    #[error("Failed to listen on {addr}: {source}")]
    Listen {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serve: {0}")]
    Serve(#[from] tonic::transport::Error),

    #[error("Reflection service error: {0}")]
    Reflection(#[from] tonic_reflection::server::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ServerError {
    fn from(err: config::ConfigError) -> Self {
        ServerError::Config(err.to_string())
    }
}

/// The remote operation a store error surfaced from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Get,
    Update,
    Delete,
}

impl Operation {
    pub fn verb(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Get => "get",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Caller-visible message for a failed call
    pub fn failure_message(self) -> String {
        format!("Failed to {} user", self.verb())
    }
}

/// gRPC code for a store error
///
/// "No such row" and every other store failure stay distinct.
pub fn status_code(err: &StoreError) -> Code {
    match err {
        StoreError::NotFound { .. } => Code::NotFound,
        StoreError::Conflict { .. } => Code::AlreadyExists,
        StoreError::Constraint { .. } => Code::FailedPrecondition,
        StoreError::Unavailable(_) => Code::Unavailable,
        StoreError::Database { .. } | StoreError::Other(_) => Code::Unknown,
    }
}

/// Log a failed call and turn it into the status returned to the caller
pub fn store_status(operation: Operation, err: StoreError) -> Status {
    tracing::error!(
        operation = operation.verb(),
        error = %err,
        "{}",
        operation.failure_message()
    );

    let mut status = Status::new(status_code(&err), operation.failure_message());
    if let Some(code) = err.code() {
        match MetadataValue::try_from(code) {
            Ok(value) => {
                status.metadata_mut().insert(STORE_ERROR_CODE_KEY, value);
            }
            Err(e) => tracing::warn!("Store error code {:?} is not valid metadata: {}", code, e),
        }
    }
    status
}
