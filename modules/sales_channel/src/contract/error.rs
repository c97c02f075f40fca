//! Contract error types for the sales channel service
//!
//! These errors are transport-agnostic and used for inter-module communication.

use thiserror::Error;

/// Stable category of a [`SalesChannelError`], for callers mapping errors to
/// their own responses (e.g. 404 for `NotFound`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    DuplicateError,
    NotImplemented,
    InvalidData,
    DbError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::DuplicateError => "duplicate_error",
            Self::NotImplemented => "not_implemented",
            Self::InvalidData => "invalid_data",
            Self::DbError => "database_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sales channel service errors
#[derive(Debug, Error)]
pub enum SalesChannelError {
    /// No sales channel matches the id
    #[error("Sales channel with id {id} was not found")]
    NotFound { id: String },

    /// A uniqueness constraint was violated on write
    #[error("Sales channel already exists: {message}")]
    Duplicate { message: String },

    /// Operation is declared but not enabled
    #[error("Sales channel operation '{operation}' is not implemented")]
    NotImplemented { operation: &'static str },

    /// Input failed validation
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// Infrastructure failure, passed through unchanged
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl SalesChannelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Duplicate { .. } => ErrorKind::DuplicateError,
            Self::NotImplemented { .. } => ErrorKind::NotImplemented,
            Self::InvalidData { .. } => ErrorKind::InvalidData,
            Self::Storage(_) => ErrorKind::DbError,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }
}

/// Structured code of a [`StoreError`], matched by transaction error hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    UniqueViolation,
    ForeignKeyViolation,
    TransactionClosed,
    Other,
}

/// Errors surfaced by storage collaborators (repository, transaction runner,
/// event publisher)
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("transaction is no longer active")]
    TransactionClosed,

    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

impl StoreError {
    pub fn code(&self) -> StoreErrorCode {
        match self {
            Self::UniqueViolation(_) => StoreErrorCode::UniqueViolation,
            Self::ForeignKeyViolation(_) => StoreErrorCode::ForeignKeyViolation,
            Self::TransactionClosed => StoreErrorCode::TransactionClosed,
            Self::Database(_) => StoreErrorCode::Other,
        }
    }
}
