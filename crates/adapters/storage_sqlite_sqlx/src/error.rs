//! Storage-specific error type wrapping sqlx errors.

use roombook_domain::error::RoombookError;

/// Errors originating from the `SQLite` room store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The database could not be opened.
    #[error("failed to open database")]
    Connect(#[source] sqlx::Error),

    /// The embedded schema could not be applied.
    #[error("failed to apply schema migrations")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A statement against the room store failed.
    #[error("failed to {operation}")]
    Query {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl StorageError {
    /// Wrap a failed statement, naming what the repository was doing.
    pub(crate) fn query(operation: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Query { operation, source }
    }
}

impl From<StorageError> for RoombookError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
