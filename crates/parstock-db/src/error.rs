//! Error types for the parstock-db crate.

use parstock_inventory::InventoryError;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Failed to establish or acquire a database connection.
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[source] sqlx::Error),

    /// A database migration failed to apply.
    #[error("Migration failed: {0}")]
    MigrationFailed(#[source] sqlx::migrate::MigrateError),

    /// A database query failed to execute.
    #[error("Query failed: {0}")]
    QueryFailed(#[source] sqlx::Error),

    /// A stored row could not be turned back into a domain value.
    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

impl DbError {
    /// Check if this error indicates a connection problem.
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(self, DbError::ConnectionFailed(_))
            || matches!(
                self,
                DbError::QueryFailed(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_))
            )
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        DbError::QueryFailed(err)
    }
}

impl From<DbError> for InventoryError {
    fn from(err: DbError) -> Self {
        InventoryError::storage(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_error_detection() {
        assert!(DbError::QueryFailed(sqlx::Error::PoolTimedOut).is_connection_error());
        assert!(!DbError::QueryFailed(sqlx::Error::RowNotFound).is_connection_error());
        assert!(!DbError::CorruptRow("x".into()).is_connection_error());
    }

    #[test]
    fn test_into_storage_error() {
        let err: InventoryError = DbError::CorruptRow("bad status".into()).into();
        assert!(matches!(err, InventoryError::Storage(ref m) if m.contains("bad status")));
    }
}
