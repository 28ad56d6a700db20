//! Error type for the query layer.

use thiserror::Error;

/// Errors that can occur while querying the portal data store.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The underlying data store failed (connection, timeout, malformed
    /// query). Propagated unchanged; the query layer performs no retry.
    #[error("data store error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for query-layer operations.
pub type QueryResult<T> = Result<T, QueryError>;
