//! # Store Error Types
//!
//! Error types for the Cart Store and its persistence layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error) ──┐                                        │
//! │                               ▼                                         │
//! │  JSON Error ────────────► StoreError (this module)                     │
//! │  (serde_json::Error)          │                                         │
//! │                               ▼                                         │
//! │  Caller decides: surface as a toast, retry, or ignore.                 │
//! │  The in-memory cart stays authoritative either way.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutations hand persistence failures back to the caller instead of
//! swallowing them; a failed mirror write never unwinds the in-memory
//! update that preceded it.

use thiserror::Error;

/// Cart Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not open or create the backing key-value store.
    ///
    /// ## When This Occurs
    /// - Database file can't be created (permissions, disk full)
    /// - Pool construction fails
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Schema migration failed while opening the key-value store.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Reading a slot from the key-value store failed.
    ///
    /// Hydration treats this as reported-but-non-fatal: the store starts
    /// empty and stays usable for the session.
    #[error("Storage read failed: {0}")]
    ReadFailed(String),

    /// Writing a slot to the key-value store failed.
    ///
    /// The in-memory cart keeps the mutated state; the mirror is stale
    /// until the next successful write.
    #[error("Storage write failed: {0}")]
    WriteFailed(String),

    /// The persisted blob could not be serialized or deserialized.
    ///
    /// On hydration this is recoverable: the store falls back to an empty
    /// cart and logs a warning instead of failing startup.
    #[error("Cart blob is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Convert sqlx errors to StoreError.
///
/// Connection-lifecycle failures map to `ConnectionFailed`; everything else
/// is a query-time failure and maps to `ReadFailed`. Write paths re-wrap
/// into `WriteFailed` at the call site, where the direction is known.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => {
                StoreError::ConnectionFailed("Connection pool exhausted".to_string())
            }
            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("Pool is closed".to_string()),
            _ => StoreError::ReadFailed(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
