//! Error types for the todo service.
//!
//! Library errors are concrete `thiserror` enums; the binary boundary uses
//! `anyhow`. Handler-level input and timeout failures never become typed
//! errors: they are surfaced to the client as plain strings inside the
//! response envelope.

use thiserror::Error;

/// Errors surfaced by the storage layer.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Any failure from the database driver.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenient Result type alias for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
