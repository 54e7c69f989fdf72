//! Storage error types for flowdoc-storage.
//!
//! [`StorageError`] covers all anticipated failure modes in the storage
//! layer: serialization, database access, migration, and missing documents.
//! The adapter façade absorbs these internally; nothing here reaches a
//! diagram collaborator.

use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// JSON serialization or deserialization failed (corrupt payload).
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The underlying SQLite database reported an error.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A schema migration failed to apply.
    #[error("migration error: {0}")]
    Migration(String),

    /// No document has ever been saved under the given namespace key.
    #[error("document not found: namespace='{namespace}'")]
    DocumentNotFound { namespace: String },
}
