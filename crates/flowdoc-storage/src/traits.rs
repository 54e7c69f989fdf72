//! The [`DocumentStore`] trait defining the storage contract for graph
//! documents.
//!
//! Storage is keyed by a *namespace*: a string identifying which document a
//! call addresses, so multiple documents can coexist in one backend without
//! collision. Nothing prevents two independent adapter instances from
//! sharing a namespace and racing; that hazard belongs to the caller.
//!
//! All backends (InMemoryStore, SqliteStore) implement this trait with
//! identical observable semantics, ensuring they are fully swappable.

use flowdoc_core::GraphDocument;

use crate::error::StorageError;

/// The storage contract for graph documents.
///
/// The trait is synchronous (not async): store I/O is local, and the
/// adapter's mutate-persist-notify sequence relies on a read immediately
/// observing the preceding write.
pub trait DocumentStore {
    /// Loads the document stored under `namespace`.
    ///
    /// Returns [`StorageError::DocumentNotFound`] when the key has never
    /// been written, and [`StorageError::Serialization`] when the stored
    /// payload is not a valid document.
    fn load(&self, namespace: &str) -> Result<GraphDocument, StorageError>;

    /// Saves `doc` under `namespace`, replacing any previous value.
    fn save(&mut self, namespace: &str, doc: &GraphDocument) -> Result<(), StorageError>;

    /// Returns `true` if any payload exists under `namespace`.
    fn contains(&self, namespace: &str) -> Result<bool, StorageError>;

    /// Deletes the document stored under `namespace`.
    ///
    /// Returns [`StorageError::DocumentNotFound`] if nothing was stored.
    fn delete(&mut self, namespace: &str) -> Result<(), StorageError>;

    /// Lists all namespace keys with a stored document, sorted.
    fn list_namespaces(&self) -> Result<Vec<String>, StorageError>;
}
