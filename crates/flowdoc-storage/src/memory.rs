//! In-memory implementation of [`DocumentStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests, ephemeral sessions,
//! and anywhere persistence isn't needed. Documents are stored as serialized
//! JSON strings so the backend exercises the same parse path as SQLite,
//! including recovery from corrupt payloads.

use std::collections::HashMap;

use flowdoc_core::GraphDocument;

use crate::error::StorageError;
use crate::traits::DocumentStore;

/// In-memory implementation of [`DocumentStore`].
///
/// All data lives in a `HashMap` of serialized documents keyed by
/// namespace, with identical observable semantics to the SQLite backend.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    documents: HashMap<String, String>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        InMemoryStore::default()
    }

    /// Inserts a raw payload under `namespace`, bypassing serialization.
    ///
    /// Intended for tests that need to stage corrupt or legacy data.
    pub fn insert_raw(&mut self, namespace: &str, payload: impl Into<String>) {
        self.documents.insert(namespace.to_string(), payload.into());
    }
}

impl DocumentStore for InMemoryStore {
    fn load(&self, namespace: &str) -> Result<GraphDocument, StorageError> {
        let body = self
            .documents
            .get(namespace)
            .ok_or_else(|| StorageError::DocumentNotFound {
                namespace: namespace.to_string(),
            })?;
        let doc = serde_json::from_str(body)?;
        Ok(doc)
    }

    fn save(&mut self, namespace: &str, doc: &GraphDocument) -> Result<(), StorageError> {
        let body = serde_json::to_string(doc)?;
        self.documents.insert(namespace.to_string(), body);
        Ok(())
    }

    fn contains(&self, namespace: &str) -> Result<bool, StorageError> {
        Ok(self.documents.contains_key(namespace))
    }

    fn delete(&mut self, namespace: &str) -> Result<(), StorageError> {
        self.documents
            .remove(namespace)
            .ok_or_else(|| StorageError::DocumentNotFound {
                namespace: namespace.to_string(),
            })?;
        Ok(())
    }

    fn list_namespaces(&self) -> Result<Vec<String>, StorageError> {
        let mut keys: Vec<String> = self.documents.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowdoc_core::{Node, Position};

    #[test]
    fn load_missing_namespace_is_not_found() {
        let store = InMemoryStore::new();
        let result = store.load("absent");
        match result.unwrap_err() {
            StorageError::DocumentNotFound { namespace } => assert_eq!(namespace, "absent"),
            other => panic!("expected DocumentNotFound, got: {:?}", other),
        }
    }

    #[test]
    fn save_load_roundtrip() {
        let mut store = InMemoryStore::new();
        let mut doc = GraphDocument::empty();
        doc.nodes.push(Node::new("n1", Position::new(3.0, 4.0)));

        store.save("canvas", &doc).unwrap();
        let loaded = store.load("canvas").unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn namespaces_do_not_collide() {
        let mut store = InMemoryStore::new();
        let mut a = GraphDocument::empty();
        a.nodes.push(Node::new("only-in-a", Position::default()));

        store.save("a", &a).unwrap();
        store.save("b", &GraphDocument::empty()).unwrap();

        assert_eq!(store.load("a").unwrap(), a);
        assert!(store.load("b").unwrap().nodes.is_empty());
    }

    #[test]
    fn corrupt_payload_is_serialization_error() {
        let mut store = InMemoryStore::new();
        store.insert_raw("broken", "{not json");
        assert!(matches!(
            store.load("broken"),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn delete_and_contains() {
        let mut store = InMemoryStore::new();
        store.save("doc", &GraphDocument::empty()).unwrap();
        assert!(store.contains("doc").unwrap());

        store.delete("doc").unwrap();
        assert!(!store.contains("doc").unwrap());
        assert!(store.delete("doc").is_err());
    }

    #[test]
    fn list_namespaces_sorted() {
        let mut store = InMemoryStore::new();
        store.save("gamma", &GraphDocument::empty()).unwrap();
        store.save("alpha", &GraphDocument::empty()).unwrap();
        store.save("beta", &GraphDocument::empty()).unwrap();

        assert_eq!(store.list_namespaces().unwrap(), ["alpha", "beta", "gamma"]);
    }
}
