//! SQLite implementation of [`DocumentStore`].
//!
//! [`SqliteStore`] persists documents in a SQLite database with WAL mode
//! and automatic schema migrations. The document is stored as a JSON TEXT
//! column via serde_json; a save upserts the whole body for its namespace.

use rusqlite::{params, Connection, OptionalExtension};

use flowdoc_core::GraphDocument;

use crate::error::StorageError;
use crate::traits::DocumentStore;

/// SQLite-backed implementation of [`DocumentStore`].
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a SQLite database at `path`.
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let conn = crate::schema::open_database(path)?;
        Ok(SqliteStore { conn })
    }

    /// Opens an in-memory SQLite database (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = crate::schema::open_in_memory()?;
        Ok(SqliteStore { conn })
    }

    /// Fetches the raw stored body for a namespace, if any.
    fn fetch_body(&self, namespace: &str) -> Result<Option<String>, StorageError> {
        let body = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE namespace = ?1",
                params![namespace],
                |row| row.get(0),
            )
            .optional()?;
        Ok(body)
    }
}

impl DocumentStore for SqliteStore {
    fn load(&self, namespace: &str) -> Result<GraphDocument, StorageError> {
        let body = self
            .fetch_body(namespace)?
            .ok_or_else(|| StorageError::DocumentNotFound {
                namespace: namespace.to_string(),
            })?;
        let doc = serde_json::from_str(&body)?;
        Ok(doc)
    }

    fn save(&mut self, namespace: &str, doc: &GraphDocument) -> Result<(), StorageError> {
        let body = serde_json::to_string(doc)?;
        self.conn.execute(
            "INSERT INTO documents (namespace, body) VALUES (?1, ?2)
             ON CONFLICT(namespace) DO UPDATE SET body = excluded.body",
            params![namespace, body],
        )?;
        Ok(())
    }

    fn contains(&self, namespace: &str) -> Result<bool, StorageError> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM documents WHERE namespace = ?1)",
            params![namespace],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn delete(&mut self, namespace: &str) -> Result<(), StorageError> {
        let rows = self.conn.execute(
            "DELETE FROM documents WHERE namespace = ?1",
            params![namespace],
        )?;
        if rows == 0 {
            return Err(StorageError::DocumentNotFound {
                namespace: namespace.to_string(),
            });
        }
        Ok(())
    }

    fn list_namespaces(&self) -> Result<Vec<String>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT namespace FROM documents ORDER BY namespace")?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        let mut namespaces = Vec::new();
        for row in rows {
            namespaces.push(row?);
        }
        Ok(namespaces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowdoc_core::{Edge, Node, Position, Viewport};

    #[test]
    fn save_load_roundtrip_in_memory() {
        let mut store = SqliteStore::in_memory().unwrap();

        let mut doc = GraphDocument::empty();
        doc.nodes.push(Node::new("n1", Position::new(1.0, 2.0)));
        doc.edges.push(Edge::new("e1", "n1", "n1"));
        doc.metadata.viewport = Viewport {
            x: 5.0,
            y: -5.0,
            scale: 2.0,
        };

        store.save("canvas", &doc).unwrap();
        assert_eq!(store.load("canvas").unwrap(), doc);
    }

    #[test]
    fn save_overwrites_previous_body() {
        let mut store = SqliteStore::in_memory().unwrap();

        let mut first = GraphDocument::empty();
        first.nodes.push(Node::new("n1", Position::default()));
        store.save("canvas", &first).unwrap();

        let second = GraphDocument::empty();
        store.save("canvas", &second).unwrap();

        assert!(store.load("canvas").unwrap().nodes.is_empty());
    }

    #[test]
    fn load_missing_namespace_is_not_found() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(matches!(
            store.load("absent"),
            Err(StorageError::DocumentNotFound { .. })
        ));
    }

    #[test]
    fn contains_delete_list() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.save("b", &GraphDocument::empty()).unwrap();
        store.save("a", &GraphDocument::empty()).unwrap();

        assert!(store.contains("a").unwrap());
        assert_eq!(store.list_namespaces().unwrap(), ["a", "b"]);

        store.delete("a").unwrap();
        assert!(!store.contains("a").unwrap());
        assert!(matches!(
            store.delete("a"),
            Err(StorageError::DocumentNotFound { .. })
        ));
    }

    #[test]
    fn documents_survive_reopen_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.db");
        let path = path.to_str().unwrap();

        let mut doc = GraphDocument::empty();
        doc.nodes.push(Node::new("persisted", Position::default()));

        {
            let mut store = SqliteStore::new(path).unwrap();
            store.save("canvas", &doc).unwrap();
        }

        let store = SqliteStore::new(path).unwrap();
        assert_eq!(store.load("canvas").unwrap(), doc);
    }
}
