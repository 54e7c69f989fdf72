//! The canonical graph document and its entity types.
//!
//! [`GraphDocument`] holds ordered node and edge collections plus viewport
//! metadata, and serializes to the persisted layout
//! `{ "nodes": [...], "edges": [...], "metadata": { "viewport": ... } }`.
//! Every field carries a serde default so partial or legacy JSON loads with
//! sensible fallbacks instead of failing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::{EdgeId, NodeId};

/// A 2D canvas position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Creates a position at the given coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

/// A node in the diagram graph.
///
/// The `data` payload is an opaque JSON blob the adapter never inspects;
/// its shape belongs to the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier within the document.
    pub id: NodeId,
    /// Canvas position.
    #[serde(default)]
    pub position: Position,
    /// Opaque payload, owned by the calling collaborator.
    #[serde(default)]
    pub data: Value,
    /// Optional visual template type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
}

impl Node {
    /// Creates a node with an empty payload at the given position.
    pub fn new(id: impl Into<NodeId>, position: Position) -> Self {
        Node {
            id: id.into(),
            position,
            data: Value::Null,
            node_type: None,
        }
    }
}

/// An edge between two nodes in the diagram graph.
///
/// Endpoints are *not* guaranteed to reference existing nodes: deleting a
/// node does not cascade-delete its edges. Collaborators that want cascade
/// semantics must remove the edges themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier within the document.
    pub id: EdgeId,
    /// Source node identifier.
    pub source: NodeId,
    /// Target node identifier.
    pub target: NodeId,
    /// Optional source port name.
    #[serde(rename = "sourcePort", default, skip_serializing_if = "Option::is_none")]
    pub source_port: Option<String>,
    /// Optional target port name.
    #[serde(rename = "targetPort", default, skip_serializing_if = "Option::is_none")]
    pub target_port: Option<String>,
    /// Opaque payload, owned by the calling collaborator.
    #[serde(default)]
    pub data: Value,
}

impl Edge {
    /// Creates an edge with an empty payload and no ports.
    pub fn new(id: impl Into<EdgeId>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Edge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_port: None,
            target_port: None,
            data: Value::Null,
        }
    }
}

/// Pan/zoom state of the canvas. Persisted but never undo-tracked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

/// Document-level metadata.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Current canvas viewport.
    #[serde(default)]
    pub viewport: Viewport,
}

/// The canonical graph document: ordered nodes, ordered edges, metadata.
///
/// Invariant (caller-maintained, not enforced): node ids are unique and
/// edge ids are unique within one document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl GraphDocument {
    /// Creates an empty document with the default viewport.
    pub fn empty() -> Self {
        GraphDocument::default()
    }

    /// Returns `true` if a node with the given id exists.
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.iter().any(|n| &n.id == id)
    }

    /// Returns `true` if an edge with the given id exists.
    pub fn contains_edge(&self, id: &EdgeId) -> bool {
        self.edges.iter().any(|e| &e.id == id)
    }

    /// Removes the node with the given id, returning it if present.
    /// Connected edges are left untouched.
    pub fn remove_node(&mut self, id: &NodeId) -> Option<Node> {
        let idx = self.nodes.iter().position(|n| &n.id == id)?;
        Some(self.nodes.remove(idx))
    }

    /// Removes the edge with the given id, returning it if present.
    pub fn remove_edge(&mut self, id: &EdgeId) -> Option<Edge> {
        let idx = self.edges.iter().position(|e| &e.id == id)?;
        Some(self.edges.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_document_has_identity_viewport() {
        let doc = GraphDocument::empty();
        assert!(doc.nodes.is_empty());
        assert!(doc.edges.is_empty());
        assert_eq!(doc.metadata.viewport.x, 0.0);
        assert_eq!(doc.metadata.viewport.y, 0.0);
        assert_eq!(doc.metadata.viewport.scale, 1.0);
    }

    #[test]
    fn deserialize_with_missing_fields_defaults() {
        let doc: GraphDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, GraphDocument::empty());

        let doc: GraphDocument =
            serde_json::from_str(r#"{"nodes":[{"id":"n1"}]}"#).unwrap();
        assert_eq!(doc.nodes.len(), 1);
        assert_eq!(doc.nodes[0].id, NodeId::from("n1"));
        assert_eq!(doc.nodes[0].position, Position::default());
        assert!(doc.nodes[0].data.is_null());
        assert!(doc.nodes[0].node_type.is_none());
    }

    #[test]
    fn node_serializes_type_field_under_wire_name() {
        let mut node = Node::new("n1", Position::new(10.0, 20.0));
        node.node_type = Some("decision".to_string());
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], json!("decision"));
        assert_eq!(json["position"]["x"], json!(10.0));
    }

    #[test]
    fn edge_serializes_ports_under_wire_names() {
        let mut edge = Edge::new("e1", "n1", "n2");
        edge.source_port = Some("out".to_string());
        edge.target_port = Some("in".to_string());
        let json = serde_json::to_value(&edge).unwrap();
        assert_eq!(json["sourcePort"], json!("out"));
        assert_eq!(json["targetPort"], json!("in"));
    }

    #[test]
    fn edge_ports_absent_when_unset() {
        let edge = Edge::new("e1", "n1", "n2");
        let json = serde_json::to_value(&edge).unwrap();
        assert!(json.get("sourcePort").is_none());
        assert!(json.get("targetPort").is_none());
    }

    #[test]
    fn serde_roundtrip_full_document() {
        let mut doc = GraphDocument::empty();
        doc.nodes.push(Node {
            id: "n1".into(),
            position: Position::new(1.5, -2.0),
            data: json!({"label": "Start"}),
            node_type: Some("entry".into()),
        });
        doc.edges.push(Edge::new("e1", "n1", "n2"));
        doc.metadata.viewport = Viewport {
            x: 100.0,
            y: 50.0,
            scale: 0.75,
        };

        let json = serde_json::to_string(&doc).unwrap();
        let back: GraphDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, back);
    }

    #[test]
    fn remove_node_does_not_cascade_edges() {
        let mut doc = GraphDocument::empty();
        doc.nodes.push(Node::new("n1", Position::default()));
        doc.nodes.push(Node::new("n2", Position::default()));
        doc.edges.push(Edge::new("e1", "n1", "n2"));

        let removed = doc.remove_node(&"n1".into());
        assert!(removed.is_some());
        // The edge now dangles; that is the documented hazard.
        assert_eq!(doc.edges.len(), 1);
    }

    #[test]
    fn remove_missing_entity_is_none() {
        let mut doc = GraphDocument::empty();
        assert!(doc.remove_node(&"ghost".into()).is_none());
        assert!(doc.remove_edge(&"ghost".into()).is_none());
    }
}
