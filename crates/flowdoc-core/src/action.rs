//! Reversible document mutations.
//!
//! [`Action`] records a single add/delete event with an owned snapshot of
//! the affected entity, taken at record time. The snapshot never aliases
//! live document state, so an action remains applicable no matter how the
//! document changes afterwards. Actions serialize with a `type` tag for
//! diagnostics and tooling.

use serde::{Deserialize, Serialize};

use crate::document::{Edge, GraphDocument, Node};

/// A recorded add/delete event over one node or edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    /// A node was added to the document.
    AddNode { node: Node },
    /// A node was deleted (captures the full node for undo re-insertion).
    DeleteNode { node: Node },
    /// An edge was added to the document.
    AddEdge { edge: Edge },
    /// An edge was deleted (captures the full edge for undo re-insertion).
    DeleteEdge { edge: Edge },
}

impl Action {
    /// Returns the inverse action that undoes this mutation.
    ///
    /// The snapshot travels with the inversion, so undoing a deletion
    /// restores the entity exactly as it was recorded. Restored entities
    /// are appended, not returned to their original index.
    pub fn inverse(&self) -> Action {
        match self {
            Action::AddNode { node } => Action::DeleteNode { node: node.clone() },
            Action::DeleteNode { node } => Action::AddNode { node: node.clone() },
            Action::AddEdge { edge } => Action::DeleteEdge { edge: edge.clone() },
            Action::DeleteEdge { edge } => Action::AddEdge { edge: edge.clone() },
        }
    }

    /// Applies the forward effect of this action to `doc`.
    ///
    /// Adds append the snapshot; deletes remove by id. Deleting an id that
    /// is no longer present is a no-op.
    pub fn apply(&self, doc: &mut GraphDocument) {
        match self {
            Action::AddNode { node } => doc.nodes.push(node.clone()),
            Action::DeleteNode { node } => {
                doc.remove_node(&node.id);
            }
            Action::AddEdge { edge } => doc.edges.push(edge.clone()),
            Action::DeleteEdge { edge } => {
                doc.remove_edge(&edge.id);
            }
        }
    }

    /// Returns the action kind as a static label, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::AddNode { .. } => "add_node",
            Action::DeleteNode { .. } => "delete_node",
            Action::AddEdge { .. } => "add_edge",
            Action::DeleteEdge { .. } => "delete_edge",
        }
    }

    /// Returns the id of the affected entity, for logging.
    pub fn entity_id(&self) -> &str {
        match self {
            Action::AddNode { node } | Action::DeleteNode { node } => &node.id.0,
            Action::AddEdge { edge } | Action::DeleteEdge { edge } => &edge.id.0,
        }
    }
}
