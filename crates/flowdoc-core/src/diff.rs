//! Id-set diffing between old and new entity collections.
//!
//! The diff compares collections *by id only*: an entity present in both
//! collections produces no action even when its fields changed (a moved
//! node or edited payload is invisible to the undo log). Additions are
//! reported in new-collection order, removals in old-collection order,
//! each carrying an owned snapshot of the entity.

use indexmap::IndexSet;

use crate::action::Action;
use crate::document::{Edge, GraphDocument, Node};
use crate::id::{EdgeId, NodeId};

/// Derives add/delete actions from a node collection update.
pub fn diff_nodes(old: &[Node], new: &[Node]) -> Vec<Action> {
    let old_ids: IndexSet<&NodeId> = old.iter().map(|n| &n.id).collect();
    let new_ids: IndexSet<&NodeId> = new.iter().map(|n| &n.id).collect();

    let mut actions = Vec::new();
    for node in new.iter().filter(|n| !old_ids.contains(&n.id)) {
        actions.push(Action::AddNode { node: node.clone() });
    }
    for node in old.iter().filter(|n| !new_ids.contains(&n.id)) {
        actions.push(Action::DeleteNode { node: node.clone() });
    }
    actions
}

/// Derives add/delete actions from an edge collection update.
pub fn diff_edges(old: &[Edge], new: &[Edge]) -> Vec<Action> {
    let old_ids: IndexSet<&EdgeId> = old.iter().map(|e| &e.id).collect();
    let new_ids: IndexSet<&EdgeId> = new.iter().map(|e| &e.id).collect();

    let mut actions = Vec::new();
    for edge in new.iter().filter(|e| !old_ids.contains(&e.id)) {
        actions.push(Action::AddEdge { edge: edge.clone() });
    }
    for edge in old.iter().filter(|e| !new_ids.contains(&e.id)) {
        actions.push(Action::DeleteEdge { edge: edge.clone() });
    }
    actions
}

/// Derives actions for a whole-document update: node diff first, then edges.
///
/// Metadata is never diffed -- viewport changes are not undoable.
pub fn diff_documents(old: &GraphDocument, new: &GraphDocument) -> Vec<Action> {
    let mut actions = diff_nodes(&old.nodes, &new.nodes);
    actions.extend(diff_edges(&old.edges, &new.edges));
    actions
}
