//! Core data model for flowdoc graph documents.
//!
//! A [`GraphDocument`] is the canonical state of one diagram: ordered node
//! and edge collections plus viewport metadata. Mutations are described by
//! [`Action`] values -- invertible add/delete events carrying owned entity
//! snapshots -- and derived from collection updates by the id-set diffing
//! in [`diff`].

pub mod action;
pub mod diff;
pub mod document;
pub mod id;

// Re-export commonly used types
pub use action::Action;
pub use diff::{diff_documents, diff_edges, diff_nodes};
pub use document::{Edge, GraphDocument, Metadata, Node, Position, Viewport};
pub use id::{EdgeId, NodeId};
