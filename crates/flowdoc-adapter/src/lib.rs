//! The model adapter: canonical document state, action-sourced undo/redo,
//! and change notification over a [`DocumentStore`](flowdoc_storage::DocumentStore).
//!
//! [`ModelAdapter`] is the only surface exposed to diagram collaborators.
//! Every mutation runs the same committed sequence: read the current
//! document, compute the new one, derive actions by id-set diff (unless
//! replaying history), persist, notify. Reads always re-derive from the
//! store, so a read immediately after a write observes the write.
//!
//! # Modules
//!
//! - [`log`]: bounded undo/redo stacks of invertible actions
//! - [`notify`]: subscriber registry invoked after every commit
//! - [`adapter`]: the ModelAdapter façade

pub mod adapter;
pub mod log;
pub mod notify;

// Re-export key types for ergonomic use.
pub use adapter::{ModelAdapter, DEFAULT_NAMESPACE};
pub use log::{ActionLog, MAX_HISTORY};
pub use notify::{ChangeNotifier, SubscriptionId};
