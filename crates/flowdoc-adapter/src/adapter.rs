//! The [`ModelAdapter`] façade composing storage, the action log, and the
//! change notifier.
//!
//! Every mutation follows one committed sequence: read the current document
//! from the store, compute the new document, derive actions by id-set diff
//! (only when not replaying history), persist, notify subscribers with the
//! committed snapshot. Reads always re-derive from the store; there is no
//! separate in-memory document cache.
//!
//! Storage failures never surface to collaborators: a failed load yields a
//! default empty document with a warning, and a failed save is logged while
//! the in-memory operation still completes (availability over durability).

use tracing::{debug, trace, warn};

use flowdoc_core::{diff_documents, Edge, GraphDocument, Metadata, Node};
use flowdoc_storage::{DocumentStore, StorageError};

use crate::log::ActionLog;
use crate::notify::{ChangeNotifier, SubscriptionId};

/// Namespace key used when the caller supplies none.
pub const DEFAULT_NAMESPACE: &str = "flowdoc-data";

/// What kind of mutation the commit path is serving.
///
/// Threaded through [`ModelAdapter::commit`] as a parameter instead of a
/// mutable re-entrancy flag: only `Idle` mutations record actions, so a
/// history replay can never re-record itself. Mutating operations take
/// `&mut self`, so overlapping replay calls are ruled out at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplayMode {
    /// A collaborator-initiated mutation; diffed and recorded.
    Idle,
    /// Applying the inverse of a logged action.
    ApplyingUndo,
    /// Re-applying a previously undone action.
    ApplyingRedo,
    /// Replacing the whole document via reset.
    Resetting,
}

impl ReplayMode {
    fn records_actions(self) -> bool {
        matches!(self, ReplayMode::Idle)
    }
}

/// Façade over one persisted graph document.
///
/// Single-threaded and fully synchronous: a mutation's read-diff-persist-
/// notify sequence completes atomically from the caller's viewpoint.
/// Nothing stops two adapter instances from sharing a namespace and racing;
/// that hazard belongs to the caller.
pub struct ModelAdapter<S: DocumentStore> {
    store: S,
    namespace: String,
    log: ActionLog,
    notifier: ChangeNotifier,
}

impl<S: DocumentStore> ModelAdapter<S> {
    /// Creates an adapter over [`DEFAULT_NAMESPACE`] with an empty initial
    /// document.
    pub fn new(store: S) -> Self {
        Self::with_initial(store, DEFAULT_NAMESPACE, GraphDocument::empty())
    }

    /// Creates an adapter over the given namespace with an empty initial
    /// document.
    pub fn with_namespace(store: S, namespace: impl Into<String>) -> Self {
        Self::with_initial(store, namespace, GraphDocument::empty())
    }

    /// Creates an adapter over the given namespace, seeding the store with
    /// `initial` only when the namespace has never been written.
    pub fn with_initial(
        store: S,
        namespace: impl Into<String>,
        initial: GraphDocument,
    ) -> Self {
        let mut adapter = ModelAdapter {
            store,
            namespace: namespace.into(),
            log: ActionLog::new(),
            notifier: ChangeNotifier::new(),
        };

        let present = match adapter.store.contains(&adapter.namespace) {
            Ok(present) => present,
            Err(err) => {
                warn!(namespace = %adapter.namespace, error = %err,
                    "failed to probe store; seeding initial document");
                false
            }
        };
        if !present {
            adapter.store_document(&initial);
        }
        adapter
    }

    /// The namespace key this adapter addresses.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    // -----------------------------------------------------------------------
    // Reads -- always re-derived from the store
    // -----------------------------------------------------------------------

    /// Current persisted nodes, in insertion order.
    pub fn get_nodes(&self) -> Vec<Node> {
        self.load_document().nodes
    }

    /// Current persisted edges, in insertion order.
    pub fn get_edges(&self) -> Vec<Edge> {
        self.load_document().edges
    }

    /// Current persisted viewport metadata.
    pub fn get_metadata(&self) -> Metadata {
        self.load_document().metadata
    }

    /// Serializes the current `{nodes, edges, metadata}` document.
    ///
    /// Undo/redo history is deliberately absent from the serialized form.
    pub fn to_json(&self) -> String {
        let doc = self.load_document();
        match serde_json::to_string(&doc) {
            Ok(json) => json,
            Err(err) => {
                warn!(namespace = %self.namespace, error = %err,
                    "failed to serialize document");
                "{}".to_string()
            }
        }
    }

    // -----------------------------------------------------------------------
    // Writes -- diff-track, persist, notify
    // -----------------------------------------------------------------------

    /// Replaces the node collection.
    pub fn update_nodes(&mut self, nodes: Vec<Node>) {
        self.update_nodes_with(move |_| nodes);
    }

    /// Derives the new node collection from the previous one.
    pub fn update_nodes_with<F>(&mut self, f: F)
    where
        F: FnOnce(Vec<Node>) -> Vec<Node>,
    {
        let prev = self.load_document();
        let next = GraphDocument {
            nodes: f(prev.nodes.clone()),
            edges: prev.edges.clone(),
            metadata: prev.metadata,
        };
        self.commit(&prev, next, ReplayMode::Idle);
    }

    /// Replaces the edge collection.
    pub fn update_edges(&mut self, edges: Vec<Edge>) {
        self.update_edges_with(move |_| edges);
    }

    /// Derives the new edge collection from the previous one.
    pub fn update_edges_with<F>(&mut self, f: F)
    where
        F: FnOnce(Vec<Edge>) -> Vec<Edge>,
    {
        let prev = self.load_document();
        let next = GraphDocument {
            nodes: prev.nodes.clone(),
            edges: f(prev.edges.clone()),
            metadata: prev.metadata,
        };
        self.commit(&prev, next, ReplayMode::Idle);
    }

    /// Replaces the viewport metadata. Never tracked in the undo log.
    pub fn update_metadata(&mut self, metadata: Metadata) {
        self.update_metadata_with(move |_| metadata);
    }

    /// Derives the new metadata from the previous one. Never tracked.
    pub fn update_metadata_with<F>(&mut self, f: F)
    where
        F: FnOnce(Metadata) -> Metadata,
    {
        let prev = self.load_document();
        let next = GraphDocument {
            nodes: prev.nodes.clone(),
            edges: prev.edges.clone(),
            metadata: f(prev.metadata),
        };
        // A metadata-only change produces an empty diff, so nothing is
        // recorded even in Idle mode.
        self.commit(&prev, next, ReplayMode::Idle);
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    /// Applies the inverse of the most recent action. No-op when the undo
    /// stack is empty.
    pub fn undo(&mut self) {
        let Some(action) = self.log.pop_for_undo() else {
            debug!(namespace = %self.namespace, "undo requested with empty history");
            return;
        };
        debug!(kind = action.kind(), id = action.entity_id(), "undoing action");

        let prev = self.load_document();
        let mut next = prev.clone();
        action.inverse().apply(&mut next);
        self.log.push_undone(action);
        self.commit(&prev, next, ReplayMode::ApplyingUndo);
    }

    /// Re-applies the most recently undone action. No-op when the redo
    /// stack is empty.
    pub fn redo(&mut self) {
        let Some(action) = self.log.pop_for_redo() else {
            debug!(namespace = %self.namespace, "redo requested with empty history");
            return;
        };
        debug!(kind = action.kind(), id = action.entity_id(), "redoing action");

        let prev = self.load_document();
        let mut next = prev.clone();
        action.apply(&mut next);
        self.log.push_redone(action);
        self.commit(&prev, next, ReplayMode::ApplyingRedo);
    }

    /// Atomically replaces the persisted document and clears both history
    /// stacks. The only operation guaranteed to leave both stacks empty.
    pub fn reset(&mut self, doc: GraphDocument) {
        debug!(namespace = %self.namespace, "resetting document and clearing history");
        let prev = self.load_document();
        self.log.clear();
        self.commit(&prev, doc, ReplayMode::Resetting);
    }

    /// Number of undoable actions.
    pub fn undo_depth(&self) -> usize {
        self.log.undo_depth()
    }

    /// Number of redoable actions.
    pub fn redo_depth(&self) -> usize {
        self.log.redo_depth()
    }

    // -----------------------------------------------------------------------
    // Subscriptions
    // -----------------------------------------------------------------------

    /// Registers a callback invoked after every committed mutation with the
    /// fully-committed document snapshot.
    pub fn on_change<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&GraphDocument) + 'static,
    {
        self.notifier.subscribe(callback)
    }

    /// Removes a previously registered callback.
    pub fn unregister_on_change(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Clears subscribers and both history stacks. Persisted content
    /// survives.
    pub fn destroy(&mut self) {
        self.notifier.clear();
        self.log.clear();
    }

    // -----------------------------------------------------------------------
    // Internal commit path
    // -----------------------------------------------------------------------

    /// Commits `next` as the new document state.
    ///
    /// In `Idle` mode the old/new diff is recorded action-by-action; replay
    /// modes skip recording so history application never re-records itself.
    /// Subscribers are notified with the committed snapshot even when the
    /// save failed -- the in-memory operation still succeeded.
    fn commit(&mut self, prev: &GraphDocument, next: GraphDocument, mode: ReplayMode) {
        if mode.records_actions() {
            for action in diff_documents(prev, &next) {
                trace!(kind = action.kind(), id = action.entity_id(), "recorded action");
                self.log.record(action);
            }
        }
        self.store_document(&next);
        self.notifier.notify(&next);
    }

    /// Loads the current document, absorbing storage failures.
    ///
    /// A missing namespace yields the default empty document silently; any
    /// other failure (corrupt payload, database error) yields the default
    /// with a warning. Never raises to the caller.
    fn load_document(&self) -> GraphDocument {
        match self.store.load(&self.namespace) {
            Ok(doc) => doc,
            Err(StorageError::DocumentNotFound { .. }) => {
                debug!(namespace = %self.namespace, "no stored document; using defaults");
                GraphDocument::empty()
            }
            Err(err) => {
                warn!(namespace = %self.namespace, error = %err,
                    "failed to load document; using defaults");
                GraphDocument::empty()
            }
        }
    }

    /// Persists the document, absorbing save failures.
    ///
    /// Durability is best-effort by design: the UI must never block or
    /// error on a storage failure.
    fn store_document(&mut self, doc: &GraphDocument) {
        if let Err(err) = self.store.save(&self.namespace, doc) {
            warn!(namespace = %self.namespace, error = %err,
                "failed to persist document; continuing");
        }
    }
}
