//! Subscriber registry invoked after every committed mutation.
//!
//! Subscribers register a callback and receive one fully-committed document
//! snapshot per notification round, in registration order. Callbacks are
//! identified by a [`SubscriptionId`] handle (Rust closures have no
//! comparable identity to remove them by). Delivery is not isolated: a
//! panicking subscriber unwinds through `notify` and later subscribers in
//! that round are skipped.

use flowdoc_core::GraphDocument;

/// Handle returned by [`ChangeNotifier::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&GraphDocument)>;

/// Ordered registry of change subscribers.
#[derive(Default)]
pub struct ChangeNotifier {
    subscribers: Vec<(SubscriptionId, Callback)>,
    next_id: u64,
}

impl ChangeNotifier {
    /// Creates an empty registry.
    pub fn new() -> Self {
        ChangeNotifier::default()
    }

    /// Registers a callback, returning its handle.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&GraphDocument) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes the callback registered under `id`.
    ///
    /// Returns `false` if the handle was already removed or never issued.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Invokes every registered callback with the committed snapshot,
    /// in registration order.
    pub fn notify(&mut self, doc: &GraphDocument) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(doc);
        }
    }

    /// Removes all subscribers.
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }

    /// Number of registered subscribers.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns `true` if no subscribers are registered.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn subscribers_receive_snapshot_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = ChangeNotifier::new();

        for tag in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            notifier.subscribe(move |_| order.borrow_mut().push(tag));
        }

        notifier.notify(&GraphDocument::empty());
        assert_eq!(*order.borrow(), ["first", "second", "third"]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut notifier = ChangeNotifier::new();

        let counter = Rc::clone(&count);
        let id = notifier.subscribe(move |_| *counter.borrow_mut() += 1);

        notifier.notify(&GraphDocument::empty());
        assert!(notifier.unsubscribe(id));
        notifier.notify(&GraphDocument::empty());

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn unsubscribe_unknown_handle_is_false() {
        let mut notifier = ChangeNotifier::new();
        let id = notifier.subscribe(|_| {});
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
    }

    #[test]
    fn clear_removes_everyone() {
        let count = Rc::new(RefCell::new(0));
        let mut notifier = ChangeNotifier::new();
        for _ in 0..3 {
            let counter = Rc::clone(&count);
            notifier.subscribe(move |_| *counter.borrow_mut() += 1);
        }

        notifier.clear();
        assert!(notifier.is_empty());
        notifier.notify(&GraphDocument::empty());
        assert_eq!(*count.borrow(), 0);
    }
}
