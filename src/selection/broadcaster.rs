//! Fan-out of selection events to registered listeners.

use tracing::trace;

use crate::selection::Event;

/// A boxed selection listener.
type Listener = Box<dyn FnMut(&Event)>;

/// A handle identifying a subscription to a [`Broadcaster`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SubscriberId(u64);

/// A registry of listeners that are notified of selection events.
///
/// Events are delivered synchronously and in registration order. Because
/// [`Broadcaster::publish()`] holds a mutable borrow of the broadcaster for
/// the whole fan-out, a listener cannot subscribe or unsubscribe while an
/// event is being delivered.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use featuremap::feature::FeatureId;
/// use featuremap::selection::Broadcaster;
/// use featuremap::selection::Event;
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let mut broadcaster = Broadcaster::default();
///
/// let sink = Rc::clone(&seen);
/// let id = broadcaster.subscribe(move |event: &Event| sink.borrow_mut().push(event.clone()));
///
/// broadcaster.publish(&Event::Object(FeatureId(4)));
/// broadcaster.unsubscribe(id);
/// broadcaster.publish(&Event::Empty);
///
/// assert_eq!(*seen.borrow(), vec![Event::Object(FeatureId(4))]);
/// ```
#[derive(Default)]
pub struct Broadcaster {
    /// The listeners in registration order.
    listeners: Vec<(SubscriberId, Listener)>,

    /// The identifier handed to the next subscriber.
    next_id: u64,
}

impl Broadcaster {
    /// Registers a listener, returning the handle to unsubscribe it with.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriberId
    where
        F: FnMut(&Event) + 'static,
    {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener, returning whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(subscriber, _)| *subscriber != id);
        self.listeners.len() != before
    }

    /// Delivers `event` to every listener in registration order.
    pub fn publish(&mut self, event: &Event) {
        trace!(listeners = self.listeners.len(), ?event, "publishing selection");

        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }

    /// Gets the number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns whether no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for Broadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broadcaster")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
