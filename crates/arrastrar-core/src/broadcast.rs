//! Lazy broadcast channels for drag lifecycle notifications.
//!
//! One [`Broadcast`] exists per lifecycle phase (start, move, end). The
//! subscriber list is allocated on the first subscription and dropped
//! again when the last subscriber cancels, so an unobserved channel costs
//! nothing on the hot move path.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Listeners<T> = RefCell<Option<Vec<(u64, Rc<dyn Fn(&T)>)>>>;

/// A single-threaded, per-instance broadcast channel.
///
/// Delivery is synchronous and in subscription order. A fresh
/// subscription only sees events emitted after it was made.
pub struct Broadcast<T> {
    listeners: Rc<Listeners<T>>,
    next_id: Cell<u64>,
}

impl<T> Broadcast<T> {
    /// Create an inactive channel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(None)),
            next_id: Cell::new(0),
        }
    }

    /// Subscribe to future events.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription<T> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners
            .borrow_mut()
            .get_or_insert_with(Vec::new)
            .push((id, Rc::new(callback)));
        Subscription {
            listeners: Rc::downgrade(&self.listeners),
            id,
        }
    }

    /// Whether any subscriber is attached.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.listeners.borrow().is_some()
    }

    /// Number of attached subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().as_ref().map_or(0, Vec::len)
    }

    /// Deliver an event to every subscriber.
    ///
    /// Runs against a snapshot of the list, so callbacks may subscribe or
    /// cancel re-entrantly; a subscriber added during delivery sees only
    /// later events.
    pub fn emit(&self, event: &T) {
        let snapshot: Vec<Rc<dyn Fn(&T)>> = match self.listeners.borrow().as_ref() {
            Some(subs) => subs.iter().map(|(_, cb)| Rc::clone(cb)).collect(),
            None => return,
        };
        for callback in snapshot {
            callback(event);
        }
    }
}

impl<T> Default for Broadcast<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Broadcast<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Broadcast")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Handle to one subscription on a [`Broadcast`].
///
/// Cancellation is explicit; dropping the handle leaves the subscription
/// attached for the channel's lifetime.
pub struct Subscription<T> {
    listeners: Weak<Listeners<T>>,
    id: u64,
}

impl<T> Subscription<T> {
    /// Remove this subscription. Idempotent; a handle outliving its
    /// channel is a no-op. Removing the last subscriber deactivates the
    /// channel.
    pub fn cancel(&self) {
        let Some(listeners) = self.listeners.upgrade() else {
            return;
        };
        let mut slot = listeners.borrow_mut();
        if let Some(subs) = slot.as_mut() {
            subs.retain(|(id, _)| *id != self.id);
            if subs.is_empty() {
                *slot = None;
            }
        }
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
