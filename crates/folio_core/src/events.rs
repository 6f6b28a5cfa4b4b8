//! Pointer event dispatch
//!
//! The host owns one [`PointerDispatcher`] per page and feeds it every
//! pointer-move sample. Interactive controls register listeners and are
//! responsible for deregistering on teardown.
//!
//! Registrations are weak: the dispatcher never keeps a listener alive, and
//! entries whose owner has been dropped are pruned on the next dispatch.
//! Listeners only ever see `&PointerEvent`, so no subscriber can alter the
//! input another subscriber observes.

use crate::geometry::Point;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;

    // Element lifecycle events
    pub const MOUNT: EventType = 60;
    pub const UNMOUNT: EventType = 61;
}

new_key_type! {
    /// Handle for a pointer listener registration
    pub struct ListenerId;
}

/// A pointer-move sample in viewport coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    /// Host timestamp in milliseconds
    pub timestamp: u64,
}

impl PointerEvent {
    pub fn new(x: f32, y: f32, timestamp: u64) -> Self {
        Self {
            position: Point::new(x, y),
            timestamp,
        }
    }
}

/// Receives pointer-move samples from a [`PointerDispatcher`]
pub trait PointerListener {
    fn on_pointer_move(&self, event: &PointerEvent);
}

/// Single-threaded publish/subscribe hub for pointer-move samples
#[derive(Default)]
pub struct PointerDispatcher {
    listeners: RefCell<SlotMap<ListenerId, Weak<dyn PointerListener>>>,
}

impl PointerDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; the dispatcher holds only a weak reference
    pub fn subscribe(&self, listener: &Rc<dyn PointerListener>) -> ListenerId {
        let id = self.listeners.borrow_mut().insert(Rc::downgrade(listener));
        tracing::debug!(?id, "pointer listener subscribed");
        id
    }

    /// Remove a registration. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let removed = self.listeners.borrow_mut().remove(id).is_some();
        tracing::debug!(?id, removed, "pointer listener unsubscribed");
        removed
    }

    /// Deliver a sample to every live listener, returning how many received it
    ///
    /// The live set is snapshotted before delivery so listeners may
    /// subscribe or unsubscribe from inside their callback.
    pub fn dispatch(&self, event: &PointerEvent) -> usize {
        let live: SmallVec<[Rc<dyn PointerListener>; 8]> = {
            let mut listeners = self.listeners.borrow_mut();
            let before = listeners.len();
            listeners.retain(|_, weak| weak.strong_count() > 0);
            let pruned = before - listeners.len();
            if pruned > 0 {
                tracing::debug!(pruned, "pruned dropped pointer listeners");
            }
            listeners.values().filter_map(Weak::upgrade).collect()
        };

        for listener in &live {
            listener.on_pointer_move(event);
        }
        live.len()
    }

    /// Number of registrations, including any not yet pruned
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl std::fmt::Debug for PointerDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerDispatcher")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct Counter {
        hits: Cell<u32>,
        last_x: Cell<f32>,
    }

    impl PointerListener for Counter {
        fn on_pointer_move(&self, event: &PointerEvent) {
            self.hits.set(self.hits.get() + 1);
            self.last_x.set(event.position.x);
        }
    }

    #[test]
    fn test_dispatch_reaches_all_subscribers() {
        let dispatcher = PointerDispatcher::new();
        let a = Rc::new(Counter::default());
        let b = Rc::new(Counter::default());
        let a_dyn: Rc<dyn PointerListener> = a.clone();
        let b_dyn: Rc<dyn PointerListener> = b.clone();
        dispatcher.subscribe(&a_dyn);
        dispatcher.subscribe(&b_dyn);

        let delivered = dispatcher.dispatch(&PointerEvent::new(42.0, 0.0, 1));

        assert_eq!(delivered, 2);
        assert_eq!(a.hits.get(), 1);
        assert_eq!(b.last_x.get(), 42.0);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let dispatcher = PointerDispatcher::new();
        let counter = Rc::new(Counter::default());
        let listener: Rc<dyn PointerListener> = counter.clone();
        let id = dispatcher.subscribe(&listener);

        assert!(dispatcher.unsubscribe(id));
        assert!(!dispatcher.unsubscribe(id));
        dispatcher.dispatch(&PointerEvent::new(1.0, 1.0, 1));

        assert_eq!(counter.hits.get(), 0);
        assert_eq!(dispatcher.listener_count(), 0);
    }

    #[test]
    fn test_dropped_listener_is_pruned() {
        let dispatcher = PointerDispatcher::new();
        let listener: Rc<dyn PointerListener> = Rc::new(Counter::default());
        dispatcher.subscribe(&listener);
        drop(listener);

        assert_eq!(dispatcher.listener_count(), 1);
        assert_eq!(dispatcher.dispatch(&PointerEvent::new(0.0, 0.0, 1)), 0);
        assert_eq!(dispatcher.listener_count(), 0);
    }

    struct SelfRemoving {
        dispatcher: Rc<PointerDispatcher>,
        id: Cell<Option<ListenerId>>,
    }

    impl PointerListener for SelfRemoving {
        fn on_pointer_move(&self, _event: &PointerEvent) {
            if let Some(id) = self.id.take() {
                self.dispatcher.unsubscribe(id);
            }
        }
    }

    #[test]
    fn test_listener_may_unsubscribe_during_dispatch() {
        let dispatcher = Rc::new(PointerDispatcher::new());
        let node = Rc::new(SelfRemoving {
            dispatcher: dispatcher.clone(),
            id: Cell::new(None),
        });
        let listener: Rc<dyn PointerListener> = node.clone();
        node.id.set(Some(dispatcher.subscribe(&listener)));

        assert_eq!(dispatcher.dispatch(&PointerEvent::new(0.0, 0.0, 1)), 1);
        assert_eq!(dispatcher.listener_count(), 0);
    }
}
