//! Per-asset publish/subscribe
//!
//! Listeners are keyed by [`EventKey`] and identified by the [`ListenerId`]
//! returned at subscription time. Everything runs on one thread: callbacks
//! may subscribe, unsubscribe or request loads while an event is being
//! delivered, so the listener table is never borrowed across a callback.

use crate::{AssetStore, ContainerRef, EventKey};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Callback invoked with the delivering store and the container the event is about.
pub type Listener = Rc<dyn Fn(&dyn AssetStore, &ContainerRef)>;

/// Wrap a closure as a [`Listener`].
pub fn listener<F>(callback: F) -> Listener
where
    F: Fn(&dyn AssetStore, &ContainerRef) + 'static,
{
    Rc::new(callback)
}

/// Subscription handle returned by [`EventBus::on`] and [`EventBus::once`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct Registration {
    id: ListenerId,
    once: bool,
    callback: Listener,
}

pub struct EventBus {
    next_id: Cell<u64>,
    listeners: RefCell<HashMap<EventKey, Vec<Registration>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            listeners: RefCell::new(HashMap::new()),
        }
    }

    /// Subscribe until explicitly revoked with [`off`](Self::off).
    pub fn on(&self, key: EventKey, callback: Listener) -> ListenerId {
        self.register(key, callback, false)
    }

    /// Subscribe for a single delivery; the subscription revokes itself.
    pub fn once(&self, key: EventKey, callback: Listener) -> ListenerId {
        self.register(key, callback, true)
    }

    /// Revoke a subscription. Returns `false` if it was not active.
    pub fn off(&self, key: &EventKey, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let Some(registrations) = listeners.get_mut(key) else {
            return false;
        };

        let before = registrations.len();
        registrations.retain(|registration| registration.id != id);
        let removed = registrations.len() != before;

        if registrations.is_empty() {
            listeners.remove(key);
        }
        removed
    }

    pub fn listener_count(&self, key: &EventKey) -> usize {
        self.listeners.borrow().get(key).map_or(0, Vec::len)
    }

    pub fn has_listeners(&self, key: &EventKey) -> bool {
        self.listener_count(key) > 0
    }

    /// Deliver `key` to every listener registered when the fire starts.
    ///
    /// Returns the number of callbacks invoked. A listener revoked by an
    /// earlier callback of the same fire is skipped.
    pub fn fire(&self, key: &EventKey, store: &dyn AssetStore, container: &ContainerRef) -> usize {
        let snapshot: Vec<(ListenerId, bool, Listener)> = match self.listeners.borrow().get(key) {
            Some(registrations) => registrations
                .iter()
                .map(|r| (r.id, r.once, Rc::clone(&r.callback)))
                .collect(),
            None => return 0,
        };

        let mut delivered = 0;
        for (id, once, callback) in snapshot {
            // One-shot listeners are revoked before they run.
            let active = if once { self.off(key, id) } else { self.is_active(key, id) };
            if !active {
                continue;
            }

            callback(store, container);
            delivered += 1;
        }

        tracing::trace!(event = %key, delivered, "event fired");
        delivered
    }

    fn register(&self, key: EventKey, callback: Listener, once: bool) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        self.listeners
            .borrow_mut()
            .entry(key)
            .or_default()
            .push(Registration { id, once, callback });
        id
    }

    fn is_active(&self, key: &EventKey, id: ListenerId) -> bool {
        self.listeners
            .borrow()
            .get(key)
            .is_some_and(|registrations| registrations.iter().any(|r| r.id == id))
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AssetId, AssetRegistry, ContainerAsset, MemoryLoader};

    fn fixture() -> (AssetRegistry, ContainerRef) {
        let registry = AssetRegistry::new(Box::new(MemoryLoader::new()));
        let container = ContainerAsset::new(AssetId::from("C1"), "c1.glb").into_ref();
        (registry, container)
    }

    fn counting(counter: &Rc<Cell<u32>>) -> Listener {
        let counter = Rc::clone(counter);
        listener(move |_, _| counter.set(counter.get() + 1))
    }

    #[test]
    fn test_persistent_listener_fires_every_time() {
        let (registry, container) = fixture();
        let bus = EventBus::new();
        let key = EventKey::load(&AssetId::from("C1"));
        let hits = Rc::new(Cell::new(0));

        bus.on(key.clone(), counting(&hits));
        bus.fire(&key, &registry, &container);
        bus.fire(&key, &registry, &container);

        assert_eq!(hits.get(), 2);
        assert_eq!(bus.listener_count(&key), 1);
    }

    #[test]
    fn test_once_listener_revokes_itself() {
        let (registry, container) = fixture();
        let bus = EventBus::new();
        let key = EventKey::remove(&AssetId::from("C1"));
        let hits = Rc::new(Cell::new(0));

        let id = bus.once(key.clone(), counting(&hits));
        assert_eq!(bus.fire(&key, &registry, &container), 1);
        assert_eq!(bus.fire(&key, &registry, &container), 0);

        assert_eq!(hits.get(), 1);
        assert!(!bus.has_listeners(&key));
        // Revoking an already-spent handle is a no-op.
        assert!(!bus.off(&key, id));
    }

    #[test]
    fn test_off_is_idempotent_and_scoped_to_key() {
        let bus = EventBus::new();
        let id = AssetId::from("C1");
        let hits = Rc::new(Cell::new(0));

        let handle = bus.on(EventKey::load(&id), counting(&hits));
        assert!(!bus.off(&EventKey::remove(&id), handle));
        assert!(bus.off(&EventKey::load(&id), handle));
        assert!(!bus.off(&EventKey::load(&id), handle));
    }

    #[test]
    fn test_listener_revoked_during_fire_is_skipped() {
        let (registry, container) = fixture();
        let bus = Rc::new(EventBus::new());
        let key = EventKey::load(&AssetId::from("C1"));
        let hits = Rc::new(Cell::new(0));

        let victim = Rc::new(Cell::new(None));
        {
            let bus_weak = Rc::downgrade(&bus);
            let key = key.clone();
            let victim = Rc::clone(&victim);
            bus.on(
                key.clone(),
                listener(move |_, _| {
                    if let (Some(bus), Some(id)) = (bus_weak.upgrade(), victim.get()) {
                        bus.off(&key, id);
                    }
                }),
            );
        }
        victim.set(Some(bus.on(key.clone(), counting(&hits))));

        assert_eq!(bus.fire(&key, &registry, &container), 1);
        assert_eq!(hits.get(), 0);
    }
}
