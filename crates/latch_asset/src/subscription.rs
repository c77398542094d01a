//! Per-asset subscription bookkeeping
//!
//! A render asset holds at most one listener per event key. Installing a
//! listener under a key first revokes whatever was there, so re-running a
//! bind step can never fan out into duplicate callbacks.

use crate::{AssetId, AssetStore, EventKey, Listener, ListenerId};
use std::collections::HashMap;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Delivery {
    Persistent,
    Once,
}

#[derive(Debug, Default)]
pub struct Subscriptions {
    active: HashMap<EventKey, ListenerId>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revoke any listener recorded under `key`, then subscribe `listener` in its place.
    pub fn attach_or_replace(
        &mut self,
        store: &dyn AssetStore,
        key: EventKey,
        delivery: Delivery,
        listener: Listener,
    ) -> ListenerId {
        if let Some(previous) = self.active.remove(&key) {
            store.off(&key, previous);
        }

        let id = match delivery {
            Delivery::Persistent => store.on(key.clone(), listener),
            Delivery::Once => store.once(key.clone(), listener),
        };
        self.active.insert(key, id);
        id
    }

    /// Revoke the listener recorded under `key`. Returns `false` if none was recorded.
    pub fn detach(&mut self, store: &dyn AssetStore, key: &EventKey) -> bool {
        match self.active.remove(key) {
            Some(id) => {
                store.off(key, id);
                true
            }
            None => false,
        }
    }

    /// Drop the record of a one-shot listener the bus has already revoked.
    pub fn forget(&mut self, key: &EventKey) -> Option<ListenerId> {
        self.active.remove(key)
    }

    pub fn detach_all(&mut self, store: &dyn AssetStore) {
        for (key, id) in self.active.drain() {
            store.off(&key, id);
        }
    }

    /// Revoke every listener that targets an asset other than `keep`.
    ///
    /// Returns how many were revoked.
    pub fn detach_other_containers(&mut self, store: &dyn AssetStore, keep: &AssetId) -> usize {
        let stale: Vec<EventKey> = self
            .active
            .keys()
            .filter(|key| &key.id != keep)
            .cloned()
            .collect();

        for key in &stale {
            self.detach(store, key);
        }
        stale.len()
    }

    pub fn get(&self, key: &EventKey) -> Option<ListenerId> {
        self.active.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
