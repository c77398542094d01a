//! In-memory asset registry
//!
//! Owns the registered container assets and the event bus. Loads are
//! fire-and-continue: [`AssetStore::load`] only queues the asset, and the
//! queue is drained later by [`AssetRegistry::update`] (once per frame) or
//! per asset by [`AssetRegistry::finish_load`].

use crate::{
    AssetError, AssetId, AssetSettings, AssetStore, ContainerAsset, ContainerLoader, ContainerRef,
    EventBus, EventKey, Listener, ListenerId,
};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

pub struct AssetRegistry {
    assets: RefCell<HashMap<AssetId, ContainerRef>>,
    pending: RefCell<VecDeque<ContainerRef>>,
    bus: EventBus,
    loader: Box<dyn ContainerLoader>,
    settings: AssetSettings,
}

impl AssetRegistry {
    pub fn new(loader: Box<dyn ContainerLoader>) -> Self {
        Self::with_settings(loader, AssetSettings::default())
    }

    pub fn with_settings(loader: Box<dyn ContainerLoader>, settings: AssetSettings) -> Self {
        Self {
            assets: RefCell::new(HashMap::new()),
            pending: RefCell::new(VecDeque::new()),
            bus: EventBus::new(),
            loader,
            settings,
        }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Register a container and announce it with `add:<id>`.
    pub fn add(&self, asset: ContainerAsset) -> Result<ContainerRef, AssetError> {
        let id = asset.id().clone();
        tracing::debug!(asset = %id, url = asset.url(), "adding asset");
        let asset = asset.into_ref();
        {
            let mut assets = self.assets.borrow_mut();
            if assets.contains_key(&id) {
                return Err(AssetError::DuplicateAsset { id });
            }
            assets.insert(id.clone(), Rc::clone(&asset));
        }

        self.bus.fire(&EventKey::add(&id), self, &asset);
        Ok(asset)
    }

    /// Unregister a container, cancel its queued load and announce `remove:<id>`.
    pub fn remove(&self, id: &AssetId) -> Option<ContainerRef> {
        let asset = self.assets.borrow_mut().remove(id)?;
        self.pending
            .borrow_mut()
            .retain(|queued| !Rc::ptr_eq(queued, &asset));
        asset.borrow_mut().loading = false;

        tracing::debug!(asset = %id, "asset removed");
        self.bus.fire(&EventKey::remove(id), self, &asset);
        Some(asset)
    }

    pub fn contains(&self, id: &AssetId) -> bool {
        self.assets.borrow().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.assets.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.borrow().is_empty()
    }

    /// Ids of the containers waiting for their load to complete, in queue order.
    pub fn pending_loads(&self) -> Vec<AssetId> {
        self.pending
            .borrow()
            .iter()
            .map(|asset| asset.borrow().id().clone())
            .collect()
    }

    /// Complete the queued load of `id`.
    ///
    /// Returns `Ok(false)` if no load is queued for `id`.
    pub fn finish_load(&self, id: &AssetId) -> Result<bool, AssetError> {
        let asset = {
            let mut pending = self.pending.borrow_mut();
            let Some(index) = pending.iter().position(|queued| queued.borrow().id() == id) else {
                return Ok(false);
            };
            pending.remove(index)
        };

        match asset {
            Some(asset) => self.complete(&asset).map(|()| true),
            None => Ok(false),
        }
    }

    /// Drain the load queue, honoring `loads_per_update`.
    ///
    /// Returns the number of loads that succeeded. Failures are logged and
    /// announced with `error:<id>`.
    pub fn update(&self) -> usize {
        let budget = match self.settings.loads_per_update {
            0 => usize::MAX,
            n => n,
        };

        let mut attempted = 0;
        let mut loaded = 0;
        while attempted < budget {
            let Some(asset) = self.pending.borrow_mut().pop_front() else {
                break;
            };
            attempted += 1;
            if self.complete(&asset).is_ok() {
                loaded += 1;
            }
        }
        loaded
    }

    fn complete(&self, asset: &ContainerRef) -> Result<(), AssetError> {
        let result = self.loader.load(&asset.borrow());
        let id = asset.borrow().id().clone();

        match result {
            Ok(resource) => {
                {
                    let mut asset = asset.borrow_mut();
                    asset.resource = Some(resource);
                    asset.loading = false;
                }
                tracing::info!("Loaded container asset '{}'", id);
                self.bus.fire(&EventKey::load(&id), self, asset);
                Ok(())
            }
            Err(err) => {
                asset.borrow_mut().loading = false;
                tracing::error!("Failed to load container asset '{}': {}", id, err);
                self.bus.fire(&EventKey::error(&id), self, asset);
                Err(err)
            }
        }
    }
}

impl AssetStore for AssetRegistry {
    fn get(&self, id: &AssetId) -> Option<ContainerRef> {
        self.assets.borrow().get(id).cloned()
    }

    fn load(&self, asset: &ContainerRef) {
        {
            let mut container = asset.borrow_mut();
            if container.is_loaded() || container.loading {
                return;
            }
            container.loading = true;
        }

        tracing::debug!(asset = %asset.borrow().id(), "load queued");
        self.pending.borrow_mut().push_back(Rc::clone(asset));
    }

    fn on(&self, key: EventKey, listener: Listener) -> ListenerId {
        self.bus.on(key, listener)
    }

    fn once(&self, key: EventKey, listener: Listener) -> ListenerId {
        self.bus.once(key, listener)
    }

    fn off(&self, key: &EventKey, id: ListenerId) {
        self.bus.off(key, id);
    }
}
