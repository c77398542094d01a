//! Render asset binding
//!
//! Resolves a render asset's container reference and aliases the meshes of
//! `container.renders[render_index]` into the render asset's own resource.
//!
//! Everything after [`bind`] is driven by registry events:
//!
//! - `add:<container>` (one-shot, only while the container is unknown)
//! - `load:<container>` (persistent, reassigns meshes on every reload)
//! - `remove:<container>` (one-shot, tears the render resource down)
//!
//! Callbacks hold a `Weak` reference to the render asset, so dropping the
//! asset silently cancels any pending step.

use crate::{
    listener, AssetStore, BindState, ContainerRef, Delivery, EventKey, Listener, RenderAsset,
    RenderAssetRef,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Attach `asset` to its container.
///
/// Binds immediately if the container is registered (and, if it is already
/// loaded, before returning). Otherwise waits for `add:<container>`. A
/// render asset without a container reference is left untouched.
///
/// Safe to call repeatedly. Subscriptions left over from a previous
/// container are revoked first, and the meshes aliased from it are cleared.
pub fn bind(asset: &RenderAssetRef, store: &dyn AssetStore) {
    let container_id = {
        let mut render = asset.borrow_mut();
        if render.state == BindState::Destroyed {
            tracing::debug!(render = %render.id(), "bind ignored, render asset destroyed");
            return;
        }
        let Some(container_id) = render.container_asset().cloned() else {
            return;
        };

        let stale = render.subscriptions.detach_other_containers(store, &container_id);
        if stale > 0 {
            if let Some(resource) = render.resource.as_mut() {
                resource.set_meshes(None);
            }
            render.state = BindState::Unbound;
            tracing::debug!(
                render = %render.id(),
                stale,
                "dropped subscriptions and meshes of previous container"
            );
        }
        container_id
    };

    match store.get(&container_id) {
        Some(container) => on_container_added(asset, &container, store),
        None => {
            let mut render = asset.borrow_mut();
            tracing::debug!(
                render = %render.id(),
                container = %container_id,
                "waiting for container asset"
            );
            render.state = BindState::WaitingForContainerAsset;
            render.subscriptions.attach_or_replace(
                store,
                EventKey::add(&container_id),
                Delivery::Once,
                added_listener(Rc::downgrade(asset)),
            );
        }
    }
}

/// Revoke every subscription held by `asset`.
///
/// The resource is left as is; use this when a render asset is dropped while
/// its container is still registered. A bound asset keeps its meshes and stays
/// [`BindState::Bound`], but it is no longer tracked: removing the container
/// afterwards will not destroy it. Waiting states fall back to `Unbound`.
pub fn unbind(asset: &RenderAssetRef, store: &dyn AssetStore) {
    let mut render = asset.borrow_mut();
    render.subscriptions.detach_all(store);
    if matches!(
        render.state,
        BindState::WaitingForContainerAsset | BindState::WaitingForContainerLoad
    ) {
        render.state = BindState::Unbound;
    }
}

/// The container is registered: track its load and removal, then bind or request a load.
pub fn on_container_added(
    asset: &RenderAssetRef,
    container: &ContainerRef,
    store: &dyn AssetStore,
) {
    let container_id = container.borrow().id().clone();
    {
        let mut render = asset.borrow_mut();
        if render.state == BindState::Destroyed {
            return;
        }

        render.subscriptions.detach(store, &EventKey::add(&container_id));
        render.subscriptions.attach_or_replace(
            store,
            EventKey::load(&container_id),
            Delivery::Persistent,
            loaded_listener(Rc::downgrade(asset)),
        );
        render.subscriptions.attach_or_replace(
            store,
            EventKey::remove(&container_id),
            Delivery::Once,
            removed_listener(Rc::downgrade(asset)),
        );

        if render.state != BindState::Bound {
            render.state = BindState::WaitingForContainerLoad;
        }
        tracing::debug!(render = %render.id(), container = %container_id, "tracking container");
    }

    let loaded = container.borrow().is_loaded();
    if loaded {
        on_container_loaded(asset, container);
    } else {
        store.load(container);
    }
}

/// The container resource is available: alias the meshes of the referenced entry.
///
/// No-op when the render resource has already been torn down. A missing
/// entry (index out of range, or an entry without a resource) leaves the
/// meshes unset.
pub fn on_container_loaded(asset: &RenderAssetRef, container: &ContainerRef) {
    let mut render = asset.borrow_mut();
    if render.resource.is_none() {
        tracing::debug!(
            render = %render.id(),
            "container loaded after render resource was released"
        );
        return;
    }

    let container = container.borrow();
    let index = render.render_index();
    let meshes = container
        .resource()
        .and_then(|resource| resource.render_meshes(index))
        .cloned();

    let Some(meshes) = meshes else {
        tracing::debug!(
            render = %render.id(),
            container = %container.id(),
            index,
            "no render entry at index, meshes left unset"
        );
        return;
    };

    tracing::info!(
        "Bound render asset '{}' to '{}'[{}] ({} meshes)",
        render.id(),
        container.id(),
        index,
        meshes.len()
    );
    if let Some(resource) = render.resource.as_mut() {
        resource.set_meshes(Some(meshes));
    }
    render.state = BindState::Bound;
}

/// The container was removed: stop tracking its loads and tear the render resource down.
pub fn on_container_removed(
    asset: &RenderAssetRef,
    container: &ContainerRef,
    store: &dyn AssetStore,
) {
    let container_id = container.borrow().id().clone();
    let mut render = asset.borrow_mut();

    render.subscriptions.detach(store, &EventKey::load(&container_id));
    render.subscriptions.forget(&EventKey::remove(&container_id));

    if let Some(mut resource) = render.resource.take() {
        resource.destroy();
        tracing::info!(
            "Unloaded render asset '{}' (container '{}' removed)",
            render.id(),
            container_id
        );
    }
    render.state = BindState::Destroyed;
}

fn added_listener(asset: Weak<RefCell<RenderAsset>>) -> Listener {
    listener(move |store, container| {
        if let Some(asset) = asset.upgrade() {
            on_container_added(&asset, container, store);
        }
    })
}

fn loaded_listener(asset: Weak<RefCell<RenderAsset>>) -> Listener {
    listener(move |_, container| {
        if let Some(asset) = asset.upgrade() {
            on_container_loaded(&asset, container);
        }
    })
}

fn removed_listener(asset: Weak<RefCell<RenderAsset>>) -> Listener {
    listener(move |store, container| {
        if let Some(asset) = asset.upgrade() {
            on_container_removed(&asset, container, store);
        }
    })
}
