use crate::{AssetId, ContainerRef, EventKey, Listener, ListenerId};

/// The registry surface the render binder depends on.
///
/// Injected explicitly so binding can be driven by a fake store in tests.
/// `on`, `once` and `off` only edit subscriptions; they never deliver events
/// synchronously, so callers may hold borrows of their own state across them.
pub trait AssetStore {
    /// Look up a registered container asset.
    fn get(&self, id: &AssetId) -> Option<ContainerRef>;

    /// Begin loading `asset`. Completion is reported later through `load:<id>`.
    fn load(&self, asset: &ContainerRef);

    /// Persistent subscription.
    fn on(&self, key: EventKey, listener: Listener) -> ListenerId;

    /// One-shot subscription, revoked automatically on first delivery.
    fn once(&self, key: EventKey, listener: Listener) -> ListenerId;

    /// Revoke a subscription. No-op if it is not active.
    fn off(&self, key: &EventKey, id: ListenerId);
}
