// ============================================================================
// live-store - Host Environment Interface
// Everything the adapters consume from the hosting environment
// ============================================================================
//
// The crate never talks to a real windowing system, event loop, or disk.
// Adapters consume these capabilities through the `Host` trait; embedders
// supply an implementation bridging to their environment. Two ship with the
// crate: `HeadlessHost` (deterministic zero values, inert registrations,
// for non-interactive contexts) and `SimHost` (fully scriptable in-memory
// environment used by the tests and examples).
// ============================================================================

pub mod headless;
pub mod sim;

use std::sync::Arc;

use crate::core::types::{PointerPosition, Unsubscribe, ViewportSize};

pub use headless::HeadlessHost;
pub use sim::SimHost;

// =============================================================================
// HOST TYPES
// =============================================================================

/// Callback invoked with an event payload.
pub type EventCallback<E> = Arc<dyn Fn(E) + Send + Sync>;

/// Opaque handle naming an element observable for intersection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

/// Observer configuration passed through opaquely to the host's
/// intersection primitive. The geometry math itself is the host's job.
#[derive(Clone, Debug, PartialEq)]
pub struct ObserverConfig {
    /// Element whose bounds act as the viewport; None means the root
    /// viewport.
    pub root: Option<ElementId>,
    /// Margin string in the host's own syntax (e.g. "0px 0px -40% 0px").
    pub root_margin: String,
    /// Visibility ratio at which the host reports a transition.
    pub threshold: f64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            root: None,
            root_margin: String::new(),
            threshold: 0.0,
        }
    }
}

// =============================================================================
// HOST TRAIT
// =============================================================================

/// Capability interface to the hosting environment.
///
/// Registration methods return an [`Unsubscribe`] that fully removes the
/// registration. Query methods are synchronous and non-blocking; a host
/// lacking a capability returns the documented zero value instead of
/// erroring.
pub trait Host: Send + Sync + 'static {
    // -------------------------------------------------------------------------
    // Event registration
    // -------------------------------------------------------------------------

    /// Global pointer-move events, with the new coordinates as payload.
    fn on_pointer_move(&self, callback: EventCallback<PointerPosition>) -> Unsubscribe;

    /// Scroll events on the root viewport. Trigger only; the current offset
    /// is read back through [`Host::scroll_offset`].
    fn on_scroll(&self, callback: EventCallback<()>) -> Unsubscribe;

    /// Viewport resize events. Trigger only; the current size is read back
    /// through [`Host::viewport_size`]. Hosts may fire these in bursts.
    fn on_resize(&self, callback: EventCallback<()>) -> Unsubscribe;

    /// Match-state changes scoped to one query string, with the new match
    /// state as payload.
    fn on_media_change(&self, query: &str, callback: EventCallback<bool>) -> Unsubscribe;

    /// The storage-change signal. Deliberately global and unscoped: it fires
    /// for every storage mutation regardless of key, and subscribers re-read
    /// and re-compare locally.
    fn on_storage_change(&self, callback: EventCallback<()>) -> Unsubscribe;

    /// Observe intersection of `target` against the configured root,
    /// reporting the intersecting boolean on each transition.
    fn observe_intersection(
        &self,
        target: ElementId,
        config: &ObserverConfig,
        callback: EventCallback<bool>,
    ) -> Unsubscribe;

    // -------------------------------------------------------------------------
    // Synchronous queries
    // -------------------------------------------------------------------------

    /// Current vertical scroll offset of the root viewport. `0.0` when there
    /// is no viewport.
    fn scroll_offset(&self) -> f64;

    /// Current viewport size. `0 x 0` when there is no viewport.
    fn viewport_size(&self) -> ViewportSize;

    /// Evaluate a media query string against the current environment.
    fn query_matches(&self, query: &str) -> bool;

    // -------------------------------------------------------------------------
    // Key/value persistence
    // -------------------------------------------------------------------------

    /// Raw stored entry for `key`, if present.
    fn storage_get(&self, key: &str) -> Option<String>;

    /// Persist a raw entry. Hosts must follow the write with a
    /// storage-change broadcast so subscribed adapters re-read.
    fn storage_set(&self, key: &str, raw: &str);

    /// Remove a stored entry. Also followed by a storage-change broadcast.
    fn storage_remove(&self, key: &str);
}
