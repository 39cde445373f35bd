// ============================================================================
// live-store - External-Store Synchronization for Reactive Renderers
// ============================================================================
//
// Exposes live, externally-mutated host values (pointer position, scroll
// offset, viewport size, media-query match, persisted key/value, element
// visibility) through one uniform subscribe/snapshot/notify protocol.
//
// Layered bottom-up:
//   - adapters:  one thin `read`/`watch` wrapper per external source
//   - store:     singleton fan-out (one upstream registration, many
//                consumers) and the tear-free external-store binding
//   - host:      the capability interface to the environment, with
//                headless and simulated implementations
//   - env:       the surface the rendering layer consumes
//
// The engineering discipline lives in the binding: every read inside one
// render pass sees the same value, changes between renders always schedule
// a re-render, and notifications whose re-read compares equal to the last
// delivered value are suppressed.
// ============================================================================

pub mod adapters;
pub mod core;
pub mod env;
pub mod host;
pub mod store;

// Re-export the primary surface at crate root
pub use adapters::{Codec, DefaultValue, IntersectionAdapter, MediaQueryAdapter, PointerAdapter,
    ScrollAdapter, StoredValue, ViewportAdapter};
pub use crate::core::error::CodecError;
pub use crate::core::types::{
    always_equals, default_equals, never_equals, EqualsFn, Listener, PointerPosition,
    SourceAdapter, Unsubscribe, ViewportSize,
};
pub use env::Environment;
pub use host::{ElementId, HeadlessHost, Host, ObserverConfig, SimHost};
pub use store::{Binding, BindingGuard, ListenerSet, SingletonStore};

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    // End-to-end smoke: the full stack from host event to committed render.
    #[test]
    fn event_to_render_round_trip() {
        let sim = Arc::new(SimHost::new());
        let env = Environment::new(sim.clone());

        let viewport = env.viewport_size();
        assert_eq!(viewport.render(|v| (v.width, v.height)), (0, 0));

        sim.set_viewport(ViewportSize::new(1280, 720));
        assert_eq!(viewport.render(|v| (v.width, v.height)), (1280, 720));
    }

    #[test]
    fn adapters_share_one_protocol_shape() {
        // Every adapter variant is a SourceAdapter; the binding does not
        // care which one it wraps.
        fn bind_any<A: SourceAdapter + 'static>(adapter: A) -> Binding<A::Value>
        where
            A::Value: PartialEq + Sync,
        {
            Binding::new(adapter)
        }

        let sim = Arc::new(SimHost::new());
        let _pointer = bind_any(PointerAdapter::new(
            SingletonStore::new(PointerPosition::default()),
        ));
        let _scroll = bind_any(ScrollAdapter::new(sim.clone()));
        let _viewport = bind_any(ViewportAdapter::new(sim.clone()));
        let _media = bind_any(MediaQueryAdapter::new(sim.clone(), "(hover: hover)"));
        let _stored = bind_any(StoredValue::<String>::new(
            sim.clone(),
            "k",
            String::new(),
        ));
        let _intersection = bind_any(IntersectionAdapter::new(
            sim,
            ElementId(1),
            ObserverConfig::default(),
        ));
    }
}
