// ============================================================================
// live-store - Environment
// The surface the rendering layer consumes: one operation per adapter
// ============================================================================

use std::sync::{Arc, OnceLock};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::adapters::intersection::IntersectionAdapter;
use crate::adapters::media::MediaQueryAdapter;
use crate::adapters::pointer::{shared_pointer_store, PointerAdapter};
use crate::adapters::scroll::ScrollAdapter;
use crate::adapters::storage::{Codec, DefaultValue, StoredValue};
use crate::adapters::viewport::ViewportAdapter;
use crate::core::types::{PointerPosition, ViewportSize};
use crate::host::{ElementId, HeadlessHost, Host, ObserverConfig};
use crate::store::binding::Binding;
use crate::store::singleton::SingletonStore;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Handle to one hosting environment and the live values it exposes.
///
/// Owns the per-environment singleton state: the shared pointer store is
/// created on first access (one upstream registration however many
/// consumers) and its registration is removed when the environment is
/// dropped. In a long-lived process hosting many logical sessions, create
/// one `Environment` per session rather than one per process.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use live_store::env::Environment;
/// use live_store::core::types::ViewportSize;
/// use live_store::host::SimHost;
///
/// let sim = Arc::new(SimHost::new());
/// let env = Environment::new(sim.clone());
///
/// let viewport = env.viewport_size();
/// assert_eq!(viewport.get(), ViewportSize::default());
///
/// sim.set_viewport(ViewportSize::new(800, 600));
/// assert_eq!(viewport.get(), ViewportSize::new(800, 600));
/// ```
pub struct Environment {
    host: Arc<dyn Host>,
    pointer: OnceLock<SingletonStore<PointerPosition>>,
}

impl Environment {
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self {
            host,
            pointer: OnceLock::new(),
        }
    }

    /// Environment with no live external sources: every binding reads its
    /// deterministic zero value and never notifies.
    pub fn headless() -> Self {
        Self::new(Arc::new(HeadlessHost::new()))
    }

    pub fn host(&self) -> &Arc<dyn Host> {
        &self.host
    }

    fn pointer_store(&self) -> &SingletonStore<PointerPosition> {
        self.pointer
            .get_or_init(|| shared_pointer_store(self.host.clone()))
    }

    // -------------------------------------------------------------------------
    // One operation per adapter
    // -------------------------------------------------------------------------

    /// Last observed cursor coordinates, `(0, 0)` before the first event.
    /// All bindings from one environment share a single upstream
    /// registration and observe identical coordinates.
    pub fn pointer_position(&self) -> Binding<PointerPosition> {
        Binding::new(PointerAdapter::new(self.pointer_store().clone()))
    }

    /// Current vertical scroll offset of the root viewport.
    pub fn scroll_offset(&self) -> Binding<f64> {
        Binding::new(ScrollAdapter::new(self.host.clone()))
    }

    /// Current viewport size.
    pub fn viewport_size(&self) -> Binding<ViewportSize> {
        Binding::new(ViewportAdapter::new(self.host.clone()))
    }

    /// Match state of a media query string.
    pub fn media_query(&self, query: impl Into<String>) -> Binding<bool> {
        Binding::new(MediaQueryAdapter::new(self.host.clone(), query))
    }

    /// Value persisted under `key`, canonical JSON encoding.
    pub fn stored<T>(
        &self,
        key: impl Into<String>,
        default: impl Into<DefaultValue<T>>,
    ) -> StoredValue<T>
    where
        T: Clone + Send + Sync + Serialize + DeserializeOwned + 'static,
    {
        StoredValue::new(self.host.clone(), key, default)
    }

    /// Value persisted under `key` with a custom codec.
    pub fn stored_with_codec<T>(
        &self,
        key: impl Into<String>,
        default: impl Into<DefaultValue<T>>,
        codec: Codec<T>,
    ) -> StoredValue<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        StoredValue::with_codec(self.host.clone(), key, default, codec)
    }

    /// Intersection state of `target` under the given observer
    /// configuration, `false` until the first observation.
    pub fn intersection(&self, target: ElementId, config: ObserverConfig) -> Binding<bool> {
        Binding::new(IntersectionAdapter::new(self.host.clone(), target, config))
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("pointer_store_initialized", &self.pointer.get().is_some())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SimHost;

    #[test]
    fn pointer_store_is_created_once_and_shared() {
        let sim = Arc::new(SimHost::new());
        let env = Environment::new(sim.clone());

        let a = env.pointer_position();
        let b = env.pointer_position();

        sim.emit_pointer_move(5.0, 6.0);
        assert_eq!(a.get(), PointerPosition::new(5.0, 6.0));
        assert_eq!(b.get(), PointerPosition::new(5.0, 6.0));
    }

    #[test]
    fn pointer_store_is_lazy() {
        let env = Environment::headless();
        assert!(env.pointer.get().is_none());
        let _binding = env.pointer_position();
        assert!(env.pointer.get().is_some());
    }

    #[test]
    fn headless_bindings_read_zero_values() {
        let env = Environment::headless();
        assert_eq!(env.pointer_position().get(), PointerPosition::default());
        assert_eq!(env.scroll_offset().get(), 0.0);
        assert_eq!(env.viewport_size().get(), ViewportSize::default());
        assert!(!env.media_query("(min-width: 600px)").get());
        assert!(!env.intersection(ElementId(1), ObserverConfig::default()).get());
    }

    #[test]
    fn stored_value_through_environment() {
        let sim = Arc::new(SimHost::new());
        let env = Environment::new(sim);

        let theme: StoredValue<String> = env.stored("theme", "light".to_owned());
        theme.set(&"dark".to_owned());

        use crate::core::types::SourceAdapter;
        assert_eq!(theme.read(), "dark");
    }
}
