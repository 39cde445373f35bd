// ============================================================================
// live-store - Viewport Size Adapter
// ============================================================================

use std::sync::Arc;

use crate::core::types::{Listener, SourceAdapter, Unsubscribe, ViewportSize};
use crate::host::Host;

/// Current width/height of the viewport.
///
/// Registers per consumer with the host's resize events and re-reads the
/// size on notify. Resize events may arrive in bursts; the binding's
/// equality suppression collapses bursts that land on the same size.
/// `0 x 0` in windowless environments.
#[derive(Clone)]
pub struct ViewportAdapter {
    host: Arc<dyn Host>,
}

impl ViewportAdapter {
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self { host }
    }
}

impl SourceAdapter for ViewportAdapter {
    type Value = ViewportSize;

    fn read(&self) -> ViewportSize {
        self.host.viewport_size()
    }

    fn watch(&self, notify: Listener) -> Unsubscribe {
        self.host.on_resize(Arc::new(move |()| notify()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HeadlessHost, SimHost};

    #[test]
    fn zero_size_before_first_resize() {
        let sim = Arc::new(SimHost::new());
        let adapter = ViewportAdapter::new(sim);
        assert_eq!(adapter.read(), ViewportSize::new(0, 0));
    }

    #[test]
    fn reflects_resize_events() {
        let sim = Arc::new(SimHost::new());
        let adapter = ViewportAdapter::new(sim.clone());

        sim.set_viewport(ViewportSize::new(800, 600));
        assert_eq!(adapter.read(), ViewportSize::new(800, 600));
    }

    #[test]
    fn headless_fallback_is_zero_size() {
        let adapter = ViewportAdapter::new(Arc::new(HeadlessHost::new()));
        assert_eq!(adapter.read(), ViewportSize::default());
    }
}
