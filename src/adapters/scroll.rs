// ============================================================================
// live-store - Scroll Offset Adapter
// ============================================================================

use std::sync::Arc;

use crate::core::types::{Listener, SourceAdapter, Unsubscribe};
use crate::host::Host;

/// Current vertical scroll offset of the root viewport.
///
/// No cache of its own: the host multiplexes scroll registrations cheaply
/// and answers the offset query directly, so each consumer registers with
/// the host and re-reads on notify. `0.0` in windowless environments.
#[derive(Clone)]
pub struct ScrollAdapter {
    host: Arc<dyn Host>,
}

impl ScrollAdapter {
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self { host }
    }
}

impl SourceAdapter for ScrollAdapter {
    type Value = f64;

    fn read(&self) -> f64 {
        self.host.scroll_offset()
    }

    fn watch(&self, notify: Listener) -> Unsubscribe {
        self.host.on_scroll(Arc::new(move |()| notify()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HeadlessHost, SimHost};
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn reads_current_offset() {
        let sim = Arc::new(SimHost::new());
        let adapter = ScrollAdapter::new(sim.clone());

        assert_eq!(adapter.read(), 0.0);
        sim.set_scroll(420.5);
        assert_eq!(adapter.read(), 420.5);
    }

    #[test]
    fn notifies_on_scroll_events() {
        let sim = Arc::new(SimHost::new());
        let adapter = ScrollAdapter::new(sim.clone());
        let hits = Arc::new(AtomicU32::new(0));

        let h = hits.clone();
        let _sub = adapter.watch(Arc::new(move || {
            h.fetch_add(1, Ordering::SeqCst);
        }));

        sim.set_scroll(10.0);
        sim.set_scroll(20.0);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn headless_fallback_is_zero() {
        let adapter = ScrollAdapter::new(Arc::new(HeadlessHost::new()));
        assert_eq!(adapter.read(), 0.0);
    }
}
