// ============================================================================
// live-store - Pointer Position Adapter
// The one singleton source: a shared store fed by global pointer-move events
// ============================================================================

use std::sync::Arc;

use crate::core::types::{Listener, PointerPosition, SourceAdapter, Unsubscribe};
use crate::host::Host;
use crate::store::singleton::SingletonStore;

/// Build the shared pointer store for an environment.
///
/// Exactly one upstream pointer-move registration exists per environment,
/// however many consumers subscribe; all of them observe the same cached
/// coordinates. Created eagerly, removed when the environment drops the
/// store.
pub(crate) fn shared_pointer_store(host: Arc<dyn Host>) -> SingletonStore<PointerPosition> {
    SingletonStore::with_upstream(PointerPosition::default(), |ingest| {
        host.on_pointer_move(Arc::new(move |position| ingest(position)))
    })
}

/// Adapter over the environment's shared pointer store.
///
/// `read` is the cached last observed coordinates, `(0, 0)` before the
/// first event.
#[derive(Clone, Debug)]
pub struct PointerAdapter {
    store: SingletonStore<PointerPosition>,
}

impl PointerAdapter {
    pub(crate) fn new(store: SingletonStore<PointerPosition>) -> Self {
        Self { store }
    }
}

impl SourceAdapter for PointerAdapter {
    type Value = PointerPosition;

    fn read(&self) -> PointerPosition {
        self.store.snapshot()
    }

    fn watch(&self, notify: Listener) -> Unsubscribe {
        self.store.subscribe(notify)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SimHost;

    #[test]
    fn defaults_to_origin_before_first_event() {
        let host: Arc<dyn Host> = Arc::new(SimHost::new());
        let adapter = PointerAdapter::new(shared_pointer_store(host));
        assert_eq!(adapter.read(), PointerPosition::default());
    }

    #[test]
    fn tracks_pointer_moves() {
        let sim = Arc::new(SimHost::new());
        let adapter = PointerAdapter::new(shared_pointer_store(sim.clone()));

        sim.emit_pointer_move(120.0, 35.5);
        assert_eq!(adapter.read(), PointerPosition::new(120.0, 35.5));
    }

    #[test]
    fn dropping_the_store_removes_the_upstream_registration() {
        let sim = Arc::new(SimHost::new());
        {
            let _adapter = PointerAdapter::new(shared_pointer_store(sim.clone()));
            sim.emit_pointer_move(1.0, 1.0);
        }
        // The registration is gone; further events find no callback to run.
        sim.emit_pointer_move(2.0, 2.0);
    }
}
