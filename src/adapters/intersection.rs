// ============================================================================
// live-store - Intersection State Adapter
// ============================================================================

use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::types::{Listener, SourceAdapter, Unsubscribe};
use crate::host::{ElementId, Host, ObserverConfig};

/// Last reported intersecting boolean for one target element.
///
/// The observer configuration (root, margin, threshold) is passed through
/// to the host opaquely; the geometry is the host's job. The adapter caches
/// the most recent report and reads `false` until the first observation.
#[derive(Clone)]
pub struct IntersectionAdapter {
    host: Arc<dyn Host>,
    target: ElementId,
    config: ObserverConfig,
    intersecting: Arc<RwLock<bool>>,
}

impl IntersectionAdapter {
    pub fn new(host: Arc<dyn Host>, target: ElementId, config: ObserverConfig) -> Self {
        Self {
            host,
            target,
            config,
            intersecting: Arc::new(RwLock::new(false)),
        }
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    pub fn config(&self) -> &ObserverConfig {
        &self.config
    }
}

impl SourceAdapter for IntersectionAdapter {
    type Value = bool;

    fn read(&self) -> bool {
        *self.intersecting.read()
    }

    fn watch(&self, notify: Listener) -> Unsubscribe {
        let cache = self.intersecting.clone();
        self.host.observe_intersection(
            self.target,
            &self.config,
            Arc::new(move |intersecting| {
                // Cache update happens-before the notification.
                *cache.write() = intersecting;
                notify();
            }),
        )
    }
}
