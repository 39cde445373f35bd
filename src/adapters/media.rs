// ============================================================================
// live-store - Media Query Adapter
// ============================================================================

use std::sync::Arc;

use crate::core::types::{Listener, SourceAdapter, Unsubscribe};
use crate::host::Host;

/// Boolean match state of one media query string.
///
/// A per-registration source: each adapter holds its own query and watches
/// the change channel the host scopes to that query. Requires a host with a
/// query-evaluation capability; on a headless host every query reads as
/// not matching.
#[derive(Clone)]
pub struct MediaQueryAdapter {
    host: Arc<dyn Host>,
    query: String,
}

impl MediaQueryAdapter {
    pub fn new(host: Arc<dyn Host>, query: impl Into<String>) -> Self {
        Self {
            host,
            query: query.into(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

impl SourceAdapter for MediaQueryAdapter {
    type Value = bool;

    fn read(&self) -> bool {
        self.host.query_matches(&self.query)
    }

    fn watch(&self, notify: Listener) -> Unsubscribe {
        // The payload (the new match state) is deliberately dropped; the
        // binding re-reads through query_matches like every other source.
        self.host
            .on_media_change(&self.query, Arc::new(move |_matches| notify()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SimHost;
    use std::sync::atomic::{AtomicU32, Ordering};

    const QUERY: &str = "(prefers-color-scheme: dark)";

    #[test]
    fn reads_current_match_state() {
        let sim = Arc::new(SimHost::new());
        let adapter = MediaQueryAdapter::new(sim.clone(), QUERY);

        assert!(!adapter.read());
        sim.set_query_match(QUERY, true);
        assert!(adapter.read());
    }

    #[test]
    fn only_its_own_query_notifies() {
        let sim = Arc::new(SimHost::new());
        let adapter = MediaQueryAdapter::new(sim.clone(), QUERY);
        let hits = Arc::new(AtomicU32::new(0));

        let h = hits.clone();
        let _sub = adapter.watch(Arc::new(move || {
            h.fetch_add(1, Ordering::SeqCst);
        }));

        sim.set_query_match("(min-width: 1200px)", true);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        sim.set_query_match(QUERY, true);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
