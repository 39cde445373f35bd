// ============================================================================
// live-store - Headless Host
// The no-window fallback environment
// ============================================================================

use crate::core::types::{PointerPosition, Unsubscribe, ViewportSize};
use crate::host::{ElementId, EventCallback, Host, ObserverConfig};

/// Host for non-interactive contexts (pre-render, server-side, tests that
/// only exercise defaults).
///
/// Reads return the deterministic zero values the adapters declare as their
/// server snapshots; registrations are inert and never fire. Nothing here
/// errors: a missing capability is recovered, not reported.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeadlessHost;

impl HeadlessHost {
    pub fn new() -> Self {
        Self
    }
}

impl Host for HeadlessHost {
    fn on_pointer_move(&self, _callback: EventCallback<PointerPosition>) -> Unsubscribe {
        Unsubscribe::noop()
    }

    fn on_scroll(&self, _callback: EventCallback<()>) -> Unsubscribe {
        Unsubscribe::noop()
    }

    fn on_resize(&self, _callback: EventCallback<()>) -> Unsubscribe {
        Unsubscribe::noop()
    }

    fn on_media_change(&self, _query: &str, _callback: EventCallback<bool>) -> Unsubscribe {
        Unsubscribe::noop()
    }

    fn on_storage_change(&self, _callback: EventCallback<()>) -> Unsubscribe {
        Unsubscribe::noop()
    }

    fn observe_intersection(
        &self,
        _target: ElementId,
        _config: &ObserverConfig,
        _callback: EventCallback<bool>,
    ) -> Unsubscribe {
        Unsubscribe::noop()
    }

    fn scroll_offset(&self) -> f64 {
        0.0
    }

    fn viewport_size(&self) -> ViewportSize {
        ViewportSize::default()
    }

    fn query_matches(&self, _query: &str) -> bool {
        false
    }

    fn storage_get(&self, _key: &str) -> Option<String> {
        None
    }

    fn storage_set(&self, _key: &str, _raw: &str) {}

    fn storage_remove(&self, _key: &str) {}
}
