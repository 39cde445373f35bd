// ============================================================================
// live-store - Simulated Host
// Scriptable in-memory environment for tests and examples
// ============================================================================

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::core::types::{PointerPosition, Unsubscribe, ViewportSize};
use crate::host::{ElementId, EventCallback, Host, ObserverConfig};

// =============================================================================
// EVENT CHANNEL
// =============================================================================

// Payload-carrying sibling of ListenerSet, private to the simulated host.
// Same removal semantics: membership is re-checked before each invocation.
struct Channel<E> {
    inner: Arc<ChannelInner<E>>,
}

struct ChannelInner<E> {
    next_id: AtomicU64,
    entries: Mutex<Vec<(u64, EventCallback<E>)>>,
}

impl<E: Clone + 'static> Channel<E> {
    fn new() -> Self {
        Self {
            inner: Arc::new(ChannelInner {
                next_id: AtomicU64::new(1),
                entries: Mutex::new(Vec::new()),
            }),
        }
    }

    fn attach(&self, callback: EventCallback<E>) -> Unsubscribe {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.entries.lock().push((id, callback));

        let weak: Weak<ChannelInner<E>> = Arc::downgrade(&self.inner);
        Unsubscribe::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.entries.lock().retain(|(eid, _)| *eid != id);
            }
        })
    }

    fn emit(&self, payload: E) {
        let snapshot: Vec<(u64, EventCallback<E>)> = self.inner.entries.lock().clone();
        for (id, callback) in snapshot {
            let live = self.inner.entries.lock().iter().any(|(eid, _)| *eid == id);
            if live {
                callback(payload.clone());
            }
        }
    }
}

impl<E> Default for Channel<E> {
    fn default() -> Self {
        Self {
            inner: Arc::new(ChannelInner {
                next_id: AtomicU64::new(1),
                entries: Mutex::new(Vec::new()),
            }),
        }
    }
}

// =============================================================================
// SIM HOST
// =============================================================================

/// In-memory host whose events are driven explicitly by the test or
/// example: `emit_pointer_move`, `set_viewport`, `set_scroll`,
/// `set_query_match`, `emit_intersection`, plus a real string-keyed storage
/// map wired to the unscoped storage-change broadcast.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use live_store::host::{Host, SimHost};
/// use live_store::core::types::ViewportSize;
///
/// let host = Arc::new(SimHost::new());
/// assert_eq!(host.viewport_size(), ViewportSize::default());
///
/// host.set_viewport(ViewportSize::new(800, 600));
/// assert_eq!(host.viewport_size(), ViewportSize::new(800, 600));
/// ```
pub struct SimHost {
    pointer_moves: Channel<PointerPosition>,
    scrolls: Channel<()>,
    resizes: Channel<()>,
    storage_changes: Channel<()>,
    media_channels: Mutex<HashMap<String, Arc<Channel<bool>>>>,
    intersection_channels: Mutex<HashMap<ElementId, Arc<Channel<bool>>>>,

    scroll_offset: Mutex<f64>,
    viewport: Mutex<ViewportSize>,
    media_matches: Mutex<HashMap<String, bool>>,
    storage: Mutex<HashMap<String, String>>,
}

impl SimHost {
    pub fn new() -> Self {
        Self {
            pointer_moves: Channel::new(),
            scrolls: Channel::new(),
            resizes: Channel::new(),
            storage_changes: Channel::new(),
            media_channels: Mutex::new(HashMap::new()),
            intersection_channels: Mutex::new(HashMap::new()),
            scroll_offset: Mutex::new(0.0),
            viewport: Mutex::new(ViewportSize::default()),
            media_matches: Mutex::new(HashMap::new()),
            storage: Mutex::new(HashMap::new()),
        }
    }

    // -------------------------------------------------------------------------
    // Drivers (the "outside world" half of the simulation)
    // -------------------------------------------------------------------------

    /// Move the simulated cursor, broadcasting a pointer-move event.
    pub fn emit_pointer_move(&self, x: f64, y: f64) {
        self.pointer_moves.emit(PointerPosition::new(x, y));
    }

    /// Set the scroll offset and fire a scroll event.
    pub fn set_scroll(&self, offset: f64) {
        *self.scroll_offset.lock() = offset;
        self.scrolls.emit(());
    }

    /// Resize the simulated viewport and fire a resize event.
    pub fn set_viewport(&self, size: ViewportSize) {
        *self.viewport.lock() = size;
        self.resizes.emit(());
    }

    /// Set the match state of one query, firing its scoped change channel.
    pub fn set_query_match(&self, query: &str, matches: bool) {
        self.media_matches.lock().insert(query.to_owned(), matches);
        let channel = self.media_channel(query);
        channel.emit(matches);
    }

    /// Report an intersection transition for one observed element.
    pub fn emit_intersection(&self, target: ElementId, intersecting: bool) {
        let channel = self.intersection_channel(target);
        channel.emit(intersecting);
    }

    /// Fire the storage-change broadcast without mutating the map, as an
    /// external writer (another session) would.
    pub fn emit_storage_change(&self) {
        self.storage_changes.emit(());
    }

    /// Write a raw entry without any broadcast. For planting corrupt or
    /// pre-existing data.
    pub fn storage_seed(&self, key: &str, raw: &str) {
        self.storage.lock().insert(key.to_owned(), raw.to_owned());
    }

    fn media_channel(&self, query: &str) -> Arc<Channel<bool>> {
        self.media_channels
            .lock()
            .entry(query.to_owned())
            .or_default()
            .clone()
    }

    fn intersection_channel(&self, target: ElementId) -> Arc<Channel<bool>> {
        self.intersection_channels
            .lock()
            .entry(target)
            .or_default()
            .clone()
    }
}

impl Default for SimHost {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SimHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimHost")
            .field("scroll_offset", &*self.scroll_offset.lock())
            .field("viewport", &*self.viewport.lock())
            .field("storage_keys", &self.storage.lock().len())
            .finish()
    }
}

impl Host for SimHost {
    fn on_pointer_move(&self, callback: EventCallback<PointerPosition>) -> Unsubscribe {
        self.pointer_moves.attach(callback)
    }

    fn on_scroll(&self, callback: EventCallback<()>) -> Unsubscribe {
        self.scrolls.attach(callback)
    }

    fn on_resize(&self, callback: EventCallback<()>) -> Unsubscribe {
        self.resizes.attach(callback)
    }

    fn on_media_change(&self, query: &str, callback: EventCallback<bool>) -> Unsubscribe {
        self.media_channel(query).attach(callback)
    }

    fn on_storage_change(&self, callback: EventCallback<()>) -> Unsubscribe {
        self.storage_changes.attach(callback)
    }

    fn observe_intersection(
        &self,
        target: ElementId,
        _config: &ObserverConfig,
        callback: EventCallback<bool>,
    ) -> Unsubscribe {
        // The simulation does no geometry; the config is accepted and the
        // test scripts transitions directly via emit_intersection.
        self.intersection_channel(target).attach(callback)
    }

    fn scroll_offset(&self) -> f64 {
        *self.scroll_offset.lock()
    }

    fn viewport_size(&self) -> ViewportSize {
        *self.viewport.lock()
    }

    fn query_matches(&self, query: &str) -> bool {
        self.media_matches.lock().get(query).copied().unwrap_or(false)
    }

    fn storage_get(&self, key: &str) -> Option<String> {
        self.storage.lock().get(key).cloned()
    }

    fn storage_set(&self, key: &str, raw: &str) {
        self.storage.lock().insert(key.to_owned(), raw.to_owned());
        self.storage_changes.emit(());
    }

    fn storage_remove(&self, key: &str) {
        self.storage.lock().remove(key);
        self.storage_changes.emit(());
    }
}

// =============================================================================
// TESTS
// =============================================================================
