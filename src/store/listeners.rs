// ============================================================================
// live-store - Listener Set
// Registry of change listeners with identity-based, idempotent removal
// ============================================================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::core::types::{Listener, Unsubscribe};

// =============================================================================
// LISTENER SET
// =============================================================================

/// A set of registered listeners.
///
/// Every insertion gets a fresh identity, so duplicates are impossible and
/// removal targets exactly one slot. Removal is idempotent and is effective
/// immediately: a listener removed while a notification pass is in progress
/// (including from inside another listener) will not be invoked by that pass.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use live_store::store::listeners::ListenerSet;
///
/// let set = ListenerSet::new();
/// let hits = Arc::new(AtomicU32::new(0));
///
/// let h = hits.clone();
/// let unsub = set.insert(Arc::new(move || {
///     h.fetch_add(1, Ordering::SeqCst);
/// }));
///
/// set.notify_all();
/// unsub.call();
/// set.notify_all();
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
#[derive(Clone)]
pub struct ListenerSet {
    inner: Arc<SetInner>,
}

struct SetInner {
    next_id: AtomicU64,
    entries: Mutex<Vec<(u64, Listener)>>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SetInner {
                next_id: AtomicU64::new(1),
                entries: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Register a listener. Returns the removal handle for exactly this slot.
    pub fn insert(&self, listener: Listener) -> Unsubscribe {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.entries.lock().push((id, listener));

        // Weak: the unsubscribe handle must not keep the set (and through it
        // every other listener) alive.
        let weak: Weak<SetInner> = Arc::downgrade(&self.inner);
        Unsubscribe::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.entries.lock().retain(|(eid, _)| *eid != id);
            }
        })
    }

    /// Invoke every currently-registered listener.
    ///
    /// The lock is never held while a listener runs, so listeners may freely
    /// subscribe or unsubscribe. Membership is re-checked right before each
    /// invocation: a listener removed by an earlier listener in the same pass
    /// is skipped.
    pub fn notify_all(&self) {
        let snapshot: Vec<(u64, Listener)> = self.inner.entries.lock().clone();
        for (id, listener) in snapshot {
            let still_registered = self
                .inner
                .entries
                .lock()
                .iter()
                .any(|(eid, _)| *eid == id);
            if still_registered {
                listener();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ListenerSet {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSet").field("len", &self.len()).finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
