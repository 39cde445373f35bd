// ============================================================================
// live-store - Type Definitions
// The source-adapter contract and the shared value/listener types
// ============================================================================

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

// =============================================================================
// LISTENER & UNSUBSCRIBE
// =============================================================================

/// A zero-argument change notification: "something changed, re-check".
///
/// Listeners carry no payload. The consumer that registered the listener is
/// expected to re-read the snapshot it cares about.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Handle that removes exactly one registration.
///
/// Calling [`Unsubscribe::call`] more than once is a no-op, and calling it
/// from inside a notify callback is safe. Clones share the same registration:
/// whichever clone fires first wins, the rest are no-ops.
///
/// # Example
///
/// ```
/// use live_store::core::types::Unsubscribe;
///
/// let unsub = Unsubscribe::new(|| println!("removed"));
/// unsub.call();
/// unsub.call(); // no-op, prints nothing
/// ```
#[derive(Clone)]
pub struct Unsubscribe {
    inner: Arc<Mutex<Option<Box<dyn FnOnce() + Send>>>>,
}

impl Unsubscribe {
    /// Wrap a removal closure. The closure runs at most once.
    pub fn new(f: impl FnOnce() + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(Box::new(f)))),
        }
    }

    /// An unsubscribe that does nothing. Used by inert host registrations.
    pub fn noop() -> Self {
        Self {
            inner: Arc::new(Mutex::new(None)),
        }
    }

    /// Remove the registration. Idempotent.
    pub fn call(&self) {
        // Take under the lock, invoke outside it: the removal closure may
        // itself lock listener registries.
        let f = self.inner.lock().take();
        if let Some(f) = f {
            f();
        }
    }

    /// Whether the registration has already been removed.
    pub fn is_spent(&self) -> bool {
        self.inner.lock().is_none()
    }
}

impl std::fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unsubscribe")
            .field("spent", &self.is_spent())
            .finish()
    }
}

// =============================================================================
// EQUALITY
// =============================================================================

/// Equality function used to decide whether a snapshot is "the same value".
pub type EqualsFn<T> = fn(&T, &T) -> bool;

/// Default equality using PartialEq.
pub fn default_equals<T: PartialEq>(a: &T, b: &T) -> bool {
    a == b
}

/// Never equal - every notification is treated as a distinct value.
pub fn never_equals<T>(_a: &T, _b: &T) -> bool {
    false
}

/// Always equal - notifications are never propagated downstream.
pub fn always_equals<T>(_a: &T, _b: &T) -> bool {
    true
}

// =============================================================================
// SOURCE ADAPTER CONTRACT
// =============================================================================

/// The two-operation contract every change source implements.
///
/// `read` must be synchronous, side-effect-free, and never block: it returns
/// the best currently-known value. `watch` registers a listener that fires
/// at-least-once per actual change; bursts may fire it a small constant
/// number of extra times. The returned [`Unsubscribe`] fully removes the
/// registration, even when called from within the listener itself.
pub trait SourceAdapter: Send + Sync {
    /// The snapshot type. Snapshots are immutable values; the binding relies
    /// on equality between successive reads to detect change.
    type Value: Clone + Send + 'static;

    /// Current value of the source.
    fn read(&self) -> Self::Value;

    /// Register a change listener. Returns the removal handle.
    fn watch(&self, notify: Listener) -> Unsubscribe;
}

// =============================================================================
// VALUE TYPES
// =============================================================================

/// Last observed cursor coordinates. `(0, 0)` before the first event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Current width/height of the viewport. `0 x 0` before the first resize
/// and in windowless environments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn unsubscribe_runs_once() {
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();
        let unsub = Unsubscribe::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!unsub.is_spent());
        unsub.call();
        unsub.call();
        unsub.call();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(unsub.is_spent());
    }

    #[test]
    fn unsubscribe_clones_share_one_shot() {
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();
        let a = Unsubscribe::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        let b = a.clone();

        a.call();
        b.call();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(b.is_spent());
    }

    #[test]
    fn noop_unsubscribe_is_spent() {
        let unsub = Unsubscribe::noop();
        assert!(unsub.is_spent());
        unsub.call(); // must not panic
    }

    #[test]
    fn equality_helpers() {
        assert!(default_equals(&42, &42));
        assert!(!default_equals(&42, &43));
        assert!(!never_equals(&42, &42));
        assert!(always_equals(&1, &2));
    }

    #[test]
    fn value_type_defaults() {
        assert_eq!(PointerPosition::default(), PointerPosition::new(0.0, 0.0));
        assert_eq!(ViewportSize::default(), ViewportSize::new(0, 0));
    }
}
