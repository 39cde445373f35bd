// ============================================================================
// live-store - Singleton Synchronization Store
// One upstream registration fanned out to many downstream consumers
// ============================================================================
//
// For sources with exactly one logical instance per environment (pointer
// position), keeping one registration per consumer would be wasteful and
// would let consumers observe different values of the same source. The
// singleton store owns the single upstream registration, caches the
// authoritative current value, and re-broadcasts to its listener set.
//
// Ordering guarantee: the cache update happens-before every listener
// invocation. A listener that re-reads the snapshot always sees the payload
// of the event that woke it (or a newer one), never a partially-updated or
// stale cache.
// ============================================================================

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use crate::core::types::{Listener, SourceAdapter, Unsubscribe};
use crate::store::listeners::ListenerSet;

// =============================================================================
// SINGLETON STORE
// =============================================================================

/// Fan-out store for a singleton external source.
///
/// Clones share the same cache and listener set. The upstream registration
/// is created eagerly by [`SingletonStore::with_upstream`] and removed when
/// the last clone is dropped, scoping the source's lifetime to its owning
/// environment rather than to the whole process.
pub struct SingletonStore<T> {
    inner: Arc<StoreInner<T>>,
}

struct StoreInner<T> {
    value: RwLock<T>,
    listeners: ListenerSet,
    upstream: Mutex<Option<Unsubscribe>>,
}

impl<T: Clone + Send + Sync + 'static> SingletonStore<T> {
    /// Create a store with no upstream registration. Values arrive only via
    /// [`SingletonStore::ingest`].
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                value: RwLock::new(initial),
                listeners: ListenerSet::new(),
                upstream: Mutex::new(None),
            }),
        }
    }

    /// Create a store and eagerly attach it to its external source.
    ///
    /// `attach` receives an ingest function (weak, so the registration does
    /// not keep the store alive) and returns the upstream removal handle.
    ///
    /// # Example
    ///
    /// ```
    /// use live_store::core::types::Unsubscribe;
    /// use live_store::store::singleton::SingletonStore;
    ///
    /// let store = SingletonStore::with_upstream(0u32, |ingest| {
    ///     ingest(7); // a real source would stash `ingest` in its callback
    ///     Unsubscribe::noop()
    /// });
    /// assert_eq!(store.snapshot(), 7);
    /// ```
    pub fn with_upstream(
        initial: T,
        attach: impl FnOnce(Arc<dyn Fn(T) + Send + Sync>) -> Unsubscribe,
    ) -> Self {
        let store = Self::new(initial);
        let weak: Weak<StoreInner<T>> = Arc::downgrade(&store.inner);
        let ingest: Arc<dyn Fn(T) + Send + Sync> = Arc::new(move |value| {
            if let Some(inner) = weak.upgrade() {
                StoreInner::ingest(&inner, value);
            }
        });
        let registration = attach(ingest);
        *store.inner.upstream.lock() = Some(registration);
        store
    }

    /// The cached current value. Never triggers a fresh read from the
    /// external source: between events the cache is the source of truth.
    pub fn snapshot(&self) -> T {
        self.inner.value.read().clone()
    }

    /// Register a downstream listener. The returned handle removes exactly
    /// that listener and is idempotent.
    pub fn subscribe(&self, listener: Listener) -> Unsubscribe {
        self.inner.listeners.insert(listener)
    }

    /// Feed an external event payload into the store: update the cache, then
    /// re-broadcast to every registered listener.
    pub fn ingest(&self, value: T) {
        StoreInner::ingest(&self.inner, value);
    }

    /// Number of live downstream listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }
}

impl<T> StoreInner<T> {
    fn ingest(inner: &Arc<Self>, value: T) {
        {
            // Write lock released before any listener runs.
            *inner.value.write() = value;
        }
        tracing::trace!(
            listeners = inner.listeners.len(),
            "singleton store ingested external event"
        );
        inner.listeners.notify_all();
    }
}

impl<T> Drop for StoreInner<T> {
    fn drop(&mut self) {
        // Tear down the upstream registration with the real external source.
        if let Some(upstream) = self.upstream.lock().take() {
            upstream.call();
        }
    }
}

impl<T> Clone for SingletonStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + std::fmt::Debug + 'static> std::fmt::Debug for SingletonStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingletonStore")
            .field("value", &self.snapshot())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

// A singleton store is itself a source adapter: read from the cache, watch
// the listener set.
impl<T: Clone + Send + Sync + 'static> SourceAdapter for SingletonStore<T> {
    type Value = T;

    fn read(&self) -> T {
        self.snapshot()
    }

    fn watch(&self, notify: Listener) -> Unsubscribe {
        self.subscribe(notify)
    }
}

// =============================================================================
// TESTS
// =============================================================================
