// ============================================================================
// live-store - External-Store Binding
// The subscribe/snapshot/notify protocol consumed by the rendering layer
// ============================================================================
//
// A binding pulls values from a possibly-changing external store while the
// surrounding renderer may be interrupted, retried, or run concurrently with
// the source mutating. The invariants it upholds:
//
//   1. Every read inside one render pass sees the same value. If the source
//      changed underneath the pass, the pass is discarded and restarted with
//      the fresh value rather than committing a torn partial result.
//   2. A change between the delivered value and the next committed render
//      always fires the change callback - no silently dropped updates.
//   3. Connecting re-checks the snapshot immediately after registering,
//      closing the race between "read initial value" and "observe changes".
//   4. Teardown unsubscribes exactly once; no notifications afterwards.
//   5. A notification whose re-read compares equal to the last delivered
//      value is suppressed. Spurious wake-ups are tolerated, never torn.
// ============================================================================

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::core::types::{default_equals, EqualsFn, Listener, SourceAdapter, Unsubscribe};

/// Render passes restarted more times than this panic with a diagnostic:
/// the source is being mutated faster than any pass can complete.
const MAX_RENDER_RETRIES: u32 = 1000;

// =============================================================================
// BINDING
// =============================================================================

/// Tear-free view of one external source.
///
/// Built from a [`SourceAdapter`] (or raw `read`/`watch` closures) plus a
/// declared equality. Clones share the same "last delivered value" and so
/// represent the same consumer site.
///
/// # Example
///
/// ```
/// use live_store::store::binding::Binding;
/// use live_store::store::singleton::SingletonStore;
///
/// let store = SingletonStore::new(1);
/// let binding = Binding::new(store.clone());
///
/// let doubled = binding.render(|v| v * 2);
/// assert_eq!(doubled, 2);
///
/// store.ingest(21);
/// assert_eq!(binding.get(), 21);
/// ```
pub struct Binding<T> {
    inner: Arc<BindingInner<T>>,
}

struct BindingInner<T> {
    read: Box<dyn Fn() -> T + Send + Sync>,
    watch: Box<dyn Fn(Listener) -> Unsubscribe + Send + Sync>,
    equals: EqualsFn<T>,
    /// Last value handed to the consumer. None until the first read.
    last: Mutex<Option<T>>,
}

impl<T: Clone + Send + Sync + 'static> Binding<T> {
    /// Bind to a source adapter with PartialEq equality.
    pub fn new<A>(adapter: A) -> Self
    where
        A: SourceAdapter<Value = T> + 'static,
        T: PartialEq,
    {
        Self::new_with_equals(adapter, default_equals)
    }

    /// Bind to a source adapter with a caller-declared equality.
    pub fn new_with_equals<A>(adapter: A, equals: EqualsFn<T>) -> Self
    where
        A: SourceAdapter<Value = T> + 'static,
    {
        let adapter = Arc::new(adapter);
        let reader = adapter.clone();
        Self::from_fns_with_equals(
            move || reader.read(),
            move |notify| adapter.watch(notify),
            equals,
        )
    }

    /// Bind to raw `read`/`watch` closures.
    pub fn from_fns(
        read: impl Fn() -> T + Send + Sync + 'static,
        watch: impl Fn(Listener) -> Unsubscribe + Send + Sync + 'static,
    ) -> Self
    where
        T: PartialEq,
    {
        Self::from_fns_with_equals(read, watch, default_equals)
    }

    pub fn from_fns_with_equals(
        read: impl Fn() -> T + Send + Sync + 'static,
        watch: impl Fn(Listener) -> Unsubscribe + Send + Sync + 'static,
        equals: EqualsFn<T>,
    ) -> Self {
        Self {
            inner: Arc::new(BindingInner {
                read: Box::new(read),
                watch: Box::new(watch),
                equals,
                last: Mutex::new(None),
            }),
        }
    }

    /// Read the current snapshot and record it as delivered.
    pub fn get(&self) -> T {
        let value = (self.inner.read)();
        *self.inner.last.lock() = Some(value.clone());
        value
    }

    /// Read the current snapshot without recording it as delivered.
    pub fn peek(&self) -> T {
        (self.inner.read)()
    }

    /// Produce one logical output from a consistent snapshot.
    ///
    /// `f` may be re-invoked: after it returns, the source is re-read and,
    /// if the snapshot changed by the declared equality, the output is
    /// discarded and the pass restarts with the fresh value. The committed
    /// output therefore never mixes two values of the source.
    ///
    /// # Panics
    ///
    /// Panics if the source keeps changing for [`MAX_RENDER_RETRIES`]
    /// consecutive passes, which indicates a source being mutated from
    /// inside the render function itself.
    pub fn render<R>(&self, mut f: impl FnMut(&T) -> R) -> R {
        let mut value = (self.inner.read)();
        let mut attempts = 0u32;
        loop {
            let output = f(&value);

            let fresh = (self.inner.read)();
            if (self.inner.equals)(&value, &fresh) {
                *self.inner.last.lock() = Some(value);
                return output;
            }

            attempts += 1;
            if attempts >= MAX_RENDER_RETRIES {
                panic!(
                    "Maximum render retries exceeded. The external source changed on \
                     every pass; check for renders that write back to the source they read."
                );
            }
            tracing::trace!(attempts, "snapshot changed mid-render, restarting pass");
            value = fresh;
        }
    }

    /// Register interest in future changes.
    ///
    /// Subscribes to the source, then immediately re-checks the snapshot so
    /// a change that raced the registration is not dropped. `on_change`
    /// fires whenever a notification's re-read differs from the last
    /// delivered value; equal re-reads are suppressed.
    ///
    /// Dropping the returned guard (or calling
    /// [`BindingGuard::disconnect`]) removes the registration exactly once.
    pub fn connect(&self, on_change: impl Fn() + Send + Sync + 'static) -> BindingGuard {
        let weak: Weak<BindingInner<T>> = Arc::downgrade(&self.inner);
        let on_change = Arc::new(on_change);
        let recheck: Listener = Arc::new(move || {
            if let Some(inner) = weak.upgrade() {
                if inner.recheck() {
                    on_change();
                }
            }
        });

        // Subscribe first, then re-check: an event arriving between the two
        // steps fires the listener, an event arriving before the subscribe
        // is caught by the explicit re-check.
        let unsub = (self.inner.watch)(recheck.clone());
        recheck();

        BindingGuard { unsub }
    }
}

impl<T> BindingInner<T> {
    /// Re-read the snapshot and compare against the last delivered value.
    /// Records and reports a change; equal values are suppressed.
    fn recheck(&self) -> bool {
        let fresh = (self.read)();
        let mut last = self.last.lock();
        let changed = match &*last {
            Some(prev) => !(self.equals)(prev, &fresh),
            None => true,
        };
        if changed {
            *last = Some(fresh);
        }
        changed
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + std::fmt::Debug + 'static> std::fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding").field("value", &self.peek()).finish()
    }
}

// =============================================================================
// BINDING GUARD
// =============================================================================

/// Live connection between a binding and its consumer.
///
/// Unsubscribes on drop or on an explicit [`BindingGuard::disconnect`],
/// whichever comes first; the second is a no-op.
#[derive(Debug)]
pub struct BindingGuard {
    unsub: Unsubscribe,
}

impl BindingGuard {
    pub fn disconnect(&self) {
        self.unsub.call();
    }

    pub fn is_connected(&self) -> bool {
        !self.unsub.is_spent()
    }
}

impl Drop for BindingGuard {
    fn drop(&mut self) {
        self.unsub.call();
    }
}

// =============================================================================
// TESTS
// =============================================================================
