// ============================================================================
// live-store - Storage-Backed Value Adapter
// Persisted key/value with codec, default fallback, and change broadcast
// ============================================================================
//
// Watches the host's global, unscoped storage-change signal: every storage
// mutation wakes every storage adapter, which re-reads its own key and lets
// the binding's equality suppression discard irrelevant wake-ups. Broadcast
// plus local re-check was chosen over per-key fan-out; re-reads are cheap
// and correctness only needs eventual re-check.
//
// Corruption policy: a raw entry that fails to decode is reported, DELETED,
// and replaced by the default at the read site. Leaving the corrupt entry in
// place would re-log the same failure on every subsequent read.
// ============================================================================

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::error::CodecError;
use crate::core::types::{Listener, SourceAdapter, Unsubscribe};
use crate::host::Host;
use crate::store::binding::Binding;

// =============================================================================
// DEFAULT VALUE
// =============================================================================

/// Default for a storage-backed value: either a literal or a zero-argument
/// producer, resolved at read time.
#[derive(Clone)]
pub enum DefaultValue<T> {
    Literal(T),
    Producer(Arc<dyn Fn() -> T + Send + Sync>),
}

impl<T: Clone> DefaultValue<T> {
    pub fn resolve(&self) -> T {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Producer(produce) => produce(),
        }
    }
}

impl<T> From<T> for DefaultValue<T> {
    fn from(value: T) -> Self {
        Self::Literal(value)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for DefaultValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

// =============================================================================
// CODEC
// =============================================================================

/// Encode/decode pair mapping values to raw stored strings.
///
/// The default is canonical JSON via serde; custom codecs plug in any
/// textual encoding.
#[derive(Clone)]
pub struct Codec<T> {
    encode: Arc<dyn Fn(&T) -> Result<String, CodecError> + Send + Sync>,
    decode: Arc<dyn Fn(&str) -> Result<T, CodecError> + Send + Sync>,
}

impl<T> Codec<T> {
    pub fn new(
        encode: impl Fn(&T) -> Result<String, CodecError> + Send + Sync + 'static,
        decode: impl Fn(&str) -> Result<T, CodecError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            encode: Arc::new(encode),
            decode: Arc::new(decode),
        }
    }

    /// Canonical JSON codec.
    pub fn json() -> Self
    where
        T: Serialize + DeserializeOwned,
    {
        Self::new(
            |value| serde_json::to_string(value).map_err(|e| CodecError::Encode(e.to_string())),
            |raw| serde_json::from_str(raw).map_err(|e| CodecError::Decode(e.to_string())),
        )
    }

    pub fn encode(&self, value: &T) -> Result<String, CodecError> {
        (self.encode)(value)
    }

    pub fn decode(&self, raw: &str) -> Result<T, CodecError> {
        (self.decode)(raw)
    }
}

// =============================================================================
// STORED VALUE
// =============================================================================

/// A value persisted under one key in the host's storage.
///
/// Reads decode the raw entry if present, otherwise resolve the default;
/// decode failure never propagates. Writes persist the encoding, after
/// which the host broadcasts the storage-change signal.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use live_store::adapters::storage::StoredValue;
/// use live_store::core::types::SourceAdapter;
/// use live_store::host::SimHost;
///
/// let host = Arc::new(SimHost::new());
/// let theme: StoredValue<String> = StoredValue::new(host, "theme", "light".to_owned());
///
/// assert_eq!(theme.read(), "light");
/// theme.set(&"dark".to_owned());
/// assert_eq!(theme.read(), "dark");
/// ```
#[derive(Clone)]
pub struct StoredValue<T> {
    host: Arc<dyn Host>,
    key: String,
    default: DefaultValue<T>,
    codec: Codec<T>,
}

impl<T: Clone + Send + Sync + 'static> StoredValue<T> {
    /// Storage-backed value with the canonical JSON codec.
    pub fn new(
        host: Arc<dyn Host>,
        key: impl Into<String>,
        default: impl Into<DefaultValue<T>>,
    ) -> Self
    where
        T: Serialize + DeserializeOwned,
    {
        Self::with_codec(host, key, default, Codec::json())
    }

    /// Storage-backed value with a custom encode/decode pair.
    pub fn with_codec(
        host: Arc<dyn Host>,
        key: impl Into<String>,
        default: impl Into<DefaultValue<T>>,
        codec: Codec<T>,
    ) -> Self {
        Self {
            host,
            key: key.into(),
            default: default.into(),
            codec,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Persist a new value. An encode failure is reported and leaves the
    /// stored entry untouched.
    pub fn set(&self, value: &T) {
        match self.codec.encode(value) {
            Ok(raw) => self.host.storage_set(&self.key, &raw),
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "skipping persist of unencodable value");
            }
        }
    }

    /// Remove the stored entry; reads return the default afterwards.
    pub fn clear(&self) {
        self.host.storage_remove(&self.key);
    }

    /// Tear-free binding over this stored value. The binding and this
    /// handle share the same key, default, and codec.
    pub fn binding(&self) -> Binding<T>
    where
        T: PartialEq,
    {
        Binding::new(self.clone())
    }
}

impl<T: Clone + Send + Sync + 'static> SourceAdapter for StoredValue<T> {
    type Value = T;

    fn read(&self) -> T {
        let Some(raw) = self.host.storage_get(&self.key) else {
            return self.default.resolve();
        };
        match self.codec.decode(&raw) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(
                    key = %self.key,
                    %error,
                    "stored value failed to decode; deleting entry and falling back to default"
                );
                self.host.storage_remove(&self.key);
                self.default.resolve()
            }
        }
    }

    fn watch(&self, notify: Listener) -> Unsubscribe {
        self.host.on_storage_change(Arc::new(move |()| notify()))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SimHost;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn themed(host: &Arc<SimHost>) -> StoredValue<String> {
        StoredValue::new(host.clone(), "theme", "light".to_owned())
    }

    #[test]
    fn missing_entry_resolves_default() {
        let host = Arc::new(SimHost::new());
        assert_eq!(themed(&host).read(), "light");
    }

    #[test]
    fn producer_default_resolves_at_read_time() {
        let host = Arc::new(SimHost::new());
        let calls = Arc::new(AtomicU32::new(0));

        let c = calls.clone();
        let value: StoredValue<u32> = StoredValue::new(
            host,
            "counter",
            DefaultValue::Producer(Arc::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
                10
            })),
        );

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(value.read(), 10);
        assert_eq!(value.read(), 10);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn set_persists_canonical_encoding() {
        let host = Arc::new(SimHost::new());
        let theme = themed(&host);

        theme.set(&"dark".to_owned());
        assert_eq!(theme.read(), "dark");
        assert_eq!(host.storage_get("theme").as_deref(), Some("\"dark\""));
    }

    #[test]
    fn corrupt_entry_falls_back_and_is_deleted() {
        let host = Arc::new(SimHost::new());
        host.storage_seed("theme", "{definitely not json");

        let theme = themed(&host);
        assert_eq!(theme.read(), "light");
        assert_eq!(host.storage_get("theme"), None, "corrupt entry is deleted");
    }

    #[test]
    fn clear_returns_to_default() {
        let host = Arc::new(SimHost::new());
        let theme = themed(&host);

        theme.set(&"dark".to_owned());
        theme.clear();
        assert_eq!(theme.read(), "light");
    }

    #[test]
    fn watch_fires_on_any_storage_mutation() {
        let host = Arc::new(SimHost::new());
        let theme = themed(&host);
        let hits = Arc::new(AtomicU32::new(0));

        let h = hits.clone();
        let _sub = theme.watch(Arc::new(move || {
            h.fetch_add(1, Ordering::SeqCst);
        }));

        // Unscoped by design: an unrelated key still wakes the adapter.
        host.storage_set("other", "1");
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        theme.set(&"dark".to_owned());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn custom_codec_round_trip() {
        let host = Arc::new(SimHost::new());
        let upper: StoredValue<String> = StoredValue::with_codec(
            host.clone(),
            "shout",
            "quiet".to_owned(),
            Codec::new(
                |v: &String| Ok(v.to_uppercase()),
                |raw| Ok(raw.to_lowercase()),
            ),
        );

        upper.set(&"hello".to_owned());
        assert_eq!(host.storage_get("shout").as_deref(), Some("HELLO"));
        assert_eq!(upper.read(), "hello");
    }

    #[test]
    fn structured_payloads_round_trip() {
        #[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Prefs {
            font_size: u32,
            compact: bool,
        }

        let host = Arc::new(SimHost::new());
        let prefs: StoredValue<Prefs> = StoredValue::new(
            host,
            "prefs",
            Prefs {
                font_size: 14,
                compact: false,
            },
        );

        prefs.set(&Prefs {
            font_size: 16,
            compact: true,
        });
        assert_eq!(
            prefs.read(),
            Prefs {
                font_size: 16,
                compact: true
            }
        );
    }
}
