// ============================================================================
// live-store - Core Module
// Contract types shared by stores, bindings, and adapters
// ============================================================================

pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::CodecError;
pub use types::{
    always_equals, default_equals, never_equals, EqualsFn, Listener, PointerPosition,
    SourceAdapter, Unsubscribe, ViewportSize,
};
