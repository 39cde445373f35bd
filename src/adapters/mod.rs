// ============================================================================
// live-store - Adapters Module
// The six concrete source adapters
// ============================================================================

pub mod intersection;
pub mod media;
pub mod pointer;
pub mod scroll;
pub mod storage;
pub mod viewport;

// Re-export for convenience
pub use intersection::IntersectionAdapter;
pub use media::MediaQueryAdapter;
pub use pointer::PointerAdapter;
pub use scroll::ScrollAdapter;
pub use storage::{Codec, DefaultValue, StoredValue};
pub use viewport::ViewportAdapter;
