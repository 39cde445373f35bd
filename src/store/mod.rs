// ============================================================================
// live-store - Store Module
// Listener registry, singleton fan-out store, and the external-store binding
// ============================================================================

pub mod binding;
pub mod listeners;
pub mod singleton;

// Re-export for convenience
pub use binding::{Binding, BindingGuard};
pub use listeners::ListenerSet;
pub use singleton::SingletonStore;
