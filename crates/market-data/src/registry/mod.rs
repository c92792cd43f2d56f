//! Provider registry module.
//!
//! Holds the providers configured at startup in slot order. The registry is
//! built once and shared read-only by the scheduler and the store.

mod registry;

pub use registry::ProviderRegistry;
