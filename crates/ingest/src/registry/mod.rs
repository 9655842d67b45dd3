//! Provider registry module.
//!
//! Binds configured provider names to pre-built capability adapters,
//! rejecting unknown names at registration time.

mod registry;

pub use registry::ProviderRegistry;
