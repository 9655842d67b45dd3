//! Bundled store implementations.
//!
//! The persistent engine is an external adapter implementing the
//! repository traits; this module only ships the in-memory default.

mod memory;

pub use memory::MemoryStore;
