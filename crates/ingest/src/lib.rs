//! Statline Ingest Crate
//!
//! Provider-facing ingestion layer for the statline application: everything
//! between "the caller asked for a resource" and "a provider's payload became
//! normalized records".
//!
//! # Overview
//!
//! External sports data providers are independent, unreliable, and shaped
//! differently. This crate absorbs those differences behind one capability
//! interface:
//! - Per-provider rate limiting (minimum request spacing)
//! - Resilience: bounded retry with backoff, circuit breaking, timeouts
//! - Authentication variants bound at construction time
//! - A registry from configured name to a pre-built adapter
//! - A run-scoped correlation cache for providers whose resources only
//!   connect through opaque native identifiers
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |     Registry     | --> | SportsDataProvider|  (bound adapter)
//! +------------------+     +------------------+
//!                                   |
//!                                   v
//!                           +------------------+
//!                           |   FetchClient    |  (auth + pacing + resilience)
//!                           +------------------+
//!                                   |
//!                                   v
//!                           +------------------+
//!                           |   FetchOutcome   |  (records or classified failure)
//!                           +------------------+
//! ```
//!
//! Reconciliation of the resulting records into the local store lives in
//! the `statline-core` crate.

pub mod client;
pub mod correlation;
pub mod errors;
pub mod models;
pub mod provider;
pub mod registry;

// Re-export the commonly used types
pub use correlation::{CorrelationCache, CorrelationKey};
pub use errors::{FetchError, FetchOutcome, RegistryError, RetryClass};
pub use models::{
    AuthMode, GameKey, GameRecord, IngestSettings, PlayerRecord, ProviderConfig, StatRecord,
    TeamRecord,
};
pub use provider::SportsDataProvider;
pub use registry::ProviderRegistry;
