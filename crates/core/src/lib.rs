//! Statline Core - Domain entities, services, and traits.
//!
//! This crate contains the reconciliation side of statline: domain
//! entities keyed by natural key, repository traits the storage adapter
//! implements, the idempotent reconciler, and the ingestion service that
//! drives provider adapters from the `statline-ingest` crate.
//!
//! It is storage-agnostic: the persistent engine lives behind the
//! repository traits, and the bundled [`store::MemoryStore`] is the
//! default for tests and embeddings without one.

pub mod errors;
pub mod games;
pub mod ingestion;
pub mod players;
pub mod stats;
pub mod store;
pub mod teams;

// Re-export the entity and service types
pub use games::{Game, GameRepositoryTrait};
pub use ingestion::{
    IngestionService, IngestionServiceTrait, Reconciler, RunOutcome, UpsertOutcome,
};
pub use players::{Player, PlayerRepositoryTrait};
pub use stats::{PlayerGameStat, StatRepositoryTrait};
pub use store::MemoryStore;
pub use teams::{Team, TeamRepositoryTrait};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
