//! Ingestion module - run outcomes, reconciliation, and the service
//! driving the four fetch-and-reconcile operations.

mod ingestion_model;
mod ingestion_service;
mod ingestion_traits;
mod reconciler;

pub use ingestion_model::RunOutcome;
pub use ingestion_service::IngestionService;
pub use ingestion_traits::IngestionServiceTrait;
pub use reconciler::{Reconciler, UpsertOutcome};
