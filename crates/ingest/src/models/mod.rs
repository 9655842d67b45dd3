//! Configuration and normalized record models.

mod config;
mod records;

pub use config::{AuthMode, IngestSettings, ProviderConfig};
pub use records::{GameKey, GameRecord, PlayerRecord, StatRecord, TeamRecord};
