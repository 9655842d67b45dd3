use async_trait::async_trait;

use super::ingestion_model::RunOutcome;

/// Trait defining the contract for ingestion operations.
///
/// The surface the scheduler/CLI layer drives: four fetch-and-reconcile
/// operations, each resolving to one [`RunOutcome`]. These methods never
/// return an error - failures below the configuration tier are folded
/// into the outcome.
#[async_trait]
pub trait IngestionServiceTrait: Send + Sync {
    /// Fetch and reconcile teams, optionally narrowed to one abbreviation.
    async fn ingest_teams(&self, provider: &str, team: Option<&str>) -> RunOutcome;

    /// Fetch and reconcile rosters for one team, or every stored team.
    async fn ingest_rosters(&self, provider: &str, team: Option<&str>) -> RunOutcome;

    /// Fetch and reconcile a season's games, optionally one week.
    async fn ingest_games(&self, provider: &str, season: u16, week: Option<u8>) -> RunOutcome;

    /// Fetch and reconcile player stat lines for a season/week.
    async fn ingest_stats(&self, provider: &str, season: u16, week: u8) -> RunOutcome;
}
