use super::teams_model::Team;
use crate::errors::Result;

/// Trait defining the contract for Team repository operations.
///
/// Implemented by the storage adapter; the engine's own write
/// serialization is assumed there.
pub trait TeamRepositoryTrait: Send + Sync {
    fn find_by_abbreviation(&self, abbreviation: &str) -> Result<Option<Team>>;
    fn insert(&self, team: Team) -> Result<Team>;
    fn update(&self, team: Team) -> Result<Team>;
    fn list(&self) -> Result<Vec<Team>>;
}
