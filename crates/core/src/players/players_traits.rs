use super::players_model::Player;
use crate::errors::Result;

/// Trait defining the contract for Player repository operations.
pub trait PlayerRepositoryTrait: Send + Sync {
    fn find_by_name_and_team(&self, name: &str, team: &str) -> Result<Option<Player>>;
    fn insert(&self, player: Player) -> Result<Player>;
    fn update(&self, player: Player) -> Result<Player>;
    fn list_by_team(&self, team: &str) -> Result<Vec<Player>>;
    fn list(&self) -> Result<Vec<Player>>;
}
