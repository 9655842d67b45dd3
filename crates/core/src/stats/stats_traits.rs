use statline_ingest::models::GameKey;

use super::stats_model::PlayerGameStat;
use crate::errors::Result;

/// Trait defining the contract for PlayerGameStat repository operations.
pub trait StatRepositoryTrait: Send + Sync {
    fn find_by_player_and_game(
        &self,
        player_name: &str,
        team: &str,
        game: &GameKey,
    ) -> Result<Option<PlayerGameStat>>;
    fn insert(&self, stat: PlayerGameStat) -> Result<PlayerGameStat>;
    fn update(&self, stat: PlayerGameStat) -> Result<PlayerGameStat>;
    fn list_by_game(&self, game: &GameKey) -> Result<Vec<PlayerGameStat>>;
    fn list(&self) -> Result<Vec<PlayerGameStat>>;
}
