use statline_ingest::models::GameKey;

use super::games_model::Game;
use crate::errors::Result;

/// Trait defining the contract for Game repository operations.
pub trait GameRepositoryTrait: Send + Sync {
    fn find_by_key(&self, key: &GameKey) -> Result<Option<Game>>;
    fn insert(&self, game: Game) -> Result<Game>;
    fn update(&self, game: Game) -> Result<Game>;
    fn list_by_season_week(&self, season: u16, week: u8) -> Result<Vec<Game>>;
    fn list(&self) -> Result<Vec<Game>>;
}
