//! In-memory store implementing every repository trait.
//!
//! The bundled default for tests and embeddings that do not attach a
//! persistent engine. Rows live in maps keyed by natural key, so the
//! one-row-per-key invariant holds by construction; `insert` still rejects
//! duplicates to keep the same contract a real engine's unique constraint
//! would enforce.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::warn;
use statline_ingest::models::GameKey;

use crate::errors::{Error, Result};
use crate::games::{Game, GameRepositoryTrait};
use crate::players::{Player, PlayerRepositoryTrait};
use crate::stats::{PlayerGameStat, StatRepositoryTrait};
use crate::teams::{Team, TeamRepositoryTrait};

type PlayerKey = (String, String);
type StatKey = (String, String, GameKey);

/// In-memory implementation of the four repository traits.
#[derive(Default)]
pub struct MemoryStore {
    teams: RwLock<HashMap<String, Team>>,
    players: RwLock<HashMap<PlayerKey, Player>>,
    games: RwLock<HashMap<GameKey, Game>>,
    stats: RwLock<HashMap<StatKey, PlayerGameStat>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Read-lock a map, recovering from poison if necessary.
fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| {
        warn!("Memory store lock was poisoned, recovering");
        poisoned.into_inner()
    })
}

/// Write-lock a map, recovering from poison if necessary.
fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| {
        warn!("Memory store lock was poisoned, recovering");
        poisoned.into_inner()
    })
}

impl TeamRepositoryTrait for MemoryStore {
    fn find_by_abbreviation(&self, abbreviation: &str) -> Result<Option<Team>> {
        Ok(read_lock(&self.teams).get(abbreviation).cloned())
    }

    fn insert(&self, team: Team) -> Result<Team> {
        let mut teams = write_lock(&self.teams);
        if teams.contains_key(&team.abbreviation) {
            return Err(Error::Storage(format!(
                "team '{}' already exists",
                team.abbreviation
            )));
        }
        teams.insert(team.abbreviation.clone(), team.clone());
        Ok(team)
    }

    fn update(&self, team: Team) -> Result<Team> {
        let mut teams = write_lock(&self.teams);
        if !teams.contains_key(&team.abbreviation) {
            return Err(Error::Storage(format!(
                "team '{}' not found",
                team.abbreviation
            )));
        }
        teams.insert(team.abbreviation.clone(), team.clone());
        Ok(team)
    }

    fn list(&self) -> Result<Vec<Team>> {
        let mut teams: Vec<Team> = read_lock(&self.teams).values().cloned().collect();
        teams.sort_by(|a, b| a.abbreviation.cmp(&b.abbreviation));
        Ok(teams)
    }
}

impl PlayerRepositoryTrait for MemoryStore {
    fn find_by_name_and_team(&self, name: &str, team: &str) -> Result<Option<Player>> {
        Ok(read_lock(&self.players)
            .get(&(name.to_string(), team.to_string()))
            .cloned())
    }

    fn insert(&self, player: Player) -> Result<Player> {
        let key = (player.name.clone(), player.team_abbreviation.clone());
        let mut players = write_lock(&self.players);
        if players.contains_key(&key) {
            return Err(Error::Storage(format!(
                "player '{}' ({}) already exists",
                player.name, player.team_abbreviation
            )));
        }
        players.insert(key, player.clone());
        Ok(player)
    }

    fn update(&self, player: Player) -> Result<Player> {
        let key = (player.name.clone(), player.team_abbreviation.clone());
        let mut players = write_lock(&self.players);
        if !players.contains_key(&key) {
            return Err(Error::Storage(format!(
                "player '{}' ({}) not found",
                player.name, player.team_abbreviation
            )));
        }
        players.insert(key, player.clone());
        Ok(player)
    }

    fn list_by_team(&self, team: &str) -> Result<Vec<Player>> {
        let mut players: Vec<Player> = read_lock(&self.players)
            .values()
            .filter(|p| p.team_abbreviation == team)
            .cloned()
            .collect();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(players)
    }

    fn list(&self) -> Result<Vec<Player>> {
        let mut players: Vec<Player> = read_lock(&self.players).values().cloned().collect();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(players)
    }
}

impl GameRepositoryTrait for MemoryStore {
    fn find_by_key(&self, key: &GameKey) -> Result<Option<Game>> {
        Ok(read_lock(&self.games).get(key).cloned())
    }

    fn insert(&self, game: Game) -> Result<Game> {
        let mut games = write_lock(&self.games);
        if games.contains_key(&game.key) {
            return Err(Error::Storage(format!("game '{}' already exists", game.key)));
        }
        games.insert(game.key.clone(), game.clone());
        Ok(game)
    }

    fn update(&self, game: Game) -> Result<Game> {
        let mut games = write_lock(&self.games);
        if !games.contains_key(&game.key) {
            return Err(Error::Storage(format!("game '{}' not found", game.key)));
        }
        games.insert(game.key.clone(), game.clone());
        Ok(game)
    }

    fn list_by_season_week(&self, season: u16, week: u8) -> Result<Vec<Game>> {
        let mut games: Vec<Game> = read_lock(&self.games)
            .values()
            .filter(|g| g.key.season == season && g.key.week == week)
            .cloned()
            .collect();
        games.sort_by(|a, b| a.key.home_team.cmp(&b.key.home_team));
        Ok(games)
    }

    fn list(&self) -> Result<Vec<Game>> {
        let mut games: Vec<Game> = read_lock(&self.games).values().cloned().collect();
        games.sort_by(|a, b| {
            (a.key.season, a.key.week, &a.key.home_team)
                .cmp(&(b.key.season, b.key.week, &b.key.home_team))
        });
        Ok(games)
    }
}

impl StatRepositoryTrait for MemoryStore {
    fn find_by_player_and_game(
        &self,
        player_name: &str,
        team: &str,
        game: &GameKey,
    ) -> Result<Option<PlayerGameStat>> {
        Ok(read_lock(&self.stats)
            .get(&(player_name.to_string(), team.to_string(), game.clone()))
            .cloned())
    }

    fn insert(&self, stat: PlayerGameStat) -> Result<PlayerGameStat> {
        let key = (
            stat.player_name.clone(),
            stat.team_abbreviation.clone(),
            stat.game.clone(),
        );
        let mut stats = write_lock(&self.stats);
        if stats.contains_key(&key) {
            return Err(Error::Storage(format!(
                "stat line for '{}' in '{}' already exists",
                stat.player_name, stat.game
            )));
        }
        stats.insert(key, stat.clone());
        Ok(stat)
    }

    fn update(&self, stat: PlayerGameStat) -> Result<PlayerGameStat> {
        let key = (
            stat.player_name.clone(),
            stat.team_abbreviation.clone(),
            stat.game.clone(),
        );
        let mut stats = write_lock(&self.stats);
        if !stats.contains_key(&key) {
            return Err(Error::Storage(format!(
                "stat line for '{}' in '{}' not found",
                stat.player_name, stat.game
            )));
        }
        stats.insert(key, stat.clone());
        Ok(stat)
    }

    fn list_by_game(&self, game: &GameKey) -> Result<Vec<PlayerGameStat>> {
        let mut stats: Vec<PlayerGameStat> = read_lock(&self.stats)
            .values()
            .filter(|s| &s.game == game)
            .cloned()
            .collect();
        stats.sort_by(|a, b| a.player_name.cmp(&b.player_name));
        Ok(stats)
    }

    fn list(&self) -> Result<Vec<PlayerGameStat>> {
        let mut stats: Vec<PlayerGameStat> = read_lock(&self.stats).values().cloned().collect();
        stats.sort_by(|a, b| a.player_name.cmp(&b.player_name));
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(abbr: &str) -> Team {
        Team {
            abbreviation: abbr.to_string(),
            name: "Chiefs".to_string(),
            city: "Kansas City".to_string(),
            conference: Some("AFC".to_string()),
            division: Some("West".to_string()),
        }
    }

    #[test]
    fn test_insert_then_find() {
        let store = MemoryStore::new();
        TeamRepositoryTrait::insert(&store, team("KC")).unwrap();

        let found = store.find_by_abbreviation("KC").unwrap();
        assert_eq!(found.unwrap().city, "Kansas City");
        assert!(store.find_by_abbreviation("DEN").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_insert_is_rejected() {
        let store = MemoryStore::new();
        TeamRepositoryTrait::insert(&store, team("KC")).unwrap();

        let result = TeamRepositoryTrait::insert(&store, team("KC"));
        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[test]
    fn test_update_of_missing_row_is_rejected() {
        let store = MemoryStore::new();
        let result = TeamRepositoryTrait::update(&store, team("KC"));
        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[test]
    fn test_list_is_sorted_by_key() {
        let store = MemoryStore::new();
        TeamRepositoryTrait::insert(&store, team("KC")).unwrap();
        TeamRepositoryTrait::insert(&store, team("DEN")).unwrap();

        let teams = TeamRepositoryTrait::list(&store).unwrap();
        assert_eq!(teams[0].abbreviation, "DEN");
        assert_eq!(teams[1].abbreviation, "KC");
    }

    #[test]
    fn test_games_filter_by_season_week() {
        let store = MemoryStore::new();
        let mk = |season, week, home: &str| Game {
            key: GameKey {
                season,
                week,
                home_team: home.to_string(),
                away_team: "LV".to_string(),
            },
            kickoff: None,
            home_score: None,
            away_score: None,
            completed: false,
        };
        GameRepositoryTrait::insert(&store, mk(2024, 5, "KC")).unwrap();
        GameRepositoryTrait::insert(&store, mk(2024, 5, "DEN")).unwrap();
        GameRepositoryTrait::insert(&store, mk(2024, 6, "KC")).unwrap();

        let week5 = store.list_by_season_week(2024, 5).unwrap();
        assert_eq!(week5.len(), 2);
        assert!(store.list_by_season_week(2023, 5).unwrap().is_empty());
    }
}
