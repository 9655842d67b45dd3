//! Idempotent upsert into the local store.
//!
//! Every entity reconciles by natural key: an existing row has its mutable
//! fields overwritten in place, an absent row is inserted. Repeating the
//! identical input leaves exactly one row and drifts no field.
//!
//! Ordering is the caller's contract, not the reconciler's: teams before
//! players and games, those before stats. A record whose parent is absent
//! is reported as [`Error::MissingParent`] and skipped by the caller; it is
//! not queued for later.

use std::sync::Arc;

use statline_ingest::models::{GameRecord, PlayerRecord, StatRecord, TeamRecord};

use crate::errors::{Error, Result};
use crate::games::{Game, GameRepositoryTrait};
use crate::players::{Player, PlayerRepositoryTrait};
use crate::stats::{PlayerGameStat, StatRepositoryTrait};
use crate::teams::{Team, TeamRepositoryTrait};

/// Whether an upsert created or refreshed the row.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Writes normalized records through the repository traits.
pub struct Reconciler {
    teams: Arc<dyn TeamRepositoryTrait>,
    players: Arc<dyn PlayerRepositoryTrait>,
    games: Arc<dyn GameRepositoryTrait>,
    stats: Arc<dyn StatRepositoryTrait>,
}

impl Reconciler {
    pub fn new(
        teams: Arc<dyn TeamRepositoryTrait>,
        players: Arc<dyn PlayerRepositoryTrait>,
        games: Arc<dyn GameRepositoryTrait>,
        stats: Arc<dyn StatRepositoryTrait>,
    ) -> Self {
        Self {
            teams,
            players,
            games,
            stats,
        }
    }

    pub fn teams(&self) -> &dyn TeamRepositoryTrait {
        self.teams.as_ref()
    }

    pub fn games(&self) -> &dyn GameRepositoryTrait {
        self.games.as_ref()
    }

    pub fn upsert_team(&self, record: TeamRecord) -> Result<UpsertOutcome> {
        match self.teams.find_by_abbreviation(&record.abbreviation)? {
            Some(mut existing) => {
                existing.merge_record(record);
                self.teams.update(existing)?;
                Ok(UpsertOutcome::Updated)
            }
            None => {
                self.teams.insert(Team::from(record))?;
                Ok(UpsertOutcome::Inserted)
            }
        }
    }

    pub fn upsert_player(&self, record: PlayerRecord) -> Result<UpsertOutcome> {
        self.require_team(&record.team_abbreviation, "player", || {
            format!("{} ({})", record.name, record.team_abbreviation)
        })?;

        match self
            .players
            .find_by_name_and_team(&record.name, &record.team_abbreviation)?
        {
            Some(mut existing) => {
                existing.merge_record(record);
                self.players.update(existing)?;
                Ok(UpsertOutcome::Updated)
            }
            None => {
                self.players.insert(Player::from(record))?;
                Ok(UpsertOutcome::Inserted)
            }
        }
    }

    pub fn upsert_game(&self, record: GameRecord) -> Result<UpsertOutcome> {
        self.require_team(&record.key.home_team, "game", || record.key.to_string())?;
        self.require_team(&record.key.away_team, "game", || record.key.to_string())?;

        match self.games.find_by_key(&record.key)? {
            Some(mut existing) => {
                existing.merge_record(record);
                self.games.update(existing)?;
                Ok(UpsertOutcome::Updated)
            }
            None => {
                self.games.insert(Game::from(record))?;
                Ok(UpsertOutcome::Inserted)
            }
        }
    }

    pub fn upsert_stat(&self, record: StatRecord) -> Result<UpsertOutcome> {
        if self
            .players
            .find_by_name_and_team(&record.player_name, &record.team_abbreviation)?
            .is_none()
        {
            return Err(Error::MissingParent {
                entity: "stat line",
                key: format!("{} in {}", record.player_name, record.game),
                parent: format!(
                    "player '{}' ({})",
                    record.player_name, record.team_abbreviation
                ),
            });
        }
        if self.games.find_by_key(&record.game)?.is_none() {
            return Err(Error::MissingParent {
                entity: "stat line",
                key: format!("{} in {}", record.player_name, record.game),
                parent: format!("game '{}'", record.game),
            });
        }

        match self.stats.find_by_player_and_game(
            &record.player_name,
            &record.team_abbreviation,
            &record.game,
        )? {
            Some(mut existing) => {
                existing.merge_record(record);
                self.stats.update(existing)?;
                Ok(UpsertOutcome::Updated)
            }
            None => {
                self.stats.insert(PlayerGameStat::from(record))?;
                Ok(UpsertOutcome::Inserted)
            }
        }
    }

    fn require_team(
        &self,
        abbreviation: &str,
        entity: &'static str,
        key: impl FnOnce() -> String,
    ) -> Result<()> {
        if self.teams.find_by_abbreviation(abbreviation)?.is_none() {
            return Err(Error::MissingParent {
                entity,
                key: key(),
                parent: format!("team '{}'", abbreviation),
            });
        }
        Ok(())
    }
}
