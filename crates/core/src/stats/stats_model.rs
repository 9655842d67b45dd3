//! Player game stat domain model.

use serde::{Deserialize, Serialize};
use statline_ingest::models::{GameKey, StatRecord};

/// One player's stat line for one game.
///
/// The natural key is (player natural key, game key). Repeated fetches of
/// the same box score overwrite the counters in place - latest wins, no
/// history is kept.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerGameStat {
    /// Natural key, with `team_abbreviation` and `game`.
    pub player_name: String,
    /// Natural key, with `player_name` and `game`.
    pub team_abbreviation: String,
    /// Natural key, with the player fields.
    pub game: GameKey,
    pub passing_yards: i32,
    pub rushing_yards: i32,
    pub receiving_yards: i32,
    pub receptions: u16,
    pub touchdowns: u16,
    pub interceptions: u16,
}

impl PlayerGameStat {
    pub fn natural_key(&self) -> (&str, &str, &GameKey) {
        (&self.player_name, &self.team_abbreviation, &self.game)
    }

    /// Overwrite the stat counters from a fresh record, leaving the
    /// natural key untouched.
    pub fn merge_record(&mut self, record: StatRecord) {
        self.passing_yards = record.passing_yards;
        self.rushing_yards = record.rushing_yards;
        self.receiving_yards = record.receiving_yards;
        self.receptions = record.receptions;
        self.touchdowns = record.touchdowns;
        self.interceptions = record.interceptions;
    }
}

impl From<StatRecord> for PlayerGameStat {
    fn from(record: StatRecord) -> Self {
        Self {
            player_name: record.player_name,
            team_abbreviation: record.team_abbreviation,
            game: record.game,
            passing_yards: record.passing_yards,
            rushing_yards: record.rushing_yards,
            receiving_yards: record.receiving_yards,
            receptions: record.receptions,
            touchdowns: record.touchdowns,
            interceptions: record.interceptions,
        }
    }
}
