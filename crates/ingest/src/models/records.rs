//! Normalized records produced by provider adapters.
//!
//! These are the decode output every adapter maps its payloads into,
//! and the input the reconciliation layer merges into the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Natural key of one game: no two stored games share it.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameKey {
    pub season: u16,
    pub week: u8,
    /// Home team abbreviation.
    pub home_team: String,
    /// Away team abbreviation.
    pub away_team: String,
}

impl std::fmt::Display for GameKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} week {} {}@{}",
            self.season, self.week, self.away_team, self.home_team
        )
    }
}

/// One team as a provider reports it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    /// Natural key.
    pub abbreviation: String,
    pub name: String,
    pub city: String,
    pub conference: Option<String>,
    pub division: Option<String>,
}

/// One roster entry as a provider reports it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub name: String,
    /// Abbreviation of the team this player belongs to.
    pub team_abbreviation: String,
    pub position: String,
    pub jersey_number: Option<u8>,
}

/// One scheduled or completed game as a provider reports it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    #[serde(flatten)]
    pub key: GameKey,
    pub kickoff: Option<DateTime<Utc>>,
    pub home_score: Option<u16>,
    pub away_score: Option<u16>,
    pub completed: bool,
}

/// One player's stat line for one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatRecord {
    pub player_name: String,
    /// Abbreviation of the team the player suited up for.
    pub team_abbreviation: String,
    pub game: GameKey,
    pub passing_yards: i32,
    pub rushing_yards: i32,
    pub receiving_yards: i32,
    pub receptions: u16,
    pub touchdowns: u16,
    pub interceptions: u16,
}
