//! Game domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use statline_ingest::models::{GameKey, GameRecord};

/// One game in the local store, keyed by (season, week, home, away).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Natural key.
    #[serde(flatten)]
    pub key: GameKey,
    pub kickoff: Option<DateTime<Utc>>,
    pub home_score: Option<u16>,
    pub away_score: Option<u16>,
    pub completed: bool,
}

impl Game {
    pub fn natural_key(&self) -> &GameKey {
        &self.key
    }

    /// Overwrite the mutable fields from a fresh record, leaving the
    /// natural key untouched.
    pub fn merge_record(&mut self, record: GameRecord) {
        self.kickoff = record.kickoff;
        self.home_score = record.home_score;
        self.away_score = record.away_score;
        self.completed = record.completed;
    }
}

impl From<GameRecord> for Game {
    fn from(record: GameRecord) -> Self {
        Self {
            key: record.key,
            kickoff: record.kickoff,
            home_score: record.home_score,
            away_score: record.away_score,
            completed: record.completed,
        }
    }
}
