//! Player domain model.

use serde::{Deserialize, Serialize};
use statline_ingest::models::PlayerRecord;

/// One player in the local store.
///
/// The natural key is (name, team abbreviation): providers expose no
/// stable player id that survives across sources, so a trade shows up as
/// a new row under the new team rather than a mutation of the old one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Natural key, with `team_abbreviation`.
    pub name: String,
    /// Natural key, with `name`.
    pub team_abbreviation: String,
    pub position: String,
    pub jersey_number: Option<u8>,
}

impl Player {
    pub fn natural_key(&self) -> (&str, &str) {
        (&self.name, &self.team_abbreviation)
    }

    /// Overwrite the mutable fields from a fresh record, leaving the
    /// natural key untouched.
    pub fn merge_record(&mut self, record: PlayerRecord) {
        self.position = record.position;
        self.jersey_number = record.jersey_number;
    }
}

impl From<PlayerRecord> for Player {
    fn from(record: PlayerRecord) -> Self {
        Self {
            name: record.name,
            team_abbreviation: record.team_abbreviation,
            position: record.position,
            jersey_number: record.jersey_number,
        }
    }
}
