//! Team domain model.

use serde::{Deserialize, Serialize};
use statline_ingest::models::TeamRecord;

/// One team in the local store.
///
/// The abbreviation is the natural key: it identifies at most one stored
/// row and never changes across reconciliations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Natural key.
    pub abbreviation: String,
    pub name: String,
    pub city: String,
    pub conference: Option<String>,
    pub division: Option<String>,
}

impl Team {
    pub fn natural_key(&self) -> &str {
        &self.abbreviation
    }

    /// Overwrite the mutable fields from a fresh record, leaving the
    /// natural key untouched.
    pub fn merge_record(&mut self, record: TeamRecord) {
        self.name = record.name;
        self.city = record.city;
        self.conference = record.conference;
        self.division = record.division;
    }
}

impl From<TeamRecord> for Team {
    fn from(record: TeamRecord) -> Self {
        Self {
            abbreviation: record.abbreviation,
            name: record.name,
            city: record.city,
            conference: record.conference,
            division: record.division,
        }
    }
}
