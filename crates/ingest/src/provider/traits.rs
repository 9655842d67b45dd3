//! Provider capability trait definition.

use async_trait::async_trait;

use crate::errors::FetchOutcome;
use crate::models::{GameKey, GameRecord, PlayerRecord, StatRecord, TeamRecord};

/// The four capabilities every sports data provider exposes.
///
/// Implement this trait to add support for a new provider family. Every
/// adapter exposes the identical operation surface; families differ only in
/// which endpoints they call and how payloads decode into records. The
/// registry builds one adapter per configured provider, sharing a single
/// authenticated, rate-limited, resilient [`FetchClient`](crate::client::FetchClient).
///
/// Methods return [`FetchOutcome`] - a classified value, never a panic.
#[async_trait]
pub trait SportsDataProvider: Send + Sync {
    /// Unique identifier for this provider family.
    ///
    /// A constant string like "STATSHUB", used for logging and diagnostics.
    fn id(&self) -> &'static str;

    /// Fetch every team the provider knows about.
    async fn fetch_teams(&self) -> FetchOutcome<Vec<TeamRecord>>;

    /// Fetch the current roster of one team, by abbreviation.
    async fn fetch_roster(&self, team: &str) -> FetchOutcome<Vec<PlayerRecord>>;

    /// Fetch the schedule for a season, optionally narrowed to one week.
    ///
    /// Families whose box scores need an opaque native id record it in
    /// their correlation cache as a side effect of this call.
    async fn fetch_games(&self, season: u16, week: Option<u8>) -> FetchOutcome<Vec<GameRecord>>;

    /// Fetch every player stat line of one game, addressed by natural key.
    ///
    /// Families that need a native id resolve it through their correlation
    /// cache and report [`FetchError::MissingCorrelation`](crate::errors::FetchError)
    /// when the schedule was never fetched this run.
    async fn fetch_game_stats(&self, game: &GameKey) -> FetchOutcome<Vec<StatRecord>>;
}
