//! Statshub provider implementation.
//!
//! Flat JSON API where every resource is addressable by domain keys:
//! - Teams via /v2/teams
//! - Rosters via /v2/teams/{abbr}/roster
//! - Schedules via /v2/schedule with season/week query parameters
//! - Box scores via /v2/boxscore with season/week/home query parameters
//!
//! Hosted deployments authenticate with an API key header, so the typical
//! configuration uses `header-key` auth; the adapter itself works with any
//! configured mode.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::client::FetchClient;
use crate::errors::{FetchOutcome, RegistryError};
use crate::models::{
    GameKey, GameRecord, IngestSettings, PlayerRecord, ProviderConfig, StatRecord, TeamRecord,
};
use crate::provider::SportsDataProvider;

const PROVIDER_ID: &str = "STATSHUB";

// ============================================================================
// API Response Structures
// ============================================================================

/// Response from /v2/teams
#[derive(Debug, Deserialize)]
struct TeamsResponse {
    teams: Vec<TeamItem>,
}

#[derive(Debug, Deserialize)]
struct TeamItem {
    abbr: String,
    name: String,
    city: String,
    conference: Option<String>,
    division: Option<String>,
}

/// Response from /v2/teams/{abbr}/roster
#[derive(Debug, Deserialize)]
struct RosterResponse {
    players: Vec<PlayerItem>,
}

#[derive(Debug, Deserialize)]
struct PlayerItem {
    name: String,
    position: String,
    number: Option<u8>,
}

/// Response from /v2/schedule
#[derive(Debug, Deserialize)]
struct ScheduleResponse {
    games: Vec<GameItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameItem {
    season: u16,
    week: u8,
    home: String,
    away: String,
    kickoff: Option<DateTime<Utc>>,
    home_points: Option<u16>,
    away_points: Option<u16>,
    #[serde(default)]
    completed: bool,
}

/// Response from /v2/boxscore
#[derive(Debug, Deserialize)]
struct BoxscoreResponse {
    lines: Vec<StatLineItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatLineItem {
    player: String,
    team: String,
    #[serde(default)]
    pass_yds: i32,
    #[serde(default)]
    rush_yds: i32,
    #[serde(default)]
    rec_yds: i32,
    #[serde(default)]
    receptions: u16,
    #[serde(default)]
    touchdowns: u16,
    #[serde(default)]
    interceptions: u16,
}

// ============================================================================
// StatshubProvider
// ============================================================================

/// Statshub provider adapter.
pub struct StatshubProvider {
    client: FetchClient,
}

impl StatshubProvider {
    pub fn new(config: &ProviderConfig, settings: &IngestSettings) -> Result<Self, RegistryError> {
        Ok(Self {
            client: FetchClient::new(PROVIDER_ID, config, settings, None)?,
        })
    }
}

#[async_trait]
impl SportsDataProvider for StatshubProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_teams(&self) -> FetchOutcome<Vec<TeamRecord>> {
        let response: TeamsResponse = self.client.get_json("/v2/teams", &[]).await?;

        Ok(response
            .teams
            .into_iter()
            .map(|t| TeamRecord {
                abbreviation: t.abbr,
                name: t.name,
                city: t.city,
                conference: t.conference,
                division: t.division,
            })
            .collect())
    }

    async fn fetch_roster(&self, team: &str) -> FetchOutcome<Vec<PlayerRecord>> {
        let path = format!("/v2/teams/{}/roster", team);
        let response: RosterResponse = self.client.get_json(&path, &[]).await?;

        Ok(response
            .players
            .into_iter()
            .map(|p| PlayerRecord {
                name: p.name,
                team_abbreviation: team.to_string(),
                position: p.position,
                jersey_number: p.number,
            })
            .collect())
    }

    async fn fetch_games(&self, season: u16, week: Option<u8>) -> FetchOutcome<Vec<GameRecord>> {
        let mut query = vec![("season", season.to_string())];
        if let Some(week) = week {
            query.push(("week", week.to_string()));
        }
        let response: ScheduleResponse = self.client.get_json("/v2/schedule", &query).await?;

        Ok(response
            .games
            .into_iter()
            .map(|g| GameRecord {
                key: GameKey {
                    season: g.season,
                    week: g.week,
                    home_team: g.home,
                    away_team: g.away,
                },
                kickoff: g.kickoff,
                home_score: g.home_points,
                away_score: g.away_points,
                completed: g.completed,
            })
            .collect())
    }

    async fn fetch_game_stats(&self, game: &GameKey) -> FetchOutcome<Vec<StatRecord>> {
        let query = vec![
            ("season", game.season.to_string()),
            ("week", game.week.to_string()),
            ("home", game.home_team.clone()),
        ];
        let response: BoxscoreResponse = self.client.get_json("/v2/boxscore", &query).await?;

        Ok(response
            .lines
            .into_iter()
            .map(|line| StatRecord {
                player_name: line.player,
                team_abbreviation: line.team,
                game: game.clone(),
                passing_yards: line.pass_yds,
                rushing_yards: line.rush_yds,
                receiving_yards: line.rec_yds,
                receptions: line.receptions,
                touchdowns: line.touchdowns,
                interceptions: line.interceptions,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthMode;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings() -> IngestSettings {
        IngestSettings {
            max_retry_attempts: 1,
            retry_base_delay_ms: 1,
            request_timeout_secs: 5,
            default_user_agent: "statline/test".to_string(),
        }
    }

    fn provider_for(server: &MockServer) -> StatshubProvider {
        let config = ProviderConfig {
            min_request_interval_ms: 0,
            ..ProviderConfig::new("statshub", server.uri())
        };
        StatshubProvider::new(&config, &settings()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_teams_decodes_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/teams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "teams": [
                    {"abbr": "KC", "name": "Chiefs", "city": "Kansas City",
                     "conference": "AFC", "division": "West"},
                    {"abbr": "DEN", "name": "Broncos", "city": "Denver",
                     "conference": "AFC", "division": "West"}
                ]
            })))
            .mount(&server)
            .await;

        let teams = provider_for(&server).fetch_teams().await.unwrap();

        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].abbreviation, "KC");
        assert_eq!(teams[1].city, "Denver");
    }

    #[tokio::test]
    async fn test_fetch_roster_carries_team_abbreviation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/teams/KC/roster"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "players": [
                    {"name": "P. Mahomes", "position": "QB", "number": 15}
                ]
            })))
            .mount(&server)
            .await;

        let players = provider_for(&server).fetch_roster("KC").await.unwrap();

        assert_eq!(players.len(), 1);
        assert_eq!(players[0].team_abbreviation, "KC");
        assert_eq!(players[0].jersey_number, Some(15));
    }

    #[tokio::test]
    async fn test_fetch_games_passes_week_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/schedule"))
            .and(query_param("season", "2024"))
            .and(query_param("week", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "games": [
                    {"season": 2024, "week": 5, "home": "KC", "away": "DEN",
                     "kickoff": "2024-10-06T17:00:00Z",
                     "homePoints": 28, "awayPoints": 14, "completed": true}
                ]
            })))
            .mount(&server)
            .await;

        let games = provider_for(&server).fetch_games(2024, Some(5)).await.unwrap();

        assert_eq!(games.len(), 1);
        assert_eq!(games[0].key.home_team, "KC");
        assert_eq!(games[0].home_score, Some(28));
        assert!(games[0].completed);
    }

    #[tokio::test]
    async fn test_fetch_game_stats_addresses_by_domain_keys() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/boxscore"))
            .and(query_param("season", "2024"))
            .and(query_param("week", "5"))
            .and(query_param("home", "KC"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "lines": [
                    {"player": "P. Mahomes", "team": "KC",
                     "passYds": 320, "touchdowns": 3}
                ]
            })))
            .mount(&server)
            .await;

        let game = GameKey {
            season: 2024,
            week: 5,
            home_team: "KC".to_string(),
            away_team: "DEN".to_string(),
        };
        let stats = provider_for(&server).fetch_game_stats(&game).await.unwrap();

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].passing_yards, 320);
        // Omitted counters default to zero.
        assert_eq!(stats[0].rushing_yards, 0);
        assert_eq!(stats[0].game, game);
    }

    #[tokio::test]
    async fn test_header_key_auth_reaches_the_wire() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/teams"))
            .and(header("x-statshub-key", "secret-123"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"teams": []})),
            )
            .mount(&server)
            .await;

        let config = ProviderConfig {
            auth_mode: AuthMode::HeaderKey,
            credential: Some("secret-123".to_string()),
            header_name: Some("X-Statshub-Key".to_string()),
            min_request_interval_ms: 0,
            ..ProviderConfig::new("statshub", server.uri())
        };
        let provider = StatshubProvider::new(&config, &settings()).unwrap();

        let teams = provider.fetch_teams().await.unwrap();
        assert!(teams.is_empty());
    }
}
