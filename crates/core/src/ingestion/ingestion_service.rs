//! Ingestion service: the four fetch-and-reconcile operations.
//!
//! One run is a sequential chain of suspendable steps - fetch, decode
//! (inside the adapter), reconcile - with no internal fan-out concurrency;
//! the caller decides whether distinct providers or entities run in
//! parallel. Every failure below the configuration tier is recovered here
//! into a diagnostic and a count; nothing escapes as an error.

use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};

use statline_ingest::provider::SportsDataProvider;
use statline_ingest::registry::ProviderRegistry;

use super::ingestion_model::RunOutcome;
use super::ingestion_traits::IngestionServiceTrait;
use super::reconciler::Reconciler;

/// Drives provider adapters and writes their records through the
/// reconciler, aggregating each operation into one [`RunOutcome`].
pub struct IngestionService {
    registry: Arc<ProviderRegistry>,
    reconciler: Reconciler,
}

impl IngestionService {
    pub fn new(registry: Arc<ProviderRegistry>, reconciler: Reconciler) -> Self {
        Self {
            registry,
            reconciler,
        }
    }

    fn bind(&self, provider: &str) -> Result<Arc<dyn SportsDataProvider>, RunOutcome> {
        self.registry.get(provider).map_err(|e| {
            RunOutcome::failure(
                format!("Provider '{}' is not registered", provider),
                e.to_string(),
            )
        })
    }

    async fn ingest_team_roster(
        &self,
        provider: &dyn SportsDataProvider,
        team: &str,
    ) -> RunOutcome {
        let records = match provider.fetch_roster(team).await {
            Ok(records) => records,
            Err(e) => {
                return RunOutcome::failure(
                    format!("Roster fetch for '{}' from '{}' failed", team, provider.id()),
                    e.to_string(),
                );
            }
        };

        let mut outcome = RunOutcome::success(format!("Reconciled roster for '{}'", team));
        for record in records {
            let key = format!("{} ({})", record.name, record.team_abbreviation);
            match self.reconciler.upsert_player(record) {
                Ok(_) => outcome.record_processed(),
                Err(e) => {
                    warn!("Skipping player {}: {}", key, e);
                    outcome.record_skip(format!("player {}: {}", key, e));
                }
            }
        }
        outcome
    }
}

#[async_trait]
impl IngestionServiceTrait for IngestionService {
    async fn ingest_teams(&self, provider: &str, team: Option<&str>) -> RunOutcome {
        let provider = match self.bind(provider) {
            Ok(p) => p,
            Err(outcome) => return outcome,
        };
        info!("Ingesting teams from '{}'", provider.id());

        let mut records = match provider.fetch_teams().await {
            Ok(records) => records,
            Err(e) => {
                return RunOutcome::failure(
                    format!("Team fetch from '{}' failed", provider.id()),
                    e.to_string(),
                );
            }
        };

        if let Some(abbreviation) = team {
            records.retain(|r| r.abbreviation.eq_ignore_ascii_case(abbreviation));
            if records.is_empty() {
                let mut outcome = RunOutcome::success(format!(
                    "Reconciled 0 teams from {}",
                    provider.id()
                ));
                outcome.push_diagnostic(format!(
                    "team '{}' not present in '{}' payload",
                    abbreviation,
                    provider.id()
                ));
                return outcome;
            }
        }

        let mut outcome = RunOutcome::success("");
        for record in records {
            let key = record.abbreviation.clone();
            match self.reconciler.upsert_team(record) {
                Ok(_) => outcome.record_processed(),
                Err(e) => {
                    warn!("Skipping team '{}': {}", key, e);
                    outcome.record_skip(format!("team '{}': {}", key, e));
                }
            }
        }
        outcome.message = format!(
            "Reconciled {} teams from {}",
            outcome.records_processed,
            provider.id()
        );
        outcome
    }

    async fn ingest_rosters(&self, provider: &str, team: Option<&str>) -> RunOutcome {
        let provider = match self.bind(provider) {
            Ok(p) => p,
            Err(outcome) => return outcome,
        };
        info!("Ingesting rosters from '{}'", provider.id());

        let team_abbreviations: Vec<String> = match team {
            Some(abbreviation) => vec![abbreviation.to_string()],
            None => {
                let teams = match self.reconciler.teams().list() {
                    Ok(teams) => teams,
                    Err(e) => {
                        return RunOutcome::failure(
                            "Listing reconciled teams failed",
                            e.to_string(),
                        );
                    }
                };
                if teams.is_empty() {
                    return RunOutcome::failure(
                        "No teams reconciled; run the teams ingest first",
                        "roster ingest requires reconciled teams as parents",
                    );
                }
                teams.into_iter().map(|t| t.abbreviation).collect()
            }
        };

        let roster_count = team_abbreviations.len();
        let mut outcome = RunOutcome::success("");
        for abbreviation in &team_abbreviations {
            let child = self
                .ingest_team_roster(provider.as_ref(), abbreviation)
                .await;
            outcome.absorb(child);
        }
        outcome.message = format!(
            "Reconciled {} players across {} rosters from {}",
            outcome.records_processed,
            roster_count,
            provider.id()
        );
        outcome
    }

    async fn ingest_games(&self, provider: &str, season: u16, week: Option<u8>) -> RunOutcome {
        let provider = match self.bind(provider) {
            Ok(p) => p,
            Err(outcome) => return outcome,
        };
        info!(
            "Ingesting games for season {} from '{}'",
            season,
            provider.id()
        );

        let records = match provider.fetch_games(season, week).await {
            Ok(records) => records,
            Err(e) => {
                return RunOutcome::failure(
                    format!(
                        "Game fetch for season {} from '{}' failed",
                        season,
                        provider.id()
                    ),
                    e.to_string(),
                );
            }
        };

        let mut outcome = RunOutcome::success("");
        for record in records {
            let key = record.key.to_string();
            match self.reconciler.upsert_game(record) {
                Ok(_) => outcome.record_processed(),
                Err(e) => {
                    warn!("Skipping game '{}': {}", key, e);
                    outcome.record_skip(format!("game '{}': {}", key, e));
                }
            }
        }
        outcome.message = format!(
            "Reconciled {} games from {}",
            outcome.records_processed,
            provider.id()
        );
        outcome
    }

    async fn ingest_stats(&self, provider: &str, season: u16, week: u8) -> RunOutcome {
        let provider = match self.bind(provider) {
            Ok(p) => p,
            Err(outcome) => return outcome,
        };
        info!(
            "Ingesting stats for season {} week {} from '{}'",
            season,
            week,
            provider.id()
        );

        let games = match self.reconciler.games().list_by_season_week(season, week) {
            Ok(games) => games,
            Err(e) => {
                return RunOutcome::failure("Listing reconciled games failed", e.to_string());
            }
        };
        if games.is_empty() {
            return RunOutcome::failure(
                format!(
                    "No games reconciled for season {} week {}; run the games ingest first",
                    season, week
                ),
                format!(
                    "stat ingest for season {} week {} found no reconciled games",
                    season, week
                ),
            );
        }

        let game_count = games.len();
        let mut outcome = RunOutcome::success("");
        for game in &games {
            match provider.fetch_game_stats(&game.key).await {
                Ok(records) => {
                    for record in records {
                        let key = format!("{} in {}", record.player_name, record.game);
                        match self.reconciler.upsert_stat(record) {
                            Ok(_) => outcome.record_processed(),
                            Err(e) => {
                                warn!("Skipping stat line {}: {}", key, e);
                                outcome.record_skip(format!("stat line {}: {}", key, e));
                            }
                        }
                    }
                }
                Err(e) => {
                    // One game's fetch failing is a skip, not an abort.
                    warn!("Skipping stats for '{}': {}", game.key, e);
                    outcome.record_skip(format!("game '{}': {}", game.key, e));
                }
            }
        }

        // Every game skipped and nothing written: the step totally failed.
        if outcome.records_processed == 0 && outcome.records_failed > 0 {
            outcome.succeeded = false;
        }
        outcome.message = format!(
            "Reconciled {} stat lines across {} games from {}",
            outcome.records_processed,
            game_count,
            provider.id()
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::GameRepositoryTrait;
    use crate::store::MemoryStore;
    use crate::teams::TeamRepositoryTrait;
    use statline_ingest::models::{IngestSettings, ProviderConfig};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer) -> (IngestionService, Arc<MemoryStore>) {
        let config = ProviderConfig {
            min_request_interval_ms: 0,
            ..ProviderConfig::new("statshub", server.uri())
        };
        let settings = IngestSettings {
            max_retry_attempts: 1,
            retry_base_delay_ms: 1,
            request_timeout_secs: 5,
            default_user_agent: "statline/test".to_string(),
        };
        let registry = Arc::new(ProviderRegistry::new(vec![config], settings).unwrap());

        let store = Arc::new(MemoryStore::new());
        let reconciler = Reconciler::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
        );
        (IngestionService::new(registry, reconciler), store)
    }

    fn teams_body() -> serde_json::Value {
        serde_json::json!({
            "teams": [
                {"abbr": "KC", "name": "Chiefs", "city": "Kansas City",
                 "conference": "AFC", "division": "West"},
                {"abbr": "DEN", "name": "Broncos", "city": "Denver",
                 "conference": "AFC", "division": "West"}
            ]
        })
    }

    #[tokio::test]
    async fn test_unregistered_provider_yields_failure_outcome() {
        let server = MockServer::start().await;
        let (service, _) = service_for(&server);

        let outcome = service.ingest_teams("fieldpass", None).await;

        assert!(!outcome.succeeded);
        assert!(outcome.message.contains("not registered"));
    }

    #[tokio::test]
    async fn test_team_filter_narrows_to_one_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/teams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(teams_body()))
            .mount(&server)
            .await;
        let (service, store) = service_for(&server);

        let outcome = service.ingest_teams("statshub", Some("den")).await;

        assert!(outcome.succeeded);
        assert_eq!(outcome.records_processed, 1);
        assert!(store.find_by_abbreviation("DEN").unwrap().is_some());
        assert!(store.find_by_abbreviation("KC").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_team_filter_miss_reports_diagnostic() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/teams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(teams_body()))
            .mount(&server)
            .await;
        let (service, _) = service_for(&server);

        let outcome = service.ingest_teams("statshub", Some("XX")).await;

        assert!(outcome.succeeded);
        assert_eq!(outcome.records_processed, 0);
        assert!(outcome.errors[0].contains("not present"));
    }

    #[tokio::test]
    async fn test_rosters_without_teams_name_the_prerequisite() {
        let server = MockServer::start().await;
        let (service, _) = service_for(&server);

        let outcome = service.ingest_rosters("statshub", None).await;

        assert!(!outcome.succeeded);
        assert_eq!(outcome.records_processed, 0);
        assert!(outcome.message.contains("run the teams ingest first"));
        // The prerequisite check never touched the provider.
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_games_with_unknown_team_skip_per_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/teams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(teams_body()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/schedule"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "games": [
                    {"season": 2024, "week": 5, "home": "KC", "away": "DEN",
                     "completed": true},
                    {"season": 2024, "week": 5, "home": "LV", "away": "KC",
                     "completed": false}
                ]
            })))
            .mount(&server)
            .await;
        let (service, store) = service_for(&server);

        service.ingest_teams("statshub", None).await;
        let outcome = service.ingest_games("statshub", 2024, Some(5)).await;

        // LV was never reconciled: that one game skips, the batch continues.
        assert!(outcome.succeeded);
        assert_eq!(outcome.records_processed, 1);
        assert_eq!(outcome.records_failed, 1);
        assert!(outcome.errors[0].contains("missing team 'LV'"));
        assert_eq!(store.list_by_season_week(2024, 5).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_a_total_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/teams"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let (service, _) = service_for(&server);

        let outcome = service.ingest_teams("statshub", None).await;

        assert!(!outcome.succeeded);
        assert_eq!(outcome.records_processed, 0);
        assert!(outcome.message.contains("Team fetch"));
        assert_eq!(outcome.errors.len(), 1);
    }
}
