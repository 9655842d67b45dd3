//! End-to-end ingestion runs against mocked providers and the in-memory
//! store: teams, rosters, games, and stats reconciled through the full
//! registry -> adapter -> fetch client -> reconciler chain.

use std::sync::Arc;

use statline_core::ingestion::{IngestionService, IngestionServiceTrait, Reconciler};
use statline_core::store::MemoryStore;
use statline_core::{GameRepositoryTrait, PlayerRepositoryTrait, StatRepositoryTrait, TeamRepositoryTrait};
use statline_ingest::models::{IngestSettings, ProviderConfig};
use statline_ingest::registry::ProviderRegistry;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings() -> IngestSettings {
    IngestSettings {
        max_retry_attempts: 1,
        retry_base_delay_ms: 1,
        request_timeout_secs: 5,
        default_user_agent: "statline/test".to_string(),
    }
}

fn service_with(configs: Vec<ProviderConfig>) -> (IngestionService, Arc<MemoryStore>) {
    let registry = Arc::new(ProviderRegistry::new(configs, settings()).unwrap());
    let store = Arc::new(MemoryStore::new());
    let reconciler = Reconciler::new(store.clone(), store.clone(), store.clone(), store.clone());
    (IngestionService::new(registry, reconciler), store)
}

fn statshub_config(server: &MockServer) -> ProviderConfig {
    ProviderConfig {
        min_request_interval_ms: 0,
        ..ProviderConfig::new("statshub", server.uri())
    }
}

fn fieldpass_config(server: &MockServer) -> ProviderConfig {
    ProviderConfig {
        min_request_interval_ms: 0,
        ..ProviderConfig::new("fieldpass", server.uri())
    }
}

async fn mount_statshub_teams(server: &MockServer) {
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
        .mount(server)
        .await;
}

/// Scenario A: a provider with no auth and a canned two-team payload,
/// ingested twice into an empty store, processes two records both times
/// and never duplicates a row.
#[tokio::test]
async fn teams_ingest_is_idempotent_across_runs() {
    let server = MockServer::start().await;
    mount_statshub_teams(&server).await;
    let (service, store) = service_with(vec![statshub_config(&server)]);

    let first = service.ingest_teams("statshub", None).await;
    assert!(first.succeeded);
    assert_eq!(first.records_processed, 2);
    assert_eq!(first.records_failed, 0);
    assert_eq!(TeamRepositoryTrait::list(store.as_ref()).unwrap().len(), 2);

    let second = service.ingest_teams("statshub", None).await;
    assert!(second.succeeded);
    assert_eq!(second.records_processed, 2);
    // Zero net new rows.
    assert_eq!(TeamRepositoryTrait::list(store.as_ref()).unwrap().len(), 2);
}

/// Scenario B: requesting stats before any games were reconciled reports
/// zero records and a diagnostic naming the prerequisite - no panic, no
/// network traffic.
#[tokio::test]
async fn stats_before_games_report_the_prerequisite() {
    let server = MockServer::start().await;
    let (service, store) = service_with(vec![statshub_config(&server)]);

    let outcome = service.ingest_stats("statshub", 2024, 5).await;

    assert!(!outcome.succeeded);
    assert_eq!(outcome.records_processed, 0);
    assert!(outcome.message.contains("run the games ingest first"));
    assert!(StatRepositoryTrait::list(store.as_ref()).unwrap().is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

/// Full pipeline against the two-step provider: the schedule fetch records
/// native event ids, and the stat fetch resolves through them.
#[tokio::test]
async fn fieldpass_pipeline_reconciles_stats_via_correlation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/teams.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "teams": [
                {"abbr": "KC", "market": "Kansas City", "nickname": "Chiefs",
                 "conference": "AFC", "division": "West"},
                {"abbr": "DEN", "market": "Denver", "nickname": "Broncos",
                 "conference": "AFC", "division": "West"}
            ]
        })))
        .mount(&server)
        .await;
    for team in ["KC", "DEN"] {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/rosters/{team}.json")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "roster": [
                    {"fullName": format!("{team} Quarterback"), "position": "QB", "jersey": 10}
                ]
            })))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/api/v1/seasons/2024/schedule.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "events": [
                {"id": "evt_8fa3", "week": 5, "homeAbbr": "KC", "awayAbbr": "DEN",
                 "startsAt": "2024-10-06T17:00:00Z",
                 "homeScore": 28, "awayScore": 14, "status": "final"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/events/evt_8fa3/boxscore.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "statLines": [
                {"player": "KC Quarterback", "teamAbbr": "KC",
                 "passingYards": 320, "touchdowns": 3},
                {"player": "DEN Quarterback", "teamAbbr": "DEN",
                 "passingYards": 188, "interceptions": 2}
            ]
        })))
        .mount(&server)
        .await;

    let (service, store) = service_with(vec![fieldpass_config(&server)]);

    let teams = service.ingest_teams("fieldpass", None).await;
    assert_eq!(teams.records_processed, 2);

    let rosters = service.ingest_rosters("fieldpass", None).await;
    assert!(rosters.succeeded);
    assert_eq!(rosters.records_processed, 2);
    assert_eq!(PlayerRepositoryTrait::list(store.as_ref()).unwrap().len(), 2);

    let games = service.ingest_games("fieldpass", 2024, Some(5)).await;
    assert!(games.succeeded);
    assert_eq!(games.records_processed, 1);

    let stats = service.ingest_stats("fieldpass", 2024, 5).await;
    assert!(stats.succeeded);
    assert_eq!(stats.records_processed, 2);
    assert_eq!(stats.records_failed, 0);

    let lines = StatRepositoryTrait::list(store.as_ref()).unwrap();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().any(|l| l.passing_yards == 320));

    // Re-running the stat ingest overwrites in place.
    let again = service.ingest_stats("fieldpass", 2024, 5).await;
    assert_eq!(again.records_processed, 2);
    assert_eq!(StatRepositoryTrait::list(store.as_ref()).unwrap().len(), 2);
}

/// Games reconciled by one provider don't correlate another provider's
/// stat fetches: the dependent operation skips each game with a
/// diagnostic instead of aborting.
#[tokio::test]
async fn correlation_miss_skips_without_aborting() {
    let statshub = MockServer::start().await;
    mount_statshub_teams(&statshub).await;
    Mock::given(method("GET"))
        .and(path("/v2/schedule"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "games": [
                {"season": 2024, "week": 5, "home": "KC", "away": "DEN",
                 "completed": true}
            ]
        })))
        .mount(&statshub)
        .await;

    let fieldpass = MockServer::start().await;
    let (service, _store) = service_with(vec![
        statshub_config(&statshub),
        fieldpass_config(&fieldpass),
    ]);

    service.ingest_teams("statshub", None).await;
    let games = service.ingest_games("statshub", 2024, Some(5)).await;
    assert_eq!(games.records_processed, 1);

    // Fieldpass never saw a schedule this run, so it has no native ids.
    let stats = service.ingest_stats("fieldpass", 2024, 5).await;

    assert!(!stats.succeeded);
    assert_eq!(stats.records_processed, 0);
    assert_eq!(stats.records_failed, 1);
    assert!(stats.errors[0].contains("run the schedule fetch first"));
    // The miss was resolved locally: no request reached the provider.
    assert!(fieldpass.received_requests().await.unwrap().is_empty());
}

/// Unknown provider names die at registration, before any network call.
#[test]
fn unknown_provider_fails_registration() {
    let configs = vec![ProviderConfig::new("scorewire", "https://scorewire.example")];
    let result = ProviderRegistry::new(configs, settings());
    assert!(result.is_err());
}

/// A provider that keeps answering 500 exhausts its retry budget and the
/// run reports a transport-tier failure with the attempt count respected.
#[tokio::test]
async fn persistent_server_errors_exhaust_retries_and_fail_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/teams"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let registry = Arc::new(
        ProviderRegistry::new(
            vec![statshub_config(&server)],
            IngestSettings {
                max_retry_attempts: 3,
                ..settings()
            },
        )
        .unwrap(),
    );
    let store = Arc::new(MemoryStore::new());
    let reconciler = Reconciler::new(store.clone(), store.clone(), store.clone(), store.clone());
    let service = IngestionService::new(registry, reconciler);

    let outcome = service.ingest_teams("statshub", None).await;

    assert!(!outcome.succeeded);
    assert!(outcome.errors[0].contains("500"));
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
    assert!(GameRepositoryTrait::list(store.as_ref()).unwrap().is_empty());
}
