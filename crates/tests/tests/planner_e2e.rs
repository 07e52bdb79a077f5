use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;
use yatri_agents::{PlannerAgent, FALLBACK_NARRATIVE};
use yatri_core::{ConversationLog, PlanningQuery, DEFAULT_COMPOSITE_QUERY};
use yatri_observability::EngineMetrics;
use yatri_providers::config::{DEFAULT_SYNTH_API_BASE, DEFAULT_SYNTH_MODEL};
use yatri_providers::ProviderConfig;
use yatri_retrieval::Corpus;

fn agent_with(config: &ProviderConfig) -> (PlannerAgent, Arc<EngineMetrics>) {
    let metrics = EngineMetrics::shared();
    let agent = PlannerAgent::new(Arc::new(Corpus::builtin()), config, metrics.clone())
        .expect("agent should build");
    (agent, metrics)
}

#[tokio::test]
async fn offline_plan_is_complete_and_degraded() {
    let (agent, metrics) = agent_with(&ProviderConfig::offline());
    let mut log = ConversationLog::default();

    let response = agent.plan(None, &mut log).await.expect("offline plan");

    assert_eq!(response.narrative, FALLBACK_NARRATIVE);
    assert_eq!(response.transport.len(), 6);
    assert_eq!(response.hotels.len(), 5);
    assert!(response.hotels.iter().all(|bundle| !bundle.hotels.is_empty()));
    assert_eq!(response.nearby_transit.len(), 5);
    assert!(response.live_status.is_none());
    assert!(response.budget.is_none());
    assert!(!response.sources.is_empty());
    assert_eq!(log.len(), 1);

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.requests_total, 1);
    assert_eq!(snapshot.synthesis_calls_total, 0);
    assert_eq!(snapshot.degraded_total, 1);
}

#[tokio::test]
async fn empty_query_composes_the_default() {
    let (agent, _) = agent_with(&ProviderConfig::offline());
    let mut log = ConversationLog::default();

    agent
        .plan(Some(PlanningQuery::default()), &mut log)
        .await
        .expect("plan with empty query");

    assert_eq!(log.turns[0].composite_query, DEFAULT_COMPOSITE_QUERY);
}

#[tokio::test]
async fn inverted_budget_band_fails_fast() {
    let (agent, _) = agent_with(&ProviderConfig::offline());
    let mut log = ConversationLog::default();

    let query = PlanningQuery {
        budget_min: Some(9000),
        budget_max: Some(2000),
        ..PlanningQuery::default()
    };

    assert!(agent.plan(Some(query), &mut log).await.is_err());
    assert!(log.is_empty());
}

#[tokio::test]
async fn failed_synthesis_degrades_but_counts_the_attempt() {
    let synth = MockServer::start();
    let broken = synth.mock(|when, then| {
        when.method(POST).path("/generate");
        then.status(500);
    });

    let mut config = ProviderConfig::offline();
    config.synth_proxy_url = Some(synth.url("/generate"));

    let (agent, metrics) = agent_with(&config);
    let mut log = ConversationLog::default();
    let response = agent.plan(None, &mut log).await.expect("degraded plan");

    broken.assert();
    assert_eq!(response.narrative, FALLBACK_NARRATIVE);
    assert!(response.budget.is_none());
    assert_eq!(log.len(), 1);

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.synthesis_calls_total, 1);
    assert_eq!(snapshot.degraded_total, 1);
}

#[tokio::test]
async fn full_provider_stack_feeds_one_plan() {
    let rail = MockServer::start();
    let lodging = MockServer::start();
    let synth = MockServer::start();

    let rail_pair = rail.mock(|when, then| {
        when.method(GET)
            .path("/betweenStations")
            .query_param("from", "NDLS")
            .query_param("to", "HWH");
        then.status(200).json_body(json!({
            "success": true,
            "data": [{
                "train_base": { "number": "12302", "name": "New Delhi Rajdhani" },
                "from_stn_name": "New Delhi",
                "to_stn_name": "Howrah Jn",
                "from_time": "16:50",
                "to_time": "09:55"
            }]
        }));
    });
    let rail_status = rail.mock(|when, then| {
        when.method(GET).path("/status/12302");
        then.status(200).json_body(json!({
            "success": true,
            "data": {
                "currentStatus": "Departed",
                "currentStation": "Kanpur Central",
                "nextStation": "Mughalsarai",
                "delay": 0
            }
        }));
    });

    let kolkata = lodging.mock(|when, then| {
        when.method(GET)
            .path("/kolkata")
            .header("authorization", "JWT live-jwt");
        then.status(200).json_body(json!({
            "data": [
                { "hotel_name": "The Astor", "price": 2800 },
                { "hotel_name": "Grand Palace", "price": 9100 }
            ]
        }));
    });
    let howrah = lodging.mock(|when, then| {
        when.method(GET).path("/howrah");
        then.status(503);
    });

    let synth_mock = synth.mock(|when, then| {
        when.method(POST).path("/generate");
        then.status(200).json_body(json!({
            "text": "```json\n{\"low\":2500,\"high\":6000,\"currency\":\"INR\",\"basis\":\"per person, 2 days\",\"categories\":[{\"label\":\"Stay\",\"amount\":2800}]}\n```\nOverview: two days around Howrah with a heritage walk."
        }));
    });

    let config = ProviderConfig {
        travel_proxy_base: None,
        rail_api_base: Some(rail.base_url()),
        legacy_train_base: Some(rail.base_url()),
        hotel_api_base: lodging.base_url(),
        hotel_api_token: Some("live-jwt".to_string()),
        synth_proxy_url: Some(synth.url("/generate")),
        synth_api_base: DEFAULT_SYNTH_API_BASE.to_string(),
        synth_api_key: None,
        synth_model: DEFAULT_SYNTH_MODEL.to_string(),
        connect_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(2),
    };

    let (agent, metrics) = agent_with(&config);
    let mut log = ConversationLog::default();

    let query = PlanningQuery {
        origin: Some("NDLS".to_string()),
        destination: Some("HWH".to_string()),
        budget_min: Some(2000),
        budget_max: Some(3000),
        ..PlanningQuery::default()
    };

    let response = agent.plan(Some(query), &mut log).await.expect("full plan");

    rail_pair.assert();
    rail_status.assert();
    // Three stations share the kolkata slug, two the howrah slug.
    assert_eq!(kolkata.hits(), 3);
    assert_eq!(howrah.hits(), 2);
    synth_mock.assert();

    assert_eq!(response.transport.len(), 1);
    assert_eq!(response.transport[0].carrier_id.as_deref(), Some("12302"));
    assert_eq!(response.transport[0].from, "New Delhi");
    assert_eq!(
        response.live_status.as_deref(),
        Some("12302: Departed • Current: Kanpur Central • Next: Mughalsarai")
    );

    // Band 2000-3000: the remote 2800 offer stays and 9100 drops; of the
    // fallback stations only SRC has in-band prices, so SHM vanishes.
    assert_eq!(response.hotels.len(), 4);
    let hwh = response
        .hotels
        .iter()
        .find(|bundle| bundle.station == "HWH")
        .expect("HWH bundle");
    assert_eq!(hwh.hotels.len(), 1);
    assert_eq!(hwh.hotels[0].name, "The Astor");
    let src = response
        .hotels
        .iter()
        .find(|bundle| bundle.station == "SRC")
        .expect("SRC bundle");
    assert_eq!(src.hotels.len(), 2);
    assert!(response.hotels.iter().all(|bundle| bundle.station != "SHM"));

    assert!(response.narrative.contains("heritage walk"));
    let budget = response.budget.expect("budget extracted from the reply");
    assert_eq!(budget.low, 2500.0);
    assert_eq!(budget.high, 6000.0);
    assert_eq!(budget.categories.len(), 1);
    assert_eq!(budget.categories[0].label, "Stay");

    assert_eq!(response.nearby_transit.len(), 5);

    assert_eq!(log.len(), 1);
    let composite = &log.turns[0].composite_query;
    assert!(composite.contains("From NDLS to HWH"));
    assert!(composite.contains("budget ₹2000-₹3000 per day"));

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.requests_total, 1);
    assert_eq!(snapshot.synthesis_calls_total, 1);
    assert_eq!(snapshot.degraded_total, 0);
}
