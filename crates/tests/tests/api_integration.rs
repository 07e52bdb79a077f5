use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use yatri_agents::FALLBACK_NARRATIVE;
use yatri_api::build_app_with;
use yatri_providers::ProviderConfig;
use yatri_retrieval::Corpus;

fn offline_app() -> Router {
    build_app_with(Corpus::builtin(), &ProviderConfig::offline()).expect("app should build")
}

fn plan_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/plan")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_offline_capabilities() {
    let app = offline_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = read_json(response).await;
    assert_eq!(parsed["status"], "ok");
    assert_eq!(parsed["capabilities"]["travel_proxy"], false);
    assert_eq!(parsed["capabilities"]["rail_api"], false);
    assert_eq!(parsed["capabilities"]["lodging_api"], false);
    assert_eq!(parsed["capabilities"]["synthesis"], false);
    assert!(parsed["metrics"]["requests_total"].is_number());
}

#[tokio::test]
async fn empty_plan_request_serves_fallback_data() {
    let app = offline_app();

    let response = app.oneshot(plan_request(json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = read_json(response).await;
    assert!(!parsed["session_id"].as_str().unwrap().is_empty());

    let plan = &parsed["response"];
    assert_eq!(plan["narrative"], FALLBACK_NARRATIVE);
    assert_eq!(plan["transport"].as_array().unwrap().len(), 6);
    assert_eq!(plan["hotels"].as_array().unwrap().len(), 5);
    assert_eq!(plan["nearby_transit"].as_array().unwrap().len(), 5);
    assert!(plan["budget"].is_null());
    assert!(plan["live_status"].is_null());
    assert!(!plan["sources"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn planning_turns_append_to_the_session_log() {
    let app = offline_app();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(plan_request(json!({
                "session_id": "trip-1",
                "query": { "destination": "HWH", "party": "family" }
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let log_response = app
        .oneshot(
            Request::builder()
                .uri("/v1/sessions/trip-1/log")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(log_response.status(), StatusCode::OK);

    let parsed = read_json(log_response).await;
    let turns = parsed["turns"].as_array().unwrap();
    assert_eq!(turns.len(), 2);
    assert!(turns[0]["composite_query"]
        .as_str()
        .unwrap()
        .contains("family travel"));
}

#[tokio::test]
async fn unknown_session_log_is_not_found() {
    let app = offline_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/sessions/ghost/log")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_query_is_rejected_without_a_turn() {
    let app = offline_app();

    let response = app
        .clone()
        .oneshot(plan_request(json!({
            "session_id": "bad-band",
            "query": { "budget_min": 9000, "budget_max": 2000 }
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let parsed = read_json(response).await;
    assert_eq!(parsed["error"], "plan_failed");
    assert!(parsed["message"].as_str().unwrap().contains("inverted"));

    // The failed request must not have created the session.
    let log_response = app
        .oneshot(
            Request::builder()
                .uri("/v1/sessions/bad-band/log")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(log_response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn corpus_search_returns_scored_hits() {
    let app = offline_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/corpus/search?q=victoria%20memorial&limit=3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = read_json(response).await;
    let hits = parsed["hits"].as_array().unwrap();
    assert!(!hits.is_empty());
    assert!(hits.len() <= 3);
    assert_eq!(hits[0]["title"], "Victoria Memorial");
}
