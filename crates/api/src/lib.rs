use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Json, Path as AxumPath, Query, State};
use axum::http::{header, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;
use yatri_agents::PlannerAgent;
use yatri_core::{ConversationLog, PlanningQuery, PlanningResponse, RetrievalSource};
use yatri_observability::{EngineMetrics, MetricsSnapshot};
use yatri_providers::ProviderConfig;
use yatri_retrieval::Corpus;

const DEFAULT_SEARCH_LIMIT: usize = 5;

#[derive(Clone)]
pub struct ApiState {
    pub agent: PlannerAgent,
    pub metrics: Arc<EngineMetrics>,
    pub sessions: Arc<RwLock<HashMap<String, ConversationLog>>>,
    pub capabilities: TierCapabilities,
}

/// Which remote tiers are configured; everything else serves fallback data.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TierCapabilities {
    pub travel_proxy: bool,
    pub rail_api: bool,
    pub legacy_search: bool,
    pub lodging_api: bool,
    pub synthesis: bool,
}

impl TierCapabilities {
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self {
            travel_proxy: config.travel_proxy_base.is_some(),
            rail_api: config.rail_api_base.is_some(),
            legacy_search: config.legacy_train_base.is_some(),
            lodging_api: config.hotel_api_token.is_some(),
            synthesis: config.synth_proxy_url.is_some() || config.synth_api_key.is_some(),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    metrics: MetricsSnapshot,
    capabilities: TierCapabilities,
}

#[derive(Debug, Deserialize)]
struct PlanRequest {
    session_id: Option<String>,
    query: Option<PlanningQuery>,
}

#[derive(Debug, Serialize)]
struct PlanReply {
    session_id: String,
    response: PlanningResponse,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct SearchReply {
    query: String,
    hits: Vec<RetrievalSource>,
}

pub fn build_app(kb_root: Option<&str>) -> Result<Router> {
    let config = ProviderConfig::from_env();
    let corpus = match kb_root {
        Some(root) => Corpus::from_dir(root)
            .with_context(|| format!("failed to load corpus from {root}"))?,
        None => Corpus::builtin(),
    };
    build_app_with(corpus, &config)
}

pub fn build_app_with(corpus: Corpus, config: &ProviderConfig) -> Result<Router> {
    let metrics = EngineMetrics::shared();
    let agent = PlannerAgent::new(Arc::new(corpus), config, metrics.clone())?;

    let state = ApiState {
        agent,
        metrics,
        sessions: Arc::new(RwLock::new(HashMap::new())),
        capabilities: TierCapabilities::from_config(config),
    };

    Ok(build_router(state))
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/plan", post(plan))
        .route("/v1/sessions/:id/log", get(session_log))
        .route("/v1/corpus/search", get(corpus_search))
        .layer(build_cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(64 * 1024))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
        capabilities: state.capabilities,
    };
    (StatusCode::OK, Json(payload))
}

async fn plan(
    State(state): State<ApiState>,
    Json(request): Json<PlanRequest>,
) -> impl IntoResponse {
    let session_id = request
        .session_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    // The log is cloned out so no lock is held across the planning await.
    let mut log = state
        .sessions
        .read()
        .get(&session_id)
        .cloned()
        .unwrap_or_default();

    match state.agent.plan(request.query, &mut log).await {
        Ok(response) => {
            state.sessions.write().insert(session_id.clone(), log);
            (
                StatusCode::OK,
                Json(PlanReply {
                    session_id,
                    response,
                }),
            )
                .into_response()
        }
        Err(error) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "plan_failed",
                "message": error.to_string()
            })),
        )
            .into_response(),
    }
}

async fn session_log(
    State(state): State<ApiState>,
    AxumPath(id): AxumPath<String>,
) -> impl IntoResponse {
    match state.sessions.read().get(&id) {
        Some(log) => (StatusCode::OK, Json(log.clone())).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": "unknown_session",
                "message": format!("no conversation log for session {id}")
            })),
        )
            .into_response(),
    }
}

async fn corpus_search(
    State(state): State<ApiState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let query = params.q.unwrap_or_default();
    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    let hits = state.agent.corpus_search(&query, limit);
    (StatusCode::OK, Json(SearchReply { query, hits }))
}

fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
