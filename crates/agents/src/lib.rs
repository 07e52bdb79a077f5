use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use tracing::{info, instrument};
use yatri_core::catalog::{is_known_station, nearby_transit_for, CANDIDATE_STATIONS};
use yatri_core::{
    compose_query, extract_budget, ConversationLog, ConversationTurn, PlanningQuery,
    PlanningResponse, RetrievalSource, TrainClass, TransportBooking,
};
use yatri_observability::EngineMetrics;
use yatri_providers::{
    build_http_client, filter_by_budget, LodgingResolver, ProviderConfig, SynthesisClient,
    TransportResolver, TransportStrategy,
};
use yatri_retrieval::{score, Corpus};

/// Narrative served when no synthesizer tier produced a reply.
pub const FALLBACK_NARRATIVE: &str = "AI synthesis unavailable; showing local data only.";

const SYNTHESIS_SOURCES: usize = 6;
const DEFAULT_PASSENGERS: u8 = 2;

#[derive(Clone)]
pub struct PlannerAgent {
    corpus: Arc<Corpus>,
    transport: TransportResolver,
    lodging: LodgingResolver,
    synthesizer: SynthesisClient,
    metrics: Arc<EngineMetrics>,
}

impl PlannerAgent {
    pub fn new(
        corpus: Arc<Corpus>,
        config: &ProviderConfig,
        metrics: Arc<EngineMetrics>,
    ) -> Result<Self> {
        let client = build_http_client(config)?;
        Ok(Self {
            corpus,
            transport: TransportResolver::new(client.clone(), config),
            lodging: LodgingResolver::new(client.clone(), config),
            synthesizer: SynthesisClient::new(client, config),
            metrics,
        })
    }

    /// Runs the full planning pipeline for one turn and appends the result
    /// to the caller's log. The only error is a malformed query; provider
    /// trouble degrades into fallback data instead of failing the turn.
    #[instrument(skip(self, query, log))]
    pub async fn plan(
        &self,
        query: Option<PlanningQuery>,
        log: &mut ConversationLog,
    ) -> Result<PlanningResponse> {
        let started = Instant::now();
        self.metrics.inc_request();

        if let Some(query) = query.as_ref() {
            query.validate()?;
        }

        let composite = compose_query(query.as_ref());
        let booking = booking_for(query.as_ref());
        let shortlist = full_shortlist();

        let (sources, resolution, lodging) = tokio::join!(
            async { score(&composite, self.corpus.items()) },
            self.transport.resolve(&booking),
            self.lodging.resolve(&shortlist),
        );
        self.metrics.add_retrieval_hits(sources.len());

        let (floor, ceiling) = budget_band(query.as_ref());
        let hotels = filter_by_budget(lodging, floor, ceiling);

        let reply = if self.synthesizer.is_configured() {
            self.metrics.inc_synthesis_call();
            let top = &sources[..sources.len().min(SYNTHESIS_SOURCES)];
            self.synthesizer.synthesize(&composite, top).await
        } else {
            None
        };
        let budget = reply.as_deref().and_then(extract_budget);
        let degraded = reply.is_none();
        let narrative = reply.unwrap_or_else(|| {
            self.metrics.inc_degraded();
            FALLBACK_NARRATIVE.to_string()
        });

        let response = PlanningResponse {
            narrative,
            sources,
            budget,
            transport: resolution.options,
            live_status: resolution.live_status,
            hotels,
            nearby_transit: nearby_transit_for(&shortlist),
        };

        log.push_turn(ConversationTurn {
            at: Utc::now(),
            composite_query: composite.clone(),
            response: response.clone(),
        });

        self.metrics.observe_latency(started.elapsed());
        info!(
            query = %composite,
            sources = response.sources.len(),
            transport = response.transport.len(),
            hotels = response.hotels.len(),
            degraded,
            "plan assembled"
        );

        Ok(response)
    }

    pub fn corpus_search(&self, query: &str, limit: usize) -> Vec<RetrievalSource> {
        score(query, self.corpus.items())
            .into_iter()
            .take(limit)
            .collect()
    }

    pub fn transport_strategies(&self) -> &[TransportStrategy] {
        self.transport.strategies()
    }

    pub fn synthesis_configured(&self) -> bool {
        self.synthesizer.is_configured()
    }
}

fn full_shortlist() -> Vec<String> {
    CANDIDATE_STATIONS
        .iter()
        .map(|code| (*code).to_string())
        .collect()
}

fn booking_for(query: Option<&PlanningQuery>) -> TransportBooking {
    TransportBooking {
        origin: query
            .and_then(|q| q.origin.as_deref())
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .unwrap_or_default(),
        destinations: transport_destinations(query),
        travel_date: query.and_then(|q| q.from_date),
        class: query
            .and_then(|q| q.train_class)
            .unwrap_or(TrainClass::ThirdAc),
        passengers: query
            .and_then(|q| q.passengers)
            .unwrap_or(DEFAULT_PASSENGERS),
    }
}

/// A requested destination that is one of the candidate stations narrows
/// resolution to that single pair; anything else keeps the full shortlist.
fn transport_destinations(query: Option<&PlanningQuery>) -> Vec<String> {
    let requested = query
        .and_then(|q| q.destination.as_deref())
        .map(str::trim)
        .filter(|destination| !destination.is_empty())
        .map(str::to_uppercase);
    match requested {
        Some(code) if is_known_station(&code) => vec![code],
        _ => full_shortlist(),
    }
}

fn budget_band(query: Option<&PlanningQuery>) -> (u32, u32) {
    match query {
        Some(query) => (query.budget_min.unwrap_or(0), query.budget_max.unwrap_or(0)),
        None => (0, 0),
    }
}
