use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct EngineMetrics {
    requests_total: AtomicU64,
    retrieval_hits_total: AtomicU64,
    synthesis_calls_total: AtomicU64,
    degraded_total: AtomicU64,
    total_latency_millis: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub retrieval_hits_total: u64,
    pub synthesis_calls_total: u64,
    pub degraded_total: u64,
    pub avg_latency_millis: f64,
}

impl EngineMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_retrieval_hits(&self, hits: usize) {
        self.retrieval_hits_total
            .fetch_add(hits as u64, Ordering::Relaxed);
    }

    pub fn inc_synthesis_call(&self) {
        self.synthesis_calls_total.fetch_add(1, Ordering::Relaxed);
    }

    /// A degraded response carried the canned narrative instead of a
    /// synthesized one.
    pub fn inc_degraded(&self) {
        self.degraded_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn observe_latency(&self, duration: Duration) {
        self.total_latency_millis
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests = self.requests_total.load(Ordering::Relaxed);
        let latency = self.total_latency_millis.load(Ordering::Relaxed);

        MetricsSnapshot {
            requests_total: requests,
            retrieval_hits_total: self.retrieval_hits_total.load(Ordering::Relaxed),
            synthesis_calls_total: self.synthesis_calls_total.load(Ordering::Relaxed),
            degraded_total: self.degraded_total.load(Ordering::Relaxed),
            avg_latency_millis: if requests == 0 {
                0.0
            } else {
                latency as f64 / requests as f64
            },
        }
    }
}

pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,yatri_api=info,yatri_agents=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .init();
    });
}
