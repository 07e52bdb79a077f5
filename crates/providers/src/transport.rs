use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use yatri_core::catalog;
use yatri_core::{TransportBooking, TransportOption, TransportResolution};

use crate::config::ProviderConfig;
use crate::http::{fetch_json, non_empty};

const MAX_OPTIONS: usize = 6;
const MAX_ROWS_PER_CALL: usize = 6;

/// One tier of the transport fallback chain, tried in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportStrategy {
    Proxy { base: String },
    RailApi { base: String },
    LegacySearch { base: String },
    StaticTable,
}

struct TierOutcome {
    options: Vec<TransportOption>,
    live_status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProxySearchResponse {
    #[serde(default)]
    options: Vec<TransportOption>,
    #[serde(default)]
    live_status: Option<String>,
}

/// Resolves a booking through an ordered chain of providers. Unconfigured
/// tiers are skipped at construction time; the static table is always last,
/// so resolution never comes back empty-handed.
#[derive(Clone)]
pub struct TransportResolver {
    client: Client,
    strategies: Vec<TransportStrategy>,
    status_base: Option<String>,
}

impl TransportResolver {
    pub fn new(client: Client, config: &ProviderConfig) -> Self {
        let mut strategies = Vec::new();
        if let Some(base) = config.travel_proxy_base.clone() {
            strategies.push(TransportStrategy::Proxy { base });
        }
        if let Some(base) = config.rail_api_base.clone() {
            strategies.push(TransportStrategy::RailApi { base });
        }
        if let Some(base) = config.legacy_train_base.clone() {
            strategies.push(TransportStrategy::LegacySearch { base });
        }
        strategies.push(TransportStrategy::StaticTable);
        Self {
            client,
            strategies,
            status_base: config.legacy_train_base.clone(),
        }
    }

    pub fn strategies(&self) -> &[TransportStrategy] {
        &self.strategies
    }

    /// First tier with a non-empty result wins. The merged list is capped at
    /// six options in provider order; no cross-provider re-sort is applied.
    pub async fn resolve(&self, booking: &TransportBooking) -> TransportResolution {
        for strategy in &self.strategies {
            let Some(outcome) = self.attempt(strategy, booking).await else {
                continue;
            };
            let mut options = outcome.options;
            options.truncate(MAX_OPTIONS);
            let live_status = match strategy {
                TransportStrategy::Proxy { .. } => outcome.live_status,
                _ => self.live_status_for(&options).await,
            };
            return TransportResolution {
                options,
                live_status,
            };
        }
        TransportResolution::default()
    }

    async fn attempt(
        &self,
        strategy: &TransportStrategy,
        booking: &TransportBooking,
    ) -> Option<TierOutcome> {
        match strategy {
            TransportStrategy::Proxy { base } => self.proxy_search(base, booking).await,
            TransportStrategy::RailApi { base } => self.rail_search(base, booking).await,
            TransportStrategy::LegacySearch { base } => self.legacy_search(base, booking).await,
            TransportStrategy::StaticTable => Some(static_rows(booking)),
        }
    }

    async fn proxy_search(&self, base: &str, booking: &TransportBooking) -> Option<TierOutcome> {
        let payload = fetch_json(self.client.post(format!("{base}/search")).json(booking)).await?;
        let parsed: ProxySearchResponse = match serde_json::from_value(payload) {
            Ok(parsed) => parsed,
            Err(error) => {
                debug!(error = %error, "proxy search reply did not match the expected shape");
                return None;
            }
        };
        if parsed.options.is_empty() {
            return None;
        }
        Some(TierOutcome {
            options: parsed.options,
            live_status: parsed.live_status,
        })
    }

    async fn rail_search(&self, base: &str, booking: &TransportBooking) -> Option<TierOutcome> {
        let origin = booking.origin.trim().to_uppercase();
        if origin.is_empty() {
            debug!("rail search skipped: origin station code is required");
            return None;
        }
        let mut options = Vec::new();
        for destination in &booking.destinations {
            let url = match booking.travel_date {
                Some(date) => format!(
                    "{base}/getTrainOn?from={origin}&to={destination}&date={}",
                    date.format("%d-%m-%Y")
                ),
                None => format!("{base}/betweenStations?from={origin}&to={destination}"),
            };
            let Some(payload) = fetch_json(self.client.get(&url)).await else {
                debug!(%origin, %destination, "rail lookup failed for pair");
                continue;
            };
            if !payload
                .get("success")
                .and_then(Value::as_bool)
                .unwrap_or(false)
            {
                debug!(%origin, %destination, "rail provider reported failure for pair");
                continue;
            }
            let Some(rows) = payload.get("data").and_then(Value::as_array) else {
                continue;
            };
            for row in rows.iter().take(MAX_ROWS_PER_CALL) {
                options.push(rail_row(row, &origin, destination, booking));
            }
        }
        if options.is_empty() {
            return None;
        }
        options.truncate(MAX_OPTIONS);
        Some(TierOutcome {
            options,
            live_status: None,
        })
    }

    async fn legacy_search(&self, base: &str, booking: &TransportBooking) -> Option<TierOutcome> {
        if booking.origin.trim().is_empty() {
            return None;
        }
        let destination = booking
            .destinations
            .first()
            .map(String::as_str)
            .unwrap_or(catalog::CANDIDATE_STATIONS[0]);
        let body = serde_json::json!({
            "from": booking.origin,
            "to": destination,
            "date": booking.travel_date,
            "class": booking.class.as_code(),
            "passengers": booking.passengers,
        });
        let payload = fetch_json(self.client.post(format!("{base}/search")).json(&body)).await?;
        if !payload
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false)
        {
            return None;
        }
        let rows = payload
            .get("data")
            .and_then(|data| data.get("trains"))
            .and_then(Value::as_array)?;
        let options: Vec<TransportOption> = rows
            .iter()
            .take(MAX_ROWS_PER_CALL)
            .map(|row| legacy_row(row, booking, destination))
            .collect();
        if options.is_empty() {
            return None;
        }
        Some(TierOutcome {
            options,
            live_status: None,
        })
    }

    async fn live_status_for(&self, options: &[TransportOption]) -> Option<String> {
        let base = self.status_base.as_deref()?;
        let carrier_id = options
            .iter()
            .find_map(|option| option.carrier_id.as_deref())?;
        let payload = fetch_json(self.client.get(format!("{base}/status/{carrier_id}"))).await?;
        format_live_status(&payload, carrier_id)
    }
}

fn static_rows(booking: &TransportBooking) -> TierOutcome {
    let origin = booking.origin.trim();
    let from = if origin.is_empty() { "Howrah" } else { origin };
    let to = booking
        .destinations
        .first()
        .map(String::as_str)
        .unwrap_or("New Jalpaiguri");
    TierOutcome {
        options: catalog::static_transport(from, to, booking.class.as_code()),
        live_status: None,
    }
}

fn rail_row(
    row: &Value,
    origin: &str,
    destination: &str,
    booking: &TransportBooking,
) -> TransportOption {
    let train_base = row.get("train_base");
    let carrier_id = train_base
        .and_then(|base| non_empty(base.get("number")).or_else(|| non_empty(base.get("train_no"))));
    let carrier_name = train_base
        .and_then(|base| non_empty(base.get("name")).or_else(|| non_empty(base.get("train_name"))))
        .unwrap_or_else(|| "Train".to_string());
    TransportOption {
        from: text_or(row, "from_stn_name", origin),
        to: text_or(row, "to_stn_name", destination),
        departure: text_or(row, "from_time", "—"),
        arrival: text_or(row, "to_time", "—"),
        class: booking.class.as_code().to_string(),
        availability: "Check IRCTC".to_string(),
        carrier_id,
        carrier_name: Some(carrier_name),
        price: None,
    }
}

fn legacy_row(row: &Value, booking: &TransportBooking, destination: &str) -> TransportOption {
    let price = row
        .get("price")
        .and_then(Value::as_f64)
        .filter(|price| price.is_finite() && *price > 0.0);
    TransportOption {
        from: text_or(row, "from", &booking.origin),
        to: text_or(row, "to", destination),
        departure: text_or(row, "departure", "—"),
        arrival: text_or(row, "arrival", "—"),
        class: text_or(row, "class", booking.class.as_code()),
        availability: text_or(row, "availability", "Unknown"),
        carrier_id: non_empty(row.get("trainNumber")).filter(|id| id != "N/A"),
        carrier_name: Some(
            non_empty(row.get("trainName")).unwrap_or_else(|| "Unknown Train".to_string()),
        ),
        price,
    }
}

fn format_live_status(payload: &Value, carrier_id: &str) -> Option<String> {
    if !payload
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        return None;
    }
    let detail = payload.get("data")?;
    let current_status = detail.get("currentStatus").and_then(Value::as_str)?;
    let current_station = detail
        .get("currentStation")
        .and_then(Value::as_str)
        .unwrap_or("Unknown");
    let next_station = detail
        .get("nextStation")
        .and_then(Value::as_str)
        .unwrap_or("Unknown");
    let mut line = format!(
        "{carrier_id}: {current_status} • Current: {current_station} • Next: {next_station}"
    );
    let delay = detail.get("delay").and_then(Value::as_f64).unwrap_or(0.0);
    if delay > 0.0 {
        line.push_str(&format!(" (Delayed by {delay:.0} mins)"));
    }
    Some(line)
}

fn text_or(row: &Value, key: &str, fallback: &str) -> String {
    non_empty(row.get(key)).unwrap_or_else(|| fallback.to_string())
}
