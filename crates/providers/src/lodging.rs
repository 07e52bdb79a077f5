use futures::future;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use yatri_core::catalog;
use yatri_core::{HotelOffer, StationHotels};

use crate::config::ProviderConfig;
use crate::http::{fetch_json, non_empty};

const MAX_OFFERS_PER_STATION: usize = 5;

const NAME_KEYS: [&str; 3] = ["hotel_name", "hotelName", "name"];
const PRICE_KEYS: [&str; 4] = ["price", "min_rate", "avg_price", "rate"];

/// Resolves hotel offers per station, concurrently, with the static
/// catalogue as the per-station fallback. Without a credential no network
/// call is attempted at all.
#[derive(Clone)]
pub struct LodgingResolver {
    client: Client,
    base: String,
    token: Option<String>,
}

impl LodgingResolver {
    pub fn new(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base: config.hotel_api_base.clone(),
            token: config.hotel_api_token.clone(),
        }
    }

    pub async fn resolve(&self, stations: &[String]) -> Vec<StationHotels> {
        let codes = unique_known(stations);
        let bundles = match self.token.as_deref() {
            None => codes.iter().map(|code| fallback_bundle(code)).collect(),
            Some(token) => {
                let lookups = codes.iter().map(|code| self.station_lookup(code, token));
                future::join_all(lookups).await
            }
        };
        bundles
            .into_iter()
            .filter(|bundle| !bundle.hotels.is_empty())
            .collect()
    }

    async fn station_lookup(&self, station: &str, token: &str) -> StationHotels {
        let slug = catalog::station_city_slug(station).unwrap_or("kolkata");
        let url = format!("{}/{}", self.base, slug);
        let offers = match fetch_json(
            self.client
                .get(&url)
                .header(AUTHORIZATION, format!("JWT {token}")),
        )
        .await
        {
            Some(payload) => normalize_offers(&payload, station),
            None => Vec::new(),
        };
        if offers.is_empty() {
            debug!(%station, "no usable hotel offers; serving fallback catalogue");
            return fallback_bundle(station);
        }
        StationHotels {
            station: station.to_string(),
            city: catalog::station_city(station).unwrap_or("Kolkata").to_string(),
            hotels: offers,
        }
    }
}

/// Removes hotels without a known price or priced outside `[min, max]`;
/// `max == 0` means unbounded. Bundles emptied by the filter are dropped.
pub fn filter_by_budget(bundles: Vec<StationHotels>, min: u32, max: u32) -> Vec<StationHotels> {
    let floor = f64::from(min);
    let ceiling = if max > 0 { f64::from(max) } else { f64::INFINITY };
    bundles
        .into_iter()
        .filter_map(|bundle| {
            let StationHotels {
                station,
                city,
                hotels,
            } = bundle;
            let hotels: Vec<HotelOffer> = hotels
                .into_iter()
                .filter(|hotel| {
                    hotel
                        .price
                        .map(|price| price >= floor && price <= ceiling)
                        .unwrap_or(false)
                })
                .collect();
            if hotels.is_empty() {
                None
            } else {
                Some(StationHotels {
                    station,
                    city,
                    hotels,
                })
            }
        })
        .collect()
}

/// Accepted reply shapes: an offer array under `data`, `results`, or
/// `hotels`, or a `data` object keyed by hotel name. Anything else yields
/// zero offers and routes the station to the fallback catalogue.
fn normalize_offers(payload: &Value, station: &str) -> Vec<HotelOffer> {
    let rows = payload
        .get("data")
        .and_then(Value::as_array)
        .or_else(|| payload.get("results").and_then(Value::as_array))
        .or_else(|| payload.get("hotels").and_then(Value::as_array));
    if let Some(rows) = rows {
        return rows
            .iter()
            .filter_map(|row| offer_from_row(row, station))
            .take(MAX_OFFERS_PER_STATION)
            .collect();
    }
    if let Some(keyed) = payload.get("data").and_then(Value::as_object) {
        return keyed
            .iter()
            .filter_map(|(name, value)| offer_from_entry(name, value, station))
            .take(MAX_OFFERS_PER_STATION)
            .collect();
    }
    Vec::new()
}

fn offer_from_row(row: &Value, station: &str) -> Option<HotelOffer> {
    let name = NAME_KEYS
        .into_iter()
        .find_map(|key| non_empty(row.get(key)))?;
    let price = PRICE_KEYS
        .into_iter()
        .find_map(|key| row.get(key).and_then(price_of));
    let currency = non_empty(row.get("currency")).unwrap_or_else(|| "INR".to_string());
    Some(HotelOffer {
        name,
        price,
        currency: Some(currency),
        source_station: station.to_string(),
    })
}

fn offer_from_entry(name: &str, value: &Value, station: &str) -> Option<HotelOffer> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let price = value
        .get("price")
        .and_then(price_of)
        .or_else(|| price_of(value));
    Some(HotelOffer {
        name: name.to_string(),
        price,
        currency: Some("INR".to_string()),
        source_station: station.to_string(),
    })
}

fn price_of(value: &Value) -> Option<f64> {
    let price = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if price.is_finite() && price > 0.0 {
        Some(price)
    } else {
        None
    }
}

fn fallback_bundle(station: &str) -> StationHotels {
    StationHotels {
        station: station.to_string(),
        city: catalog::station_city(station).unwrap_or("Kolkata").to_string(),
        hotels: catalog::fallback_hotels(station),
    }
}

fn unique_known(stations: &[String]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for station in stations {
        let code = station.as_str();
        if catalog::is_known_station(code) && !seen.contains(&code) {
            seen.push(code);
        }
    }
    seen
}
