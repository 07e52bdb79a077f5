use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelParty {
    Solo,
    Couple,
    Family,
    Friends,
}

impl TravelParty {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "solo" | "single" => Some(Self::Solo),
            "couple" | "duo" => Some(Self::Couple),
            "family" => Some(Self::Family),
            "friends" | "group" => Some(Self::Friends),
            _ => None,
        }
    }

    pub fn as_label(self) -> &'static str {
        match self {
            Self::Solo => "solo",
            Self::Couple => "couple",
            Self::Family => "family",
            Self::Friends => "friends",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Train,
    Flight,
    Cab,
    Mixed,
}

impl TravelMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "train" | "rail" => Some(Self::Train),
            "flight" | "air" | "plane" => Some(Self::Flight),
            "cab" | "taxi" | "car" => Some(Self::Cab),
            "mixed" | "any" => Some(Self::Mixed),
            _ => None,
        }
    }

    pub fn as_label(self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Flight => "flight",
            Self::Cab => "cab",
            Self::Mixed => "mixed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainClass {
    #[serde(rename = "SL")]
    Sleeper,
    #[serde(rename = "3A")]
    ThirdAc,
    #[serde(rename = "2A")]
    SecondAc,
    #[serde(rename = "1A")]
    FirstAc,
    #[serde(rename = "CC")]
    ChairCar,
    #[serde(rename = "EC")]
    Executive,
}

impl TrainClass {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "sl" | "sleeper" => Some(Self::Sleeper),
            "3a" | "third ac" => Some(Self::ThirdAc),
            "2a" | "second ac" => Some(Self::SecondAc),
            "1a" | "first ac" => Some(Self::FirstAc),
            "cc" | "chair car" => Some(Self::ChairCar),
            "ec" | "executive" => Some(Self::Executive),
            _ => None,
        }
    }

    pub fn as_code(self) -> &'static str {
        match self {
            Self::Sleeper => "SL",
            Self::ThirdAc => "3A",
            Self::SecondAc => "2A",
            Self::FirstAc => "1A",
            Self::ChairCar => "CC",
            Self::Executive => "EC",
        }
    }
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("budget band is inverted: min {min} exceeds max {max}")]
    BudgetBandInverted { min: u32, max: u32 },
    #[error("date range is inverted: {from} is after {to}")]
    DateRangeInverted { from: NaiveDate, to: NaiveDate },
    #[error("passenger count must be at least 1")]
    ZeroPassengers,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanningQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub party: Option<TravelParty>,
    pub mode: Option<TravelMode>,
    pub budget_min: Option<u32>,
    pub budget_max: Option<u32>,
    pub train_class: Option<TrainClass>,
    pub passengers: Option<u8>,
    pub notes: Option<String>,
}

impl PlanningQuery {
    pub fn validate(&self) -> Result<(), QueryError> {
        if let (Some(min), Some(max)) = (self.budget_min, self.budget_max) {
            if min > max {
                return Err(QueryError::BudgetBandInverted { min, max });
            }
        }
        if let (Some(from), Some(to)) = (self.from_date, self.to_date) {
            if from > to {
                return Err(QueryError::DateRangeInverted { from, to });
            }
        }
        if self.passengers == Some(0) {
            return Err(QueryError::ZeroPassengers);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Destination,
    Itinerary,
    Guide,
    Web,
}

impl SourceKind {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Destination => "destination",
            Self::Itinerary => "itinerary",
            Self::Guide => "guide",
            Self::Web => "web",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalCorpusItem {
    pub title: String,
    pub body: String,
    pub category: String,
    pub kind: SourceKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalSource {
    pub title: String,
    pub snippet: String,
    pub score: f32,
    pub kind: SourceKind,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportBooking {
    pub origin: String,
    pub destinations: Vec<String>,
    pub travel_date: Option<NaiveDate>,
    pub class: TrainClass,
    pub passengers: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportOption {
    pub from: String,
    pub to: String,
    pub departure: String,
    pub arrival: String,
    pub class: String,
    pub availability: String,
    pub carrier_id: Option<String>,
    pub carrier_name: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransportResolution {
    pub options: Vec<TransportOption>,
    pub live_status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelOffer {
    pub name: String,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub source_station: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationHotels {
    pub station: String,
    pub city: String,
    pub hotels: Vec<HotelOffer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyTransitInfo {
    pub station: String,
    pub buses: Vec<String>,
    pub metros: Vec<String>,
    pub taxis: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLine {
    pub label: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetEstimate {
    pub low: f64,
    pub high: f64,
    pub currency: String,
    pub basis: String,
    pub categories: Vec<BudgetLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningResponse {
    pub narrative: String,
    pub sources: Vec<RetrievalSource>,
    pub budget: Option<BudgetEstimate>,
    pub transport: Vec<TransportOption>,
    pub live_status: Option<String>,
    pub hotels: Vec<StationHotels>,
    pub nearby_transit: Vec<NearbyTransitInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub at: DateTime<Utc>,
    pub composite_query: String,
    pub response: PlanningResponse,
}

const MAX_LOG_TURNS: usize = 40;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationLog {
    pub turns: Vec<ConversationTurn>,
}

impl ConversationLog {
    pub fn push_turn(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
        while self.turns.len() > MAX_LOG_TURNS {
            self.turns.remove(0);
        }
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
