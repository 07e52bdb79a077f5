use chrono::NaiveDate;

use crate::models::{PlanningQuery, TravelMode};

pub const DEFAULT_COMPOSITE_QUERY: &str = "Plan a Kolkata trip with family, mid-range budget.";

pub fn normalize_text(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

pub fn trip_length_days(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days().max(1)
}

pub fn compose_query(query: Option<&PlanningQuery>) -> String {
    let Some(query) = query else {
        return DEFAULT_COMPOSITE_QUERY.to_string();
    };

    let mut pieces: Vec<String> = Vec::new();

    if let (Some(origin), Some(destination)) = (trimmed(&query.origin), trimmed(&query.destination))
    {
        pieces.push(format!("From {origin} to {destination}"));
    }
    if let (Some(from), Some(to)) = (query.from_date, query.to_date) {
        let days = trip_length_days(from, to);
        pieces.push(format!("from {from} to {to} ({days} days)"));
    }
    if let Some(party) = query.party {
        pieces.push(format!("{} travel", party.as_label()));
    }
    if let Some(mode) = query.mode {
        pieces.push(format!("prefer {}", mode.as_label()));
    }
    if query.mode == Some(TravelMode::Train) {
        match (query.train_class, query.passengers) {
            (Some(class), Some(passengers)) => {
                pieces.push(format!("{} class, {passengers} passengers", class.as_code()));
            }
            (Some(class), None) => pieces.push(format!("{} class", class.as_code())),
            (None, Some(passengers)) => pieces.push(format!("{passengers} passengers")),
            (None, None) => {}
        }
    }
    let budget_min = query.budget_min.unwrap_or(0);
    let budget_max = query.budget_max.unwrap_or(0);
    if budget_min > 0 || budget_max > 0 {
        pieces.push(format!("budget ₹{budget_min}-₹{budget_max} per day"));
    }
    if let Some(notes) = trimmed(&query.notes) {
        pieces.push(normalize_text(notes));
    }

    if pieces.is_empty() {
        DEFAULT_COMPOSITE_QUERY.to_string()
    } else {
        pieces.join(", ")
    }
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TrainClass, TravelParty};

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid date")
    }

    #[test]
    fn empty_query_uses_default() {
        assert_eq!(compose_query(None), DEFAULT_COMPOSITE_QUERY);
        assert_eq!(
            compose_query(Some(&PlanningQuery::default())),
            DEFAULT_COMPOSITE_QUERY
        );
    }

    #[test]
    fn composes_full_query_in_order() {
        let query = PlanningQuery {
            origin: Some("NDLS".to_string()),
            destination: Some("HWH".to_string()),
            from_date: Some(date("2026-01-10")),
            to_date: Some(date("2026-01-12")),
            party: Some(TravelParty::Family),
            mode: Some(TravelMode::Train),
            budget_min: Some(3000),
            budget_max: Some(7000),
            train_class: Some(TrainClass::ThirdAc),
            passengers: Some(2),
            notes: Some("want to see Durga Puja".to_string()),
        };
        assert_eq!(
            compose_query(Some(&query)),
            "From NDLS to HWH, from 2026-01-10 to 2026-01-12 (2 days), family travel, \
             prefer train, 3A class, 2 passengers, budget ₹3000-₹7000 per day, \
             want to see Durga Puja"
        );
    }

    #[test]
    fn class_detail_only_for_train_mode() {
        let query = PlanningQuery {
            mode: Some(TravelMode::Flight),
            train_class: Some(TrainClass::Sleeper),
            passengers: Some(4),
            ..PlanningQuery::default()
        };
        assert_eq!(compose_query(Some(&query)), "prefer flight");
    }

    #[test]
    fn same_day_trip_counts_one_day() {
        assert_eq!(trip_length_days(date("2026-03-01"), date("2026-03-01")), 1);
        assert_eq!(trip_length_days(date("2026-03-01"), date("2026-03-04")), 3);
    }
}
