use crate::models::{HotelOffer, NearbyTransitInfo, TransportOption};

pub const CANDIDATE_STATIONS: [&str; 5] = ["HWH", "SLDH", "KOAA", "SHM", "SRC"];

struct StationRecord {
    code: &'static str,
    city: &'static str,
    slug: &'static str,
}

const STATIONS: [StationRecord; 5] = [
    StationRecord {
        code: "HWH",
        city: "Howrah, Kolkata",
        slug: "kolkata",
    },
    StationRecord {
        code: "SLDH",
        city: "Sealdah, Kolkata",
        slug: "kolkata",
    },
    StationRecord {
        code: "KOAA",
        city: "Kolkata Chitpur",
        slug: "kolkata",
    },
    StationRecord {
        code: "SHM",
        city: "Shalimar, Howrah",
        slug: "howrah",
    },
    StationRecord {
        code: "SRC",
        city: "Santragachi, Howrah",
        slug: "howrah",
    },
];

pub fn is_known_station(code: &str) -> bool {
    STATIONS.iter().any(|station| station.code == code)
}

pub fn station_city(code: &str) -> Option<&'static str> {
    STATIONS
        .iter()
        .find(|station| station.code == code)
        .map(|station| station.city)
}

pub fn station_city_slug(code: &str) -> Option<&'static str> {
    STATIONS
        .iter()
        .find(|station| station.code == code)
        .map(|station| station.slug)
}

pub fn nearby_transit(code: &str) -> Option<NearbyTransitInfo> {
    let (buses, metros, taxis): (&[&str], &[&str], &[&str]) = match code {
        "HWH" => (
            &[
                "Howrah Bus Stand",
                "Rabindra Setu Bus Stop",
                "Panchanantala Bus Stop",
            ],
            &[
                "Howrah Metro (under construction)",
                "Mahatma Gandhi Road Metro (~15 min via bus)",
            ],
            &[
                "Howrah Taxi Stand (Old Complex)",
                "Prepaid Taxi Counter, Howrah Station",
            ],
        ),
        "SLDH" => (
            &["Sealdah Bus Stand", "Moulali Bus Stop", "Narkeldanga Bus Stop"],
            &["Sealdah Metro (Green Line)", "Phoolbagan Metro (~10 min)"],
            &[
                "Sealdah Taxi Stand (North), RSV Lane",
                "Prepaid Taxi Booth, Sealdah",
            ],
        ),
        "KOAA" => (
            &["Chitpur Bus Terminus", "Ultadanga Hudco Bus Stop"],
            &["Shyambazar Metro", "Belgachia Metro"],
            &["Chitpur Taxi Stand", "Ultadanga Taxi Stand"],
        ),
        "SHM" => (
            &["Shalimar Bus Depot", "Chakrabera Bus Stop"],
            &["Maidan Metro (via bus)", "Park Street Metro (via bus)"],
            &["Shalimar Station Taxi Point", "Kadamtala Taxi Stand"],
        ),
        "SRC" => (
            &[
                "Santragachi Bus Stand (Kona Expway)",
                "Ramrajatala Bus Stop",
            ],
            &["Taratala Metro (~15-20 min)", "Rabindra Sadan Metro (via bus)"],
            &["Santragachi Taxi Stand", "Kona Expressway Taxi Point"],
        ),
        _ => return None,
    };

    Some(NearbyTransitInfo {
        station: code.to_string(),
        buses: owned(buses),
        metros: owned(metros),
        taxis: owned(taxis),
    })
}

pub fn nearby_transit_for(codes: &[String]) -> Vec<NearbyTransitInfo> {
    let mut seen: Vec<&str> = Vec::new();
    let mut entries = Vec::new();
    for code in codes {
        if seen.contains(&code.as_str()) {
            continue;
        }
        seen.push(code.as_str());
        if let Some(entry) = nearby_transit(code) {
            entries.push(entry);
        }
    }
    entries
}

pub fn fallback_hotels(code: &str) -> Vec<HotelOffer> {
    let offers: &[(&str, f64)] = match code {
        "HWH" => &[
            ("The Oberoi Grand", 9200.0),
            ("The Park Kolkata", 6800.0),
            ("FabHotel De Sivalika", 2400.0),
        ],
        "SLDH" => &[
            ("ITC Royal Bengal", 10500.0),
            ("JW Marriott Kolkata", 9800.0),
            ("FabHotel Sashi", 2100.0),
        ],
        "KOAA" => &[
            ("Kenilworth Hotel", 6500.0),
            ("The Peerless Inn", 5200.0),
            ("Casa Fortuna", 3200.0),
        ],
        "SHM" => &[
            ("Fortune Park Panchwati", 4300.0),
            ("Hotel Samrat Plaza", 1900.0),
        ],
        "SRC" => &[("Hotel Geetanjali", 2200.0), ("Hotel Avisha", 2600.0)],
        _ => &[],
    };

    offers
        .iter()
        .map(|(name, price)| HotelOffer {
            name: name.to_string(),
            price: Some(*price),
            currency: Some("INR".to_string()),
            source_station: code.to_string(),
        })
        .collect()
}

pub fn static_transport(from: &str, to: &str, class: &str) -> Vec<TransportOption> {
    let train = |departure: &str, arrival: &str, availability: &str, id: &str, name: &str, price: f64| {
        TransportOption {
            from: from.to_string(),
            to: to.to_string(),
            departure: departure.to_string(),
            arrival: arrival.to_string(),
            class: class.to_string(),
            availability: availability.to_string(),
            carrier_id: Some(id.to_string()),
            carrier_name: Some(name.to_string()),
            price: Some(price),
        }
    };
    let flight = |to: &str, departure: &str, arrival: &str, airline: &str, price: f64| {
        TransportOption {
            from: "CCU".to_string(),
            to: to.to_string(),
            departure: departure.to_string(),
            arrival: arrival.to_string(),
            class: "Economy".to_string(),
            availability: "Available".to_string(),
            carrier_id: None,
            carrier_name: Some(airline.to_string()),
            price: Some(price),
        }
    };

    vec![
        train("06:00", "13:30", "WL 12 → RAC", "12301", "Howrah Rajdhani", 3500.0),
        train("08:30", "15:45", "Available 42", "12313", "Sealdah Express", 850.0),
        train("14:20", "21:10", "WL 8", "12345", "Saraighat Express", 2200.0),
        flight("DEL", "09:45", "12:05", "IndiGo", 6200.0),
        flight("BLR", "14:10", "16:45", "Vistara", 7100.0),
        TransportOption {
            from: from.to_string(),
            to: to.to_string(),
            departure: "On demand".to_string(),
            arrival: "—".to_string(),
            class: "Cab".to_string(),
            availability: "Pickup in ~6 mins".to_string(),
            carrier_id: None,
            carrier_name: Some("Ola".to_string()),
            price: Some(320.0),
        },
    ]
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
