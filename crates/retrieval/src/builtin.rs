use yatri_core::{LocalCorpusItem, SourceKind};

const DESTINATIONS: [(&str, &str, &str); 12] = [
    (
        "Victoria Memorial",
        "Iconic white marble monument built in memory of Queen Victoria, featuring a museum with rare artifacts and beautiful gardens",
        "heritage",
    ),
    (
        "Howrah Bridge",
        "The iconic cantilever bridge over the Hooghly River, a symbol of Kolkata connecting the city to Howrah",
        "heritage",
    ),
    (
        "Dakshineswar Kali Temple",
        "Famous Hindu temple dedicated to Goddess Kali, associated with Saint Ramakrishna Paramhansa",
        "temples",
    ),
    (
        "Kumartuli",
        "The famous potter's quarter where artisans create stunning clay idols for Durga Puja and other festivals",
        "culture",
    ),
    (
        "College Street",
        "Asia's largest second-hand book market, surrounded by educational institutions and the iconic Indian Coffee House",
        "literature",
    ),
    (
        "Princep Ghat",
        "Beautiful riverside ghat with Palladian architecture, perfect for evening walks and boat rides on the Hooghly",
        "heritage",
    ),
    (
        "Marble Palace",
        "A 19th-century palatial mansion with an exquisite collection of art, antiques, and rare marble sculptures",
        "heritage",
    ),
    (
        "Park Street",
        "The iconic party street of Kolkata, famous for restaurants, nightlife, and Christmas celebrations",
        "food",
    ),
    (
        "Kalighat Temple",
        "One of the 51 Shakti Peethas, an ancient Hindu temple dedicated to Goddess Kali",
        "temples",
    ),
    (
        "Indian Museum",
        "The oldest and largest museum in India, housing rare antiques, fossils, armor, and Mughal paintings",
        "culture",
    ),
    (
        "New Market (Hogg Market)",
        "Kolkata's iconic Victorian-era market selling everything from clothes to spices since 1874",
        "markets",
    ),
    (
        "Jorasanko Thakur Bari",
        "The ancestral home of Nobel Laureate Rabindranath Tagore, now a museum and university",
        "literature",
    ),
];

const ITINERARIES: [(&str, &str); 3] = [
    (
        "Colonial Heritage Walk",
        "1 day(s) • ₹2,500 • Victoria Memorial Tour, Howrah Bridge Walk, St. Paul's Cathedral, Writer's Building",
    ),
    (
        "Durga Puja Special",
        "2 day(s) • ₹8,500 • Kumartuli Artisan Visit, Top 20 Pandal Hopping, Dhunuchi Naach, Bhog Prasad Experience",
    ),
    (
        "Literary & Culinary Kolkata",
        "1 day(s) • ₹3,500 • College Street Book Hunt, Coffee House Adda, Park Street Food Walk, Mishti Doi Tasting",
    ),
];

const GUIDES: [(&str, &str); 5] = [
    (
        "Subhojit Chatterjee",
        "Heritage Walks, Photography Tours, Colonial History • ₹2,500/day • English, Hindi, Bengali",
    ),
    (
        "Dipanwita Roy",
        "Durga Puja Tours, Art & Culture, Food Walks • ₹3,000/day • English, Bengali, French",
    ),
    (
        "Arnab Mukherjee",
        "Literary Tours, Coffee House History, College Street • ₹2,000/day • English, Hindi, Bengali",
    ),
    (
        "Rima Sen",
        "Tram Heritage, Street Food, Night Photography • ₹2,800/day • English, Bengali, German",
    ),
    (
        "Sourav Ghosh",
        "Kumartuli Tours, Artisan Workshops, Idol Making • ₹2,200/day • English, Hindi, Bengali",
    ),
];

pub(crate) fn kolkata_catalogue() -> Vec<LocalCorpusItem> {
    let mut items = Vec::new();

    for (title, body, category) in DESTINATIONS {
        items.push(item(title, body, category, SourceKind::Destination));
    }
    for (title, body) in ITINERARIES {
        items.push(item(title, body, "itinerary", SourceKind::Itinerary));
    }
    for (title, body) in GUIDES {
        items.push(item(title, body, "guide", SourceKind::Guide));
    }

    items
}

fn item(title: &str, body: &str, category: &str, kind: SourceKind) -> LocalCorpusItem {
    LocalCorpusItem {
        title: title.to_string(),
        body: body.to_string(),
        category: category.to_string(),
        kind,
    }
}
