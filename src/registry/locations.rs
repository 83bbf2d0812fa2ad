use serde::Serialize;

use crate::core::slug::{city_matches, slugify, title_case};

/// A state (or DC) with its major cities
#[derive(Debug, Clone, Serialize)]
pub struct StateInfo {
    pub slug: String,
    pub name: String,
    pub abbr: String,
    pub major_cities: Vec<String>,
}

impl StateInfo {
    /// Stand-in for a path segment that names no registered state
    pub fn unregistered(segment: &str) -> Self {
        Self {
            slug: segment.to_lowercase(),
            name: title_case(segment),
            abbr: segment.to_uppercase(),
            major_cities: Vec::new(),
        }
    }

    /// Display name of a major city matching the segment, if any
    pub fn find_city(&self, segment: &str) -> Option<&str> {
        self.major_cities
            .iter()
            .find(|city| city_matches(city, segment))
            .map(String::as_str)
    }
}

/// Extended SEO metadata for a configured city
#[derive(Debug, Clone, Serialize)]
pub struct CityInfo {
    pub state_slug: String,
    pub slug: String,
    pub name: String,
    pub population: String,
    pub description: String,
    pub focus_areas: Vec<String>,
    pub is_anchor: bool,
}

/// Flattened city route used by listings and sitemaps
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityRoute {
    pub state_slug: String,
    pub state_name: String,
    pub state_abbr: String,
    pub city_slug: String,
    pub city_name: String,
}

impl CityRoute {
    pub fn path(&self) -> String {
        format!("/premarital-counseling/{}/{}", self.state_slug, self.city_slug)
    }
}

/// Static state -> city registry
///
/// Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct LocationRegistry {
    states: Vec<StateInfo>,
    cities: Vec<CityInfo>,
}

impl LocationRegistry {
    pub fn new(states: Vec<StateInfo>, cities: Vec<CityInfo>) -> Self {
        Self { states, cities }
    }

    /// Registry with the built-in 50 states plus DC
    pub fn builtin() -> Self {
        let states = STATES
            .iter()
            .map(|(slug, name, abbr, cities)| StateInfo {
                slug: slug.to_string(),
                name: name.to_string(),
                abbr: abbr.to_string(),
                major_cities: cities.iter().map(|c| c.to_string()).collect(),
            })
            .collect();

        let cities = CITIES
            .iter()
            .map(|(state_slug, slug, name, population, description, focus, anchor)| CityInfo {
                state_slug: state_slug.to_string(),
                slug: slug.to_string(),
                name: name.to_string(),
                population: population.to_string(),
                description: description.to_string(),
                focus_areas: focus.iter().map(|f| f.to_string()).collect(),
                is_anchor: *anchor,
            })
            .collect();

        Self::new(states, cities)
    }

    pub fn states(&self) -> &[StateInfo] {
        &self.states
    }

    pub fn state(&self, slug: &str) -> Option<&StateInfo> {
        self.states.iter().find(|s| s.slug == slug)
    }

    pub fn state_by_abbr(&self, abbr: &str) -> Option<&StateInfo> {
        self.states.iter().find(|s| s.abbr.eq_ignore_ascii_case(abbr))
    }

    /// Known major city in a state matching a path segment
    pub fn find_city(&self, state_slug: &str, segment: &str) -> Option<&str> {
        self.state(state_slug)?.find_city(segment)
    }

    pub fn city_info(&self, state_slug: &str, city_slug: &str) -> Option<&CityInfo> {
        self.cities
            .iter()
            .find(|c| c.state_slug == state_slug && c.slug == city_slug)
    }

    pub fn is_anchor_city(&self, state_slug: &str, city_slug: &str) -> bool {
        self.city_info(state_slug, city_slug)
            .map(|c| c.is_anchor)
            .unwrap_or(false)
    }

    pub fn anchor_cities(&self) -> impl Iterator<Item = &CityInfo> {
        self.cities.iter().filter(|c| c.is_anchor)
    }

    /// Display name for a city segment: configured name, major city, or title case
    pub fn city_display_name(&self, state_slug: &str, segment: &str) -> String {
        if let Some(info) = self.city_info(state_slug, segment) {
            return info.name.clone();
        }
        self.find_city(state_slug, segment)
            .map(str::to_string)
            .unwrap_or_else(|| title_case(segment))
    }

    pub fn city_routes(&self, state_slug: &str) -> Vec<CityRoute> {
        let Some(state) = self.state(state_slug) else {
            return Vec::new();
        };

        state
            .major_cities
            .iter()
            .map(|city| CityRoute {
                state_slug: state.slug.clone(),
                state_name: state.name.clone(),
                state_abbr: state.abbr.clone(),
                city_slug: slugify(city),
                city_name: city.clone(),
            })
            .collect()
    }
}

type StateRow = (&'static str, &'static str, &'static str, &'static [&'static str]);

const STATES: &[StateRow] = &[
    ("alabama", "Alabama", "AL", &["Birmingham", "Montgomery", "Mobile", "Huntsville", "Tuscaloosa"]),
    ("alaska", "Alaska", "AK", &["Anchorage", "Fairbanks", "Juneau", "Sitka"]),
    ("arizona", "Arizona", "AZ", &["Phoenix", "Tucson", "Mesa", "Chandler", "Scottsdale", "Tempe"]),
    ("arkansas", "Arkansas", "AR", &["Little Rock", "Fort Smith", "Fayetteville", "Springdale"]),
    ("california", "California", "CA", &["Los Angeles", "San Francisco", "San Diego", "Sacramento", "San Jose", "Oakland", "Fresno", "Long Beach"]),
    ("colorado", "Colorado", "CO", &["Denver", "Colorado Springs", "Aurora", "Fort Collins", "Lakewood", "Thornton"]),
    ("connecticut", "Connecticut", "CT", &["Hartford", "Bridgeport", "New Haven", "Stamford", "Waterbury"]),
    ("delaware", "Delaware", "DE", &["Wilmington", "Dover", "Newark", "Middletown"]),
    ("florida", "Florida", "FL", &["Miami", "Orlando", "Tampa", "Jacksonville", "Fort Lauderdale", "Tallahassee", "St. Petersburg"]),
    ("georgia", "Georgia", "GA", &["Atlanta", "Augusta", "Columbus", "Savannah", "Athens", "Sandy Springs"]),
    ("hawaii", "Hawaii", "HI", &["Honolulu", "Hilo", "Kailua", "Kaneohe"]),
    ("idaho", "Idaho", "ID", &["Boise", "Meridian", "Nampa", "Idaho Falls", "Pocatello"]),
    ("illinois", "Illinois", "IL", &["Chicago", "Aurora", "Peoria", "Rockford", "Joliet", "Naperville"]),
    ("indiana", "Indiana", "IN", &["Indianapolis", "Fort Wayne", "Evansville", "South Bend", "Carmel"]),
    ("iowa", "Iowa", "IA", &["Des Moines", "Cedar Rapids", "Davenport", "Sioux City", "Iowa City"]),
    ("kansas", "Kansas", "KS", &["Wichita", "Overland Park", "Kansas City", "Olathe", "Topeka"]),
    ("kentucky", "Kentucky", "KY", &["Louisville", "Lexington", "Bowling Green", "Owensboro"]),
    ("louisiana", "Louisiana", "LA", &["New Orleans", "Baton Rouge", "Shreveport", "Lafayette"]),
    ("maine", "Maine", "ME", &["Portland", "Lewiston", "Bangor", "South Portland"]),
    ("maryland", "Maryland", "MD", &["Baltimore", "Frederick", "Rockville", "Gaithersburg", "Annapolis"]),
    ("massachusetts", "Massachusetts", "MA", &["Boston", "Worcester", "Springfield", "Cambridge", "Lowell"]),
    ("michigan", "Michigan", "MI", &["Detroit", "Grand Rapids", "Warren", "Sterling Heights", "Ann Arbor"]),
    ("minnesota", "Minnesota", "MN", &["Minneapolis", "Saint Paul", "Rochester", "Duluth", "Plymouth"]),
    ("mississippi", "Mississippi", "MS", &["Jackson", "Gulfport", "Southaven", "Hattiesburg"]),
    ("missouri", "Missouri", "MO", &["Kansas City", "Saint Louis", "Springfield", "Columbia", "Independence"]),
    ("montana", "Montana", "MT", &["Billings", "Missoula", "Great Falls", "Bozeman"]),
    ("nebraska", "Nebraska", "NE", &["Omaha", "Lincoln", "Bellevue", "Grand Island"]),
    ("nevada", "Nevada", "NV", &["Las Vegas", "Henderson", "Reno", "North Las Vegas"]),
    ("new-hampshire", "New Hampshire", "NH", &["Manchester", "Nashua", "Concord", "Derry"]),
    ("new-jersey", "New Jersey", "NJ", &["Newark", "Jersey City", "Paterson", "Elizabeth", "Edison"]),
    ("new-mexico", "New Mexico", "NM", &["Albuquerque", "Las Cruces", "Rio Rancho", "Santa Fe"]),
    ("new-york", "New York", "NY", &["New York", "Buffalo", "Rochester", "Yonkers", "Syracuse", "Albany"]),
    ("north-carolina", "North Carolina", "NC", &["Charlotte", "Raleigh", "Greensboro", "Durham", "Winston-Salem"]),
    ("north-dakota", "North Dakota", "ND", &["Fargo", "Bismarck", "Grand Forks", "Minot"]),
    ("ohio", "Ohio", "OH", &["Columbus", "Cleveland", "Cincinnati", "Toledo", "Akron", "Dayton"]),
    ("oklahoma", "Oklahoma", "OK", &["Oklahoma City", "Tulsa", "Norman", "Broken Arrow"]),
    ("oregon", "Oregon", "OR", &["Portland", "Salem", "Eugene", "Gresham", "Hillsboro"]),
    ("pennsylvania", "Pennsylvania", "PA", &["Philadelphia", "Pittsburgh", "Allentown", "Erie", "Reading"]),
    ("rhode-island", "Rhode Island", "RI", &["Providence", "Warwick", "Cranston", "Pawtucket"]),
    ("south-carolina", "South Carolina", "SC", &["Charleston", "Columbia", "North Charleston", "Mount Pleasant"]),
    ("south-dakota", "South Dakota", "SD", &["Sioux Falls", "Rapid City", "Aberdeen", "Brookings"]),
    ("tennessee", "Tennessee", "TN", &["Nashville", "Memphis", "Knoxville", "Chattanooga", "Clarksville"]),
    ("texas", "Texas", "TX", &["Houston", "San Antonio", "Dallas", "Austin", "Fort Worth", "El Paso", "Arlington", "Corpus Christi"]),
    ("utah", "Utah", "UT", &["Salt Lake City", "West Valley City", "Provo", "West Jordan", "Orem"]),
    ("vermont", "Vermont", "VT", &["Burlington", "South Burlington", "Rutland", "Barre"]),
    ("virginia", "Virginia", "VA", &["Virginia Beach", "Norfolk", "Chesapeake", "Richmond", "Newport News"]),
    ("washington", "Washington", "WA", &["Seattle", "Spokane", "Tacoma", "Vancouver", "Bellevue"]),
    ("washington-dc", "Washington, DC", "DC", &["Capitol Hill", "Georgetown", "Dupont Circle", "Adams Morgan"]),
    ("west-virginia", "West Virginia", "WV", &["Charleston", "Huntington", "Morgantown", "Parkersburg"]),
    ("wisconsin", "Wisconsin", "WI", &["Milwaukee", "Madison", "Green Bay", "Kenosha", "Racine"]),
    ("wyoming", "Wyoming", "WY", &["Cheyenne", "Casper", "Laramie", "Gillette"]),
];

type CityRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static [&'static str],
    bool,
);

const CITIES: &[CityRow] = &[
    ("texas", "austin", "Austin", "978,908",
        "Austin, the vibrant capital of Texas, offers excellent premarital counseling services.",
        &["LGBTQ+ friendly counseling", "Tech industry professionals", "University counseling"], true),
    ("texas", "dallas", "Dallas", "1,304,379",
        "Dallas provides comprehensive marriage preparation services for couples.",
        &["Business professional counseling", "Multicultural counseling", "Financial planning focus"], true),
    ("texas", "houston", "Houston", "2,304,580",
        "Houston's diverse counseling community serves couples from all backgrounds.",
        &["International couples", "Medical professional counseling", "Bilingual services"], true),
    ("texas", "san-antonio", "San Antonio", "1,434,625",
        "San Antonio offers culturally rich premarital counseling experiences.",
        &["Hispanic/Latino counseling", "Military couples", "Traditional values focus"], false),
    ("california", "los-angeles", "Los Angeles", "3,898,747",
        "LA provides world-class premarital counseling in multiple languages.",
        &["Entertainment industry professionals", "Multicultural counseling", "LGBTQ+ affirming"], true),
    ("california", "san-francisco", "San Francisco", "873,965",
        "San Francisco offers progressive and inclusive marriage preparation services.",
        &["Tech professionals", "LGBTQ+ specialized", "High-net-worth counseling"], true),
    ("california", "san-diego", "San Diego", "1,386,932",
        "San Diego combines beach-town relaxation with professional counseling excellence.",
        &["Military couples", "Outdoor therapy options", "Cross-border relationships"], false),
    ("new-york", "new-york", "New York City", "8,336,817",
        "NYC offers the most diverse selection of premarital counseling professionals.",
        &["Financial district professionals", "International couples", "All cultural backgrounds"], true),
    ("new-york", "buffalo", "Buffalo", "278,349",
        "Buffalo provides warm, community-focused premarital counseling services.",
        &["Blue-collar professionals", "Traditional counseling", "Family-centered approach"], false),
    ("florida", "miami", "Miami", "442,241",
        "Miami offers bilingual and culturally diverse premarital counseling.",
        &["Latin American couples", "Bilingual counseling", "International relationships"], true),
    ("florida", "orlando", "Orlando", "307,573",
        "Orlando provides family-friendly premarital counseling services.",
        &["Tourism industry professionals", "Theme park workers", "Young families"], false),
    ("illinois", "chicago", "Chicago", "2,746,388",
        "Chicago offers a rich tradition of marriage preparation services across diverse communities.",
        &["Urban professionals", "Diverse religious traditions", "Multicultural counseling"], true),
    ("georgia", "atlanta", "Atlanta", "498,715",
        "Atlanta provides southern hospitality with modern premarital counseling approaches.",
        &["African American counseling", "Business professionals", "Faith-based counseling"], true),
    ("colorado", "denver", "Denver", "715,522",
        "Denver combines outdoor lifestyle with holistic marriage preparation services.",
        &["Active lifestyle couples", "Holistic approaches", "Young professionals"], true),
];
