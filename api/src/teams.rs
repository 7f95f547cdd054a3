//! Static directory of the thirty NBA franchises.
//!
//! Used for logo resolution and as the seed for fallback data when the
//! upstream API is unavailable.

pub const EASTERN: &str = "Eastern Conference";
pub const WESTERN: &str = "Western Conference";

const NBA_LOGO_BASE: &str = "https://cdn.nba.com/logos/nba";
const ESPN_LOGO_BASE: &str = "https://a.espncdn.com/combiner/i?img=/i/teamlogos/nba/500";
pub const FALLBACK_LOGO: &str = "https://cdn.nba.com/logos/nba/fallback-team-logo.png";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamInfo {
    /// Sportradar team id.
    pub id: &'static str,
    /// NBA.com team id, used for logo URLs.
    pub nba_id: &'static str,
    pub market: &'static str,
    pub name: &'static str,
    pub alias: &'static str,
    pub conference: &'static str,
    pub division: &'static str,
    pub arena: ArenaInfo,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaInfo {
    pub name: &'static str,
    pub address: &'static str,
    pub city: &'static str,
    pub state: &'static str,
    pub capacity: u32,
}

impl TeamInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.market, self.name)
    }

    /// "boston-celtics"
    pub fn slug(&self) -> String {
        slugify(&self.full_name())
    }

    pub fn logo_url(&self) -> String {
        nba_logo(self.nba_id)
    }
}

macro_rules! team {
    ($id:literal, $nba:literal, $market:literal, $name:literal, $alias:literal,
     $conf:ident, $div:literal, $arena:literal, $addr:literal, $city:literal,
     $state:literal, $cap:literal) => {
        TeamInfo {
            id: concat!($id, "-fb46-11e1-82cb-f4ce4684ea4c"),
            nba_id: $nba,
            market: $market,
            name: $name,
            alias: $alias,
            conference: $conf,
            division: $div,
            arena: ArenaInfo {
                name: $arena,
                address: $addr,
                city: $city,
                state: $state,
                capacity: $cap,
            },
        }
    };
}

#[rustfmt::skip]
static TEAMS: [TeamInfo; 30] = [
    // Eastern Conference
    team!("583eca2f", "1610612738", "Boston", "Celtics", "BOS", EASTERN, "Atlantic", "TD Garden", "100 Legends Way", "Boston", "MA", 19156),
    team!("583ecda6", "1610612751", "Brooklyn", "Nets", "BKN", EASTERN, "Atlantic", "Barclays Center", "620 Atlantic Ave", "Brooklyn", "NY", 17732),
    team!("583ec70e", "1610612752", "New York", "Knicks", "NYK", EASTERN, "Atlantic", "Madison Square Garden", "4 Pennsylvania Plaza", "New York", "NY", 19812),
    team!("583ec87d", "1610612755", "Philadelphia", "76ers", "PHI", EASTERN, "Atlantic", "Wells Fargo Center", "3601 S Broad St", "Philadelphia", "PA", 20478),
    team!("583ecf50", "1610612761", "Toronto", "Raptors", "TOR", EASTERN, "Atlantic", "Scotiabank Arena", "40 Bay St", "Toronto", "ON", 19800),
    team!("583ec5fd", "1610612741", "Chicago", "Bulls", "CHI", EASTERN, "Central", "United Center", "1901 W Madison St", "Chicago", "IL", 20917),
    team!("583ec773", "1610612739", "Cleveland", "Cavaliers", "CLE", EASTERN, "Central", "Rocket Mortgage FieldHouse", "1 Center Court", "Cleveland", "OH", 19432),
    team!("583ec928", "1610612765", "Detroit", "Pistons", "DET", EASTERN, "Central", "Little Caesars Arena", "2645 Woodward Ave", "Detroit", "MI", 20332),
    team!("583ec7cd", "1610612754", "Indiana", "Pacers", "IND", EASTERN, "Central", "Gainbridge Fieldhouse", "125 S Pennsylvania St", "Indianapolis", "IN", 17923),
    team!("583ecefd", "1610612749", "Milwaukee", "Bucks", "MIL", EASTERN, "Central", "Fiserv Forum", "1111 Vel R. Phillips Ave", "Milwaukee", "WI", 17341),
    team!("583ecb8f", "1610612737", "Atlanta", "Hawks", "ATL", EASTERN, "Southeast", "State Farm Arena", "1 State Farm Dr", "Atlanta", "GA", 18118),
    team!("583ec97e", "1610612766", "Charlotte", "Hornets", "CHA", EASTERN, "Southeast", "Spectrum Center", "333 East Trade St", "Charlotte", "NC", 19077),
    team!("583ecea6", "1610612748", "Miami", "Heat", "MIA", EASTERN, "Southeast", "Kaseya Center", "601 Biscayne Blvd", "Miami", "FL", 19600),
    team!("583ed157", "1610612753", "Orlando", "Magic", "ORL", EASTERN, "Southeast", "Kia Center", "400 W Church St", "Orlando", "FL", 18846),
    team!("583ec8d4", "1610612764", "Washington", "Wizards", "WAS", EASTERN, "Southeast", "Capital One Arena", "601 F St NW", "Washington", "DC", 20356),
    // Western Conference
    team!("583eca88", "1610612743", "Denver", "Nuggets", "DEN", WESTERN, "Northwest", "Ball Arena", "1000 Chopper Cir", "Denver", "CO", 19520),
    team!("583ece50", "1610612750", "Minnesota", "Timberwolves", "MIN", WESTERN, "Northwest", "Target Center", "600 First Ave N", "Minneapolis", "MN", 18978),
    team!("583ecfff", "1610612760", "Oklahoma City", "Thunder", "OKC", WESTERN, "Northwest", "Paycom Center", "100 W Reno Ave", "Oklahoma City", "OK", 18203),
    team!("583ed056", "1610612757", "Portland", "Trail Blazers", "POR", WESTERN, "Northwest", "Moda Center", "1 N Center Court St", "Portland", "OR", 19441),
    team!("583ece0a", "1610612762", "Utah", "Jazz", "UTA", WESTERN, "Northwest", "Delta Center", "301 W South Temple", "Salt Lake City", "UT", 18306),
    team!("583ec825", "1610612744", "Golden State", "Warriors", "GSW", WESTERN, "Pacific", "Chase Center", "1 Warriors Way", "San Francisco", "CA", 18064),
    team!("583ecdfb", "1610612746", "LA", "Clippers", "LAC", WESTERN, "Pacific", "Intuit Dome", "3900 W Manchester Blvd", "Inglewood", "CA", 18000),
    team!("583ecae2", "1610612747", "Los Angeles", "Lakers", "LAL", WESTERN, "Pacific", "Crypto.com Arena", "1111 S Figueroa St", "Los Angeles", "CA", 19060),
    team!("583ecfa8", "1610612756", "Phoenix", "Suns", "PHX", WESTERN, "Pacific", "Footprint Center", "201 E Jefferson St", "Phoenix", "AZ", 17071),
    team!("583ed0ac", "1610612758", "Sacramento", "Kings", "SAC", WESTERN, "Pacific", "Golden 1 Center", "500 David J Stern Walk", "Sacramento", "CA", 17608),
    team!("583ecf1e", "1610612742", "Dallas", "Mavericks", "DAL", WESTERN, "Southwest", "American Airlines Center", "2500 Victory Avenue", "Dallas", "TX", 19200),
    team!("583ecb3a", "1610612745", "Houston", "Rockets", "HOU", WESTERN, "Southwest", "Toyota Center", "1510 Polk St", "Houston", "TX", 18055),
    team!("583ed102", "1610612763", "Memphis", "Grizzlies", "MEM", WESTERN, "Southwest", "FedExForum", "191 Beale St", "Memphis", "TN", 17794),
    team!("583ecc9a", "1610612740", "New Orleans", "Pelicans", "NOP", WESTERN, "Southwest", "Smoothie King Center", "1501 Dave Dixon Dr", "New Orleans", "LA", 16867),
    team!("583ecd4f", "1610612759", "San Antonio", "Spurs", "SAS", WESTERN, "Southwest", "Frost Bank Center", "1 AT&T Center Pkwy", "San Antonio", "TX", 18418),
];

pub fn all() -> &'static [TeamInfo] {
    &TEAMS
}

/// Used when a lookup misses and some team has to stand in.
pub fn default_team() -> &'static TeamInfo {
    &TEAMS[0]
}

pub fn by_id(id: &str) -> Option<&'static TeamInfo> {
    TEAMS.iter().find(|t| t.id == id)
}

pub fn by_full_name(full_name: &str) -> Option<&'static TeamInfo> {
    TEAMS
        .iter()
        .find(|t| t.full_name().eq_ignore_ascii_case(full_name.trim()))
}

/// Look up by Sportradar id, then by slug ("boston-celtics"), then by full name.
pub fn find(key: &str) -> Option<&'static TeamInfo> {
    by_id(key)
        .or_else(|| TEAMS.iter().find(|t| t.slug() == key))
        .or_else(|| by_full_name(key))
}

/// Division names of a conference, in directory order.
pub fn divisions_of(conference: &str) -> Vec<&'static str> {
    let mut divisions: Vec<&'static str> = Vec::new();
    for team in TEAMS.iter().filter(|t| t.conference == conference) {
        if !divisions.contains(&team.division) {
            divisions.push(team.division);
        }
    }
    divisions
}

/// Best logo for a team: NBA.com by Sportradar id, then by name, then an
/// ESPN URL derived from the name, then a generic placeholder.
pub fn best_logo_url(team_id: &str, full_name: &str) -> String {
    if let Some(team) = by_id(team_id) {
        return team.logo_url();
    }
    if full_name.trim().is_empty() {
        return FALLBACK_LOGO.to_owned();
    }
    match by_full_name(full_name) {
        Some(team) => team.logo_url(),
        None => format!("{ESPN_LOGO_BASE}/{}.png", slugify(full_name)),
    }
}

fn nba_logo(nba_id: &str) -> String {
    format!("{NBA_LOGO_BASE}/{nba_id}/global/L/logo.svg")
}

fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
