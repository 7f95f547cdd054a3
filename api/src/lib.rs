pub mod cache;
pub mod client;
pub mod fallback;
pub mod prediction;
pub mod sportradar;
pub mod teams;

use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// View models: flat and render-ready, independent of the Sportradar wire format.
// Every field has a concrete value; missing upstream data becomes "", 0 or
// "N/A" during mapping.
// ---------------------------------------------------------------------------

/// Placeholder for conference/division when the upstream endpoint omits them.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub id: String,
    pub name: String,
    pub market: String,
    pub full_name: String,
    pub alias: String,
    pub conference: String,
    pub division: String,
    pub logo_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    Scheduled,
    Live,
    Final,
    /// Upstream status with no display mapping, shown verbatim.
    Other(String),
}

impl GameStatus {
    pub fn from_upstream(raw: &str) -> Self {
        match raw {
            "scheduled" => GameStatus::Scheduled,
            "inprogress" => GameStatus::Live,
            "closed" => GameStatus::Final,
            other => GameStatus::Other(other.to_owned()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            GameStatus::Scheduled => "Scheduled",
            GameStatus::Live => "Live",
            GameStatus::Final => "Final",
            GameStatus::Other(raw) => raw,
        }
    }

    pub fn is_final(&self) -> bool {
        *self == GameStatus::Final
    }
}

impl Serialize for GameStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One side of a game as shown on the scores page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamLine {
    pub id: String,
    pub name: String,
    pub alias: String,
    pub logo_url: String,
    pub score: u32,
    pub won: bool,
    pub periods: Vec<PeriodScore>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PeriodScore {
    pub label: String,
    pub points: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: String,
    pub date: String, // "3/14/2025"
    pub time: String, // "7:30 PM"
    pub status: GameStatus,
    pub home: TeamLine,
    pub away: TeamLine,
    pub venue: String,
    pub location: String, // "Boston, MA"
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Venue {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub capacity: u32,
}

impl Venue {
    pub fn unknown() -> Self {
        Self { name: "Unknown Venue".into(), ..Self::default() }
    }

    pub fn location(&self) -> String {
        match (self.city.is_empty(), self.state.is_empty()) {
            (false, false) => format!("{}, {}", self.city, self.state),
            (false, true) => self.city.clone(),
            (true, false) => self.state.clone(),
            (true, true) => String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Standing {
    pub rank: Option<u32>, // conference rank
    pub won: u32,
    pub lost: u32,
    pub win_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerRecord {
    pub id: String,
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub jersey_number: String,
    pub height: u32, // inches
    pub weight: u32, // pounds
    pub experience: String,
    pub college: String,
}

impl PlayerRecord {
    /// 79 -> `6'7"`; empty when unknown.
    pub fn height_display(&self) -> String {
        if self.height == 0 {
            return String::new();
        }
        format!("{}'{}\"", self.height / 12, self.height % 12)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamProfile {
    pub id: String,
    pub market: String,
    pub name: String,
    pub full_name: String,
    pub alias: String,
    pub conference: String,
    pub division: String,
    pub logo_url: String,
    pub venue: Venue,
    pub roster: Vec<PlayerRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standing: Option<Standing>,
}

/// Single-game box score fetched on demand for the game page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameDetail {
    pub id: String,
    pub status: GameStatus,
    pub date: String,
    pub time: String,
    pub quarter: Option<u32>,
    pub clock: String,
    pub venue: Venue,
    pub home: BoxScore,
    pub away: BoxScore,
}

impl GameDetail {
    pub fn title(&self) -> String {
        format!("{} @ {}", self.away.team.name, self.home.team.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoxScore {
    pub team: TeamLine,
    pub players: Vec<PlayerLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerLine {
    pub name: String,
    pub position: String,
    pub starter: bool,
    pub minutes: String, // "34:12"
    pub points: u32,
    pub rebounds: u32,
    pub assists: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeagueLeaders {
    pub season: String, // "2024 REG"
    pub categories: Vec<LeaderCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeaderCategory {
    pub name: String,
    pub kind: String, // "average" | "total"
    pub leaders: Vec<Leader>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Leader {
    pub rank: u32,
    pub player: String,
    pub position: String,
    pub team: String,
    pub score: f64,
}
