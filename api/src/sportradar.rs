//! Sportradar NBA v8 wire types, deserialized straight from API responses.
//! These map to our clean domain types via the mapping functions in client.rs.
//!
//! The fallback generator builds these same types, so a mock payload always has
//! the shape of a genuine one.
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// League structure  (league/hierarchy.json, seasons/{y}/{t}/standings.json)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Conference<T> {
    pub id: Option<String>,
    pub name: Option<String>,
    pub alias: Option<String>,
    #[serde(default = "Vec::new")]
    pub divisions: Vec<Division<T>>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Division<T> {
    pub id: Option<String>,
    pub name: Option<String>,
    pub alias: Option<String>,
    #[serde(default = "Vec::new")]
    pub teams: Vec<T>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct HierarchyResponse {
    #[serde(default)]
    pub conferences: Vec<Conference<TeamEntry>>,
}

/// league/teams.json: flat list with no conference or division.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct TeamsResponse {
    #[serde(default)]
    pub teams: Vec<TeamEntry>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct TeamEntry {
    pub id: Option<String>,
    pub name: Option<String>,
    pub market: Option<String>,
    pub alias: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct SeasonInfo {
    pub year: Option<i32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct StandingsResponse {
    pub season: Option<SeasonInfo>,
    #[serde(default)]
    pub conferences: Vec<Conference<StandingsTeam>>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct StandingsTeam {
    pub id: Option<String>,
    pub name: Option<String>,
    pub market: Option<String>,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub win_pct: Option<f64>,
    pub calc_rank: Option<CalcRank>,
    /// Older payloads carry a flat rank instead of `calc_rank`.
    pub rank: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct CalcRank {
    pub conf_rank: Option<u32>,
    pub div_rank: Option<u32>,
}

// ---------------------------------------------------------------------------
// Team profile  (teams/{id}/profile.json)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct TeamProfileResponse {
    pub id: Option<String>,
    pub name: Option<String>,
    pub market: Option<String>,
    pub alias: Option<String>,
    pub conference: Option<NamedRef>,
    pub division: Option<NamedRef>,
    pub venue: Option<VenueEntry>,
    #[serde(default)]
    pub players: Vec<PlayerEntry>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct NamedRef {
    pub id: Option<String>,
    pub name: Option<String>,
    pub alias: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct VenueEntry {
    pub id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub capacity: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct PlayerEntry {
    pub id: Option<String>,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub primary_position: Option<String>,
    // Sent as "0" on some feeds and 0 on others.
    #[serde(default, deserialize_with = "string_or_number")]
    pub jersey_number: Option<String>,
    /// Inches.
    pub height: Option<u32>,
    /// Pounds.
    pub weight: Option<u32>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub experience: Option<String>,
    pub college: Option<String>,
}

// ---------------------------------------------------------------------------
// Schedule and game summary  (games/{y}/{t}/schedule.json, games/{id}/summary.json)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct ScheduleResponse {
    pub season: Option<SeasonInfo>,
    #[serde(default)]
    pub games: Vec<ScheduleGame>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct ScheduleGame {
    pub id: Option<String>,
    /// "scheduled", "inprogress", "halftime", "complete", "closed", "postponed", ...
    pub status: Option<String>,
    /// RFC 3339 tip-off time.
    pub scheduled: Option<String>,
    pub home_points: Option<u32>,
    pub away_points: Option<u32>,
    pub venue: Option<VenueEntry>,
    pub home: Option<GameTeam>,
    pub away: Option<GameTeam>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct GameTeam {
    pub id: Option<String>,
    pub name: Option<String>,
    pub market: Option<String>,
    pub alias: Option<String>,
    pub points: Option<u32>,
    #[serde(default)]
    pub scoring: Vec<PeriodEntry>,
    #[serde(default)]
    pub players: Vec<BoxPlayer>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct PeriodEntry {
    /// "quarter" or "overtime".
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub number: Option<u32>,
    pub sequence: Option<u32>,
    pub points: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct GameSummaryResponse {
    pub id: Option<String>,
    pub status: Option<String>,
    pub scheduled: Option<String>,
    pub quarter: Option<u32>,
    pub clock: Option<String>,
    pub venue: Option<VenueEntry>,
    pub home: Option<GameTeam>,
    pub away: Option<GameTeam>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct BoxPlayer {
    pub id: Option<String>,
    pub full_name: Option<String>,
    pub position: Option<String>,
    pub primary_position: Option<String>,
    pub starter: Option<bool>,
    pub statistics: Option<PlayerStatistics>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct PlayerStatistics {
    pub minutes: Option<String>,
    pub points: Option<u32>,
    pub rebounds: Option<u32>,
    pub assists: Option<u32>,
}

// ---------------------------------------------------------------------------
// League leaders  (seasons/{y}/{t}/leaders.json)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct LeadersResponse {
    pub season: Option<SeasonInfo>,
    #[serde(default)]
    pub categories: Vec<LeaderCategoryEntry>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct LeaderCategoryEntry {
    pub name: Option<String>,
    /// "average" or "total".
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub ranks: Vec<LeaderRank>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct LeaderRank {
    pub rank: Option<u32>,
    pub tied: Option<bool>,
    pub score: Option<f64>,
    pub player: Option<LeaderPlayer>,
    #[serde(default)]
    pub teams: Vec<TeamEntry>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct LeaderPlayer {
    pub id: Option<String>,
    pub full_name: Option<String>,
    pub position: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
