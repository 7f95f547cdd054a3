//! Substitute payloads used when the upstream API cannot be reached.
//!
//! Every generator returns the same wire types the client deserializes real
//! responses into, so the mapping code never needs to know where data came
//! from. Statistics are re-rolled on every call.

use crate::sportradar::{
    CalcRank, Conference, Division, NamedRef, PlayerEntry, SeasonInfo, StandingsResponse,
    StandingsTeam, TeamProfileResponse, VenueEntry,
};
use crate::teams::{self, TeamInfo, EASTERN, WESTERN};
use crate::TeamRecord;
use rand::Rng;

pub const GAMES_PER_SEASON: u32 = 82;
pub const ROSTER_SIZE: usize = 15;

const POSITIONS: [&str; 5] = ["G", "F", "C", "F-C", "G-F"];
const FIRST_NAMES: [&str; 10] = [
    "James", "Michael", "Kevin", "John", "David", "Chris", "Anthony", "Stephen", "Luka", "Nikola",
];
const LAST_NAMES: [&str; 10] = [
    "Smith", "Johnson", "Brown", "Williams", "Jones", "Davis", "Miller", "Wilson", "Moore",
    "Taylor",
];

/// A generated profile together with the standings row it would have had.
#[derive(Debug, Clone)]
pub struct MockProfile {
    pub profile: TeamProfileResponse,
    pub standing: StandingsTeam,
}

/// All thirty teams with conference and division filled in.
pub fn mock_teams() -> Vec<TeamRecord> {
    teams::all()
        .iter()
        .map(|t| TeamRecord {
            id: t.id.to_owned(),
            name: t.name.to_owned(),
            market: t.market.to_owned(),
            full_name: t.full_name(),
            alias: t.alias.to_owned(),
            conference: t.conference.to_owned(),
            division: t.division.to_owned(),
            logo_url: t.logo_url(),
        })
        .collect()
}

/// Standings for every team, laid out conference -> division -> team.
pub fn mock_standings() -> StandingsResponse {
    let mut rng = rand::rng();
    let conferences = [EASTERN, WESTERN]
        .into_iter()
        .map(|conference| Conference {
            id: None,
            name: Some(conference.to_owned()),
            alias: None,
            divisions: teams::divisions_of(conference)
                .into_iter()
                .map(|division| Division {
                    id: None,
                    name: Some(division.to_owned()),
                    alias: None,
                    teams: teams::all()
                        .iter()
                        .filter(|t| t.conference == conference && t.division == division)
                        .map(|t| standings_row(t, rng.random_range(10..70), &mut rng))
                        .collect(),
                })
                .collect(),
        })
        .collect();

    StandingsResponse {
        season: Some(SeasonInfo { year: None, kind: Some("REG".into()) }),
        conferences,
    }
}

/// Profile, roster and standing for `team_id` (Sportradar id, slug or full
/// name). Unknown ids get the first team in the directory.
pub fn mock_team_profile(team_id: &str) -> MockProfile {
    let team = teams::find(team_id).unwrap_or_else(teams::default_team);
    let mut rng = rand::rng();

    let profile = TeamProfileResponse {
        id: Some(team.id.to_owned()),
        name: Some(team.name.to_owned()),
        market: Some(team.market.to_owned()),
        alias: Some(team.alias.to_owned()),
        conference: Some(NamedRef {
            id: None,
            name: Some(team.conference.to_owned()),
            alias: None,
        }),
        division: Some(NamedRef { id: None, name: Some(team.division.to_owned()), alias: None }),
        venue: Some(VenueEntry {
            id: None,
            name: Some(team.arena.name.to_owned()),
            address: Some(team.arena.address.to_owned()),
            city: Some(team.arena.city.to_owned()),
            state: Some(team.arena.state.to_owned()),
            capacity: Some(team.arena.capacity),
        }),
        players: mock_players(ROSTER_SIZE, &team.full_name()),
    };
    let standing = standings_row(team, rng.random_range(15..70), &mut rng);

    MockProfile { profile, standing }
}

pub fn mock_players(count: usize, team_name: &str) -> Vec<PlayerEntry> {
    let mut rng = rand::rng();
    let team_slug = team_name.split_whitespace().collect::<Vec<_>>().join("-").to_lowercase();

    (0..count)
        .map(|i| {
            let first = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
            let last = LAST_NAMES[rng.random_range(0..LAST_NAMES.len())];
            let position = POSITIONS[rng.random_range(0..POSITIONS.len())];
            PlayerEntry {
                id: Some(format!("player-{i}-{team_slug}")),
                full_name: Some(format!("{first} {last}")),
                first_name: Some(first.to_owned()),
                last_name: Some(last.to_owned()),
                position: Some(position.to_owned()),
                primary_position: None,
                jersey_number: Some(rng.random_range(1..=50u32).to_string()),
                height: Some(rng.random_range(72..88)),
                weight: Some(rng.random_range(180..260)),
                experience: Some(rng.random_range(0..15u32).to_string()),
                college: None,
            }
        })
        .collect()
}

fn standings_row(team: &TeamInfo, wins: u32, rng: &mut impl Rng) -> StandingsTeam {
    let losses = GAMES_PER_SEASON - wins;
    StandingsTeam {
        id: Some(team.id.to_owned()),
        name: Some(team.name.to_owned()),
        market: Some(team.market.to_owned()),
        wins: Some(wins),
        losses: Some(losses),
        win_pct: Some(f64::from(wins) / f64::from(GAMES_PER_SEASON)),
        calc_rank: Some(CalcRank { conf_rank: Some(rng.random_range(1..=15)), div_rank: None }),
        rank: None,
    }
}
