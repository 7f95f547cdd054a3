use crate::cache::ResponseCache;
use crate::fallback;
use crate::sportradar::{
    GameSummaryResponse, GameTeam, HierarchyResponse, LeadersResponse, PlayerEntry,
    ScheduleGame, ScheduleResponse, StandingsResponse, StandingsTeam, TeamEntry,
    TeamProfileResponse, TeamsResponse, VenueEntry,
};
use crate::teams;
use crate::{
    BoxScore, GameDetail, GameRecord, GameStatus, LeaderCategory, Leader, LeagueLeaders,
    NOT_AVAILABLE, PeriodScore, PlayerLine, PlayerRecord, Standing, TeamLine, TeamProfile,
    TeamRecord, Venue,
};
use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone};
use futures_util::future::join_all;
use futures_util::join;
use log::{debug, error, warn};
use reqwest::{Client, StatusCode, Url, header};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const SPORTRADAR_BASE: &str = "https://api.sportradar.com/nba/trial/v8/en";
pub const ESPN_NEWS: &str = "https://site.api.espn.com/apis/site/v2/sports/basketball/nba/news";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "courtside/0.1 (nba info site)";

// ---------------------------------------------------------------------------
// Season selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeasonType {
    Pre,
    #[default]
    Regular,
    Post,
}

impl SeasonType {
    pub fn as_str(self) -> &'static str {
        match self {
            SeasonType::Pre => "PRE",
            SeasonType::Regular => "REG",
            SeasonType::Post => "PST",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PRE" => Some(SeasonType::Pre),
            "REG" => Some(SeasonType::Regular),
            "PST" => Some(SeasonType::Post),
            _ => None,
        }
    }
}

impl fmt::Display for SeasonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A season as Sportradar addresses it: start year plus season type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Season {
    pub year: i32,
    pub kind: SeasonType,
}

impl Default for Season {
    fn default() -> Self {
        Self::current(Local::now().date_naive())
    }
}

impl Season {
    pub fn new(year: i32, kind: SeasonType) -> Self {
        Self { year, kind }
    }

    /// Regular season containing `today`.
    pub fn current(today: NaiveDate) -> Self {
        Self::new(season_start_year(today), SeasonType::Regular)
    }

    /// `seasons/{year}/{type}/{name}.json`
    pub fn resource(&self, name: &str) -> String {
        format!("seasons/{}/{}/{name}.json", self.year, self.kind)
    }

    pub fn schedule_path(&self) -> String {
        format!("games/{}/{}/schedule.json", self.year, self.kind)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.year, self.kind)
    }
}

fn season_start_year(today: NaiveDate) -> i32 {
    // Tip-off is in October; Jan-Sep still belong to the previous year's season.
    if today.month() >= 10 { today.year() } else { today.year() - 1 }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ApiError {
    Upstream { status: u16, message: String },
    Timeout(String),
    Network(reqwest::Error, String),
    Parsing(String, String),
    Configuration(String),
    NotFound(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Upstream { status, message } => {
                write!(f, "Upstream returned {status}: {message}")
            }
            ApiError::Timeout(target) => write!(f, "Timed out waiting for {target}"),
            ApiError::Network(e, target) => write!(f, "Network error for {target}: {e}"),
            ApiError::Parsing(e, target) => write!(f, "Parse error for {target}: {e}"),
            ApiError::Configuration(msg) => write!(f, "Configuration error: {msg}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) => Some(e),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Sportradar NBA v8 client. Successful responses are kept in the attached
/// [`ResponseCache`] keyed by resource path; clones share the cache.
#[derive(Clone)]
pub struct SportradarApi {
    client: Client,
    base_url: String,
    news_url: String,
    api_key: Option<String>,
    season_year: Option<i32>,
    season_kind: SeasonType,
    timeout: Duration,
    cache: Arc<ResponseCache>,
}

impl Default for SportradarApi {
    fn default() -> Self {
        Self {
            client: build_http_client(),
            base_url: SPORTRADAR_BASE.to_owned(),
            news_url: ESPN_NEWS.to_owned(),
            api_key: None,
            season_year: None,
            season_kind: SeasonType::default(),
            timeout: DEFAULT_TIMEOUT,
            cache: Arc::new(ResponseCache::new()),
        }
    }
}

impl fmt::Debug for SportradarApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SportradarApi")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("season_year", &self.season_year)
            .field("season_kind", &self.season_kind)
            .field("timeout", &self.timeout)
            .field("cached_entries", &self.cache.len())
            .finish_non_exhaustive()
    }
}

pub(crate) fn build_http_client() -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_default()
}

impl SportradarApi {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key, ..Self::default() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_news_url(mut self, news_url: impl Into<String>) -> Self {
        self.news_url = news_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the cache with an empty one using `ttl`.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = Arc::new(ResponseCache::with_ttl(ttl));
        self
    }

    /// Pins every request to `season` instead of following the calendar.
    pub fn with_season(mut self, season: Season) -> Self {
        self.season_year = Some(season.year);
        self.season_kind = season.kind;
        self
    }

    pub fn with_season_kind(mut self, kind: SeasonType) -> Self {
        self.season_kind = kind;
        self
    }

    /// Season containing today, unless one was pinned.
    pub fn season(&self) -> Season {
        self.season_on(Local::now().date_naive())
    }

    /// Season containing `date`, unless one was pinned.
    pub fn season_on(&self, date: NaiveDate) -> Season {
        let year = self.season_year.unwrap_or_else(|| season_start_year(date));
        Season::new(year, self.season_kind)
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Uncached GET of `{base}/{path}?api_key=...`.
    ///
    /// The credential is checked here rather than at construction so a
    /// keyless server still starts and serves fallback data.
    pub async fn request(&self, path: &str) -> ApiResult<Value> {
        let key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ApiError::Configuration("SPORTRADAR_API_KEY is not set".into()))?;

        let mut url = self.endpoint(path)?;
        url.query_pairs_mut().append_pair("api_key", key);
        get_json(&self.client, url, self.timeout, path).await
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        let raw = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        Url::parse(&raw)
            .map_err(|e| ApiError::Configuration(format!("invalid upstream url {raw}: {e}")))
    }

    /// Cache-first typed fetch. Only payloads that parse are cached.
    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        if let Some(payload) = self.cache.get(path) {
            debug!("cache hit for {path}");
            return parse(path, payload);
        }

        let payload = self.request(path).await?;
        let parsed = parse(path, payload.clone())?;
        self.cache.put(path, payload);
        Ok(parsed)
    }

    /// All thirty teams with conference and division. Never fails: the
    /// hierarchy endpoint is tried first, then the flat team list, then the
    /// built-in directory.
    pub async fn fetch_all_teams(&self) -> Vec<TeamRecord> {
        match self.try_fetch_all_teams().await {
            Ok(teams) => teams,
            Err(e) => {
                error!("team list unavailable, serving mock teams: {e}");
                fallback::mock_teams()
            }
        }
    }

    /// Like [`fetch_all_teams`](Self::fetch_all_teams) without the final
    /// mock tier.
    pub async fn try_fetch_all_teams(&self) -> ApiResult<Vec<TeamRecord>> {
        match self.fetch::<HierarchyResponse>("league/hierarchy.json").await {
            Ok(hierarchy) => {
                let teams = flatten_hierarchy(&hierarchy);
                if !teams.is_empty() {
                    return Ok(teams);
                }
                warn!("league hierarchy contained no teams, trying flat team list");
            }
            Err(e) => warn!("league hierarchy failed, trying flat team list: {e}"),
        }

        let raw: TeamsResponse = self.fetch("league/teams.json").await?;
        let teams: Vec<TeamRecord> = raw
            .teams
            .iter()
            .map(|t| map_team_entry(t, NOT_AVAILABLE, NOT_AVAILABLE))
            .collect();
        if teams.is_empty() {
            return Err(ApiError::NotFound("league/teams.json returned no teams".into()));
        }
        Ok(teams)
    }

    /// Current season standings, or generated standings when unavailable.
    pub async fn fetch_standings(&self) -> StandingsResponse {
        self.try_fetch_standings().await.unwrap_or_else(|e| {
            error!("standings unavailable, serving mock standings: {e}");
            fallback::mock_standings()
        })
    }

    async fn try_fetch_standings(&self) -> ApiResult<StandingsResponse> {
        self.fetch(&self.season().resource("standings")).await
    }

    /// Profile, roster and standing for a team. Profile and standings are
    /// requested concurrently. A real profile only ever carries a real
    /// standing; a failed profile is replaced wholesale by a generated one.
    pub async fn fetch_team_profile(&self, team_id: &str) -> TeamProfile {
        let (profile, standings) = join!(self.fetch_profile(team_id), self.try_fetch_standings());

        match profile {
            Ok(raw) => {
                let standing = match &standings {
                    Ok(standings) => find_standing(standings, team_id).map(map_standing),
                    Err(e) => {
                        warn!("standings unavailable, omitting record for team {team_id}: {e}");
                        None
                    }
                };
                if standing.is_none() {
                    debug!("no standings row for team {team_id}");
                }
                map_team_profile(raw, standing)
            }
            Err(e) => {
                error!("profile for team {team_id} unavailable, serving mock profile: {e}");
                let mock = fallback::mock_team_profile(team_id);
                map_team_profile(mock.profile, Some(map_standing(&mock.standing)))
            }
        }
    }

    pub async fn fetch_team_roster(&self, team_id: &str) -> Vec<PlayerRecord> {
        let players = match self.fetch_profile(team_id).await {
            Ok(raw) => raw.players,
            Err(e) => {
                error!("roster for team {team_id} unavailable, serving mock roster: {e}");
                fallback::mock_team_profile(team_id).profile.players
            }
        };
        players.into_iter().map(map_player).collect()
    }

    async fn fetch_profile(&self, team_id: &str) -> ApiResult<TeamProfileResponse> {
        let id = checked_id(team_id)?;
        self.fetch(&format!("teams/{id}/profile.json")).await
    }

    /// Full schedule for `season`; empty when unavailable.
    pub async fn fetch_season_schedule(&self, season: Season) -> Vec<ScheduleGame> {
        let path = season.schedule_path();
        match self.fetch::<ScheduleResponse>(&path).await {
            Ok(schedule) => schedule.games,
            Err(e) => {
                error!("season schedule unavailable: {e}");
                Vec::new()
            }
        }
    }

    pub async fn fetch_game_summary(&self, game_id: &str) -> ApiResult<GameSummaryResponse> {
        let id = checked_id(game_id)?;
        self.fetch(&format!("games/{id}/summary.json")).await
    }

    /// Games scheduled on `date` in the server's local time zone.
    pub async fn fetch_games_for_date(&self, date: NaiveDate) -> Vec<GameRecord> {
        self.fetch_games_for_date_in(date, &Local).await
    }

    /// Games whose tip-off falls on `date` in `tz`. Final and live games are
    /// enriched with their summary concurrently; a failed summary leaves that
    /// game as the schedule describes it.
    pub async fn fetch_games_for_date_in<Tz>(&self, date: NaiveDate, tz: &Tz) -> Vec<GameRecord>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let on_date: Vec<ScheduleGame> = self
            .fetch_season_schedule(self.season_on(date))
            .await
            .into_iter()
            .filter(|g| tip_off(g.scheduled.as_deref(), tz).is_some_and(|t| t.date_naive() == date))
            .collect();
        debug!("{} games scheduled on {date}", on_date.len());

        let games = join_all(on_date.into_iter().map(|g| self.enrich(g))).await;
        games.iter().map(|g| map_schedule_game(g, tz)).collect()
    }

    async fn enrich(&self, mut game: ScheduleGame) -> ScheduleGame {
        if !matches!(game.status.as_deref(), Some("closed" | "inprogress")) {
            return game;
        }
        let Some(id) = game.id.clone() else {
            return game;
        };

        match self.fetch_game_summary(&id).await {
            Ok(summary) => {
                merge_summary_side(&mut game.home, summary.home);
                merge_summary_side(&mut game.away, summary.away);
            }
            Err(e) => warn!("summary for game {id} unavailable, using schedule entry: {e}"),
        }
        game
    }

    /// Box score for one game. Unlike the list fetches this has no fallback.
    pub async fn fetch_game_detail(&self, game_id: &str) -> ApiResult<GameDetail> {
        let summary = self.fetch_game_summary(game_id).await?;
        map_game_detail(summary, &Local)
            .ok_or_else(|| ApiError::NotFound(format!("game {game_id} has no teams")))
    }

    pub async fn fetch_league_leaders(&self) -> ApiResult<LeagueLeaders> {
        let season = self.season();
        let raw: LeadersResponse = self.fetch(&season.resource("leaders")).await?;
        Ok(map_leaders(raw, season))
    }

    /// ESPN NBA news feed, passed through untouched and uncached.
    pub async fn fetch_news(&self) -> ApiResult<Value> {
        let url = Url::parse(&self.news_url).map_err(|e| {
            ApiError::Configuration(format!("invalid news url {}: {e}", self.news_url))
        })?;
        get_json(&self.client, url, self.timeout, "nba news").await
    }
}

/// GET `url` and decode a JSON body. `target` names the resource in logs and
/// errors; the URL itself may carry a credential and is never logged.
pub(crate) async fn get_json(
    client: &Client,
    url: Url,
    timeout: Duration,
    target: &str,
) -> ApiResult<Value> {
    debug!("GET {target}");
    let response = client
        .get(url)
        .header(header::ACCEPT, "application/json")
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| transport_error(e, target))?;

    let status = response.status();
    if !status.is_success() {
        match status {
            StatusCode::FORBIDDEN => {
                error!("{target}: 403 Forbidden, check that the API key is valid and active")
            }
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("{target}: 429 Too Many Requests, upstream rate limit reached")
            }
            _ => warn!("{target}: upstream returned {status}"),
        }
        return Err(ApiError::Upstream {
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or("unexpected status").to_owned(),
        });
    }

    let body = response
        .json::<Value>()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(target.to_owned())
            } else {
                ApiError::Parsing(e.without_url().to_string(), target.to_owned())
            }
        })?;
    debug!("{target}: {status}");
    Ok(body)
}

fn transport_error(e: reqwest::Error, target: &str) -> ApiError {
    if e.is_timeout() {
        warn!("{target}: request timed out");
        ApiError::Timeout(target.to_owned())
    } else {
        warn!("{target}: no response");
        ApiError::Network(e.without_url(), target.to_owned())
    }
}

fn parse<T: DeserializeOwned>(path: &str, payload: Value) -> ApiResult<T> {
    serde_json::from_value(payload).map_err(|e| ApiError::Parsing(e.to_string(), path.to_owned()))
}

/// Upstream ids are UUIDs; anything else would change the request path.
fn checked_id(id: &str) -> ApiResult<&str> {
    if !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        Ok(id)
    } else {
        Err(ApiError::NotFound(format!("invalid id {id:?}")))
    }
}

// ---------------------------------------------------------------------------
// Mapping: Sportradar wire types → clean domain types
// ---------------------------------------------------------------------------

/// Conference -> division -> team, each team inheriting the names above it.
fn flatten_hierarchy(hierarchy: &HierarchyResponse) -> Vec<TeamRecord> {
    hierarchy
        .conferences
        .iter()
        .flat_map(|conference| {
            let conf = conference.name.as_deref().unwrap_or(NOT_AVAILABLE);
            conference.divisions.iter().flat_map(move |division| {
                let div = division.name.as_deref().unwrap_or(NOT_AVAILABLE);
                division.teams.iter().map(move |t| map_team_entry(t, conf, div))
            })
        })
        .collect()
}

fn map_team_entry(t: &TeamEntry, conference: &str, division: &str) -> TeamRecord {
    let id = t.id.clone().unwrap_or_default();
    let full_name = display_name(t.market.as_deref(), t.name.as_deref());
    TeamRecord {
        logo_url: teams::best_logo_url(&id, &full_name),
        id,
        name: t.name.clone().unwrap_or_default(),
        market: t.market.clone().unwrap_or_default(),
        full_name,
        alias: t.alias.clone().unwrap_or_default(),
        conference: conference.to_owned(),
        division: division.to_owned(),
    }
}

/// Depth-first scan for the standings row of `team_id`; first match wins.
pub fn find_standing<'a>(
    standings: &'a StandingsResponse,
    team_id: &str,
) -> Option<&'a StandingsTeam> {
    standings
        .conferences
        .iter()
        .flat_map(|c| &c.divisions)
        .flat_map(|d| &d.teams)
        .find(|t| t.id.as_deref() == Some(team_id))
}

fn map_standing(row: &StandingsTeam) -> Standing {
    Standing {
        rank: row.calc_rank.as_ref().and_then(|r| r.conf_rank).or(row.rank),
        won: row.wins.unwrap_or(0),
        lost: row.losses.unwrap_or(0),
        win_pct: row.win_pct.unwrap_or(0.0),
    }
}

fn map_team_profile(raw: TeamProfileResponse, standing: Option<Standing>) -> TeamProfile {
    let id = raw.id.unwrap_or_default();
    let full_name = display_name(raw.market.as_deref(), raw.name.as_deref());
    TeamProfile {
        logo_url: teams::best_logo_url(&id, &full_name),
        id,
        market: raw.market.unwrap_or_default(),
        name: raw.name.unwrap_or_default(),
        full_name,
        alias: raw.alias.unwrap_or_default(),
        conference: raw
            .conference
            .and_then(|c| c.name)
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
        division: raw
            .division
            .and_then(|d| d.name)
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
        venue: raw.venue.as_ref().map(map_venue).unwrap_or_else(Venue::unknown),
        roster: raw.players.into_iter().map(map_player).collect(),
        standing,
    }
}

fn map_player(p: PlayerEntry) -> PlayerRecord {
    let first_name = p.first_name.unwrap_or_default();
    let last_name = p.last_name.unwrap_or_default();
    let full_name = p
        .full_name
        .unwrap_or_else(|| format!("{first_name} {last_name}").trim().to_owned());
    PlayerRecord {
        id: p.id.unwrap_or_default(),
        full_name,
        first_name,
        last_name,
        position: p.position.or(p.primary_position).unwrap_or_default(),
        jersey_number: p.jersey_number.unwrap_or_default(),
        height: p.height.unwrap_or(0),
        weight: p.weight.unwrap_or(0),
        experience: p.experience.unwrap_or_default(),
        college: p.college.unwrap_or_default(),
    }
}

fn map_venue(v: &VenueEntry) -> Venue {
    Venue {
        name: v.name.clone().unwrap_or_else(|| Venue::unknown().name),
        address: v.address.clone().unwrap_or_default(),
        city: v.city.clone().unwrap_or_default(),
        state: v.state.clone().unwrap_or_default(),
        capacity: v.capacity.unwrap_or(0),
    }
}

fn tip_off<Tz: TimeZone>(scheduled: Option<&str>, tz: &Tz) -> Option<DateTime<Tz>> {
    let parsed = DateTime::parse_from_rfc3339(scheduled?).ok()?;
    Some(parsed.with_timezone(tz))
}

/// ("3/14/2025", "7:30 PM")
fn date_and_time<Tz>(scheduled: Option<&str>, tz: &Tz) -> (String, String)
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    tip_off(scheduled, tz)
        .map(|t| (t.format("%-m/%-d/%Y").to_string(), t.format("%-I:%M %p").to_string()))
        .unwrap_or_default()
}

fn merge_summary_side(side: &mut Option<GameTeam>, summary: Option<GameTeam>) {
    let Some(summary) = summary else {
        return;
    };
    let team = side.get_or_insert_with(GameTeam::default);
    if summary.points.is_some() {
        team.points = summary.points;
    }
    team.scoring = summary.scoring;
}

fn map_schedule_game<Tz>(game: &ScheduleGame, tz: &Tz) -> GameRecord
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let status = GameStatus::from_upstream(game.status.as_deref().unwrap_or("scheduled"));
    let home_score = game.home.as_ref().and_then(|t| t.points).or(game.home_points).unwrap_or(0);
    let away_score = game.away.as_ref().and_then(|t| t.points).or(game.away_points).unwrap_or(0);

    let (home, away) =
        team_lines(&status, game.home.as_ref(), home_score, game.away.as_ref(), away_score);
    let (date, time) = date_and_time(game.scheduled.as_deref(), tz);
    let venue = game.venue.as_ref().map(map_venue);

    GameRecord {
        id: game.id.clone().unwrap_or_default(),
        date,
        time,
        status,
        home,
        away,
        venue: venue.as_ref().map(|v| v.name.clone()).unwrap_or_default(),
        location: venue.as_ref().map(Venue::location).unwrap_or_default(),
    }
}

fn team_lines(
    status: &GameStatus,
    home: Option<&GameTeam>,
    home_score: u32,
    away: Option<&GameTeam>,
    away_score: u32,
) -> (TeamLine, TeamLine) {
    let mut home = map_team_line(home, home_score);
    let mut away = map_team_line(away, away_score);
    home.won = status.is_final() && home_score > away_score;
    away.won = status.is_final() && away_score > home_score;
    (home, away)
}

fn map_team_line(team: Option<&GameTeam>, score: u32) -> TeamLine {
    let Some(t) = team else {
        return TeamLine {
            logo_url: teams::FALLBACK_LOGO.to_owned(),
            score,
            ..TeamLine::default()
        };
    };
    let id = t.id.clone().unwrap_or_default();
    let name = display_name(t.market.as_deref(), t.name.as_deref());
    TeamLine {
        logo_url: teams::best_logo_url(&id, &name),
        id,
        name,
        alias: t.alias.clone().unwrap_or_default(),
        score,
        won: false,
        periods: t
            .scoring
            .iter()
            .map(|p| PeriodScore {
                label: period_label(p.kind.as_deref(), p.number.or(p.sequence)),
                points: p.points.unwrap_or(0),
            })
            .collect(),
    }
}

/// Schedule payloads carry the full name in `name`; summaries split it into
/// market and nickname.
fn display_name(market: Option<&str>, name: Option<&str>) -> String {
    match (market.filter(|m| !m.is_empty()), name.unwrap_or_default()) {
        (Some(market), name) if name.starts_with(market) => name.to_owned(),
        (Some(market), "") => market.to_owned(),
        (Some(market), name) => format!("{market} {name}"),
        (None, name) => name.to_owned(),
    }
}

fn period_label(kind: Option<&str>, number: Option<u32>) -> String {
    let n = number.unwrap_or(0);
    match kind {
        Some("overtime") => format!("OT{n}"),
        _ => format!("Q{n}"),
    }
}

fn map_game_detail<Tz>(summary: GameSummaryResponse, tz: &Tz) -> Option<GameDetail>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let home = summary.home?;
    let away = summary.away?;
    let status = GameStatus::from_upstream(summary.status.as_deref().unwrap_or("scheduled"));
    let home_score = home.points.unwrap_or(0);
    let away_score = away.points.unwrap_or(0);

    let (home_line, away_line) =
        team_lines(&status, Some(&home), home_score, Some(&away), away_score);
    let (date, time) = date_and_time(summary.scheduled.as_deref(), tz);

    Some(GameDetail {
        id: summary.id.unwrap_or_default(),
        date,
        time,
        quarter: summary.quarter,
        clock: summary.clock.unwrap_or_default(),
        venue: summary.venue.as_ref().map(map_venue).unwrap_or_else(Venue::unknown),
        home: BoxScore {
            team: home_line,
            players: home.players.into_iter().map(map_box_player).collect(),
        },
        away: BoxScore {
            team: away_line,
            players: away.players.into_iter().map(map_box_player).collect(),
        },
        status,
    })
}

fn map_box_player(p: crate::sportradar::BoxPlayer) -> PlayerLine {
    let stats = p.statistics.unwrap_or_default();
    PlayerLine {
        name: p.full_name.unwrap_or_default(),
        position: p.primary_position.or(p.position).unwrap_or_default(),
        starter: p.starter.unwrap_or(false),
        minutes: stats.minutes.unwrap_or_default(),
        points: stats.points.unwrap_or(0),
        rebounds: stats.rebounds.unwrap_or(0),
        assists: stats.assists.unwrap_or(0),
    }
}

fn map_leaders(raw: LeadersResponse, season: Season) -> LeagueLeaders {
    let label = raw
        .season
        .as_ref()
        .and_then(|s| Some(format!("{} {}", s.year?, s.kind.as_deref()?)))
        .unwrap_or_else(|| season.to_string());

    let categories = raw
        .categories
        .into_iter()
        .map(|c| LeaderCategory {
            name: humanize(c.name.as_deref().unwrap_or_default()),
            kind: c.kind.unwrap_or_default(),
            leaders: c
                .ranks
                .into_iter()
                .map(|r| {
                    let player = r.player.unwrap_or_default();
                    Leader {
                        rank: r.rank.unwrap_or(0),
                        player: player.full_name.unwrap_or_default(),
                        position: player.position.unwrap_or_default(),
                        team: r
                            .teams
                            .first()
                            .map(|t| display_name(t.market.as_deref(), t.name.as_deref()))
                            .unwrap_or_default(),
                        score: r.score.unwrap_or(0.0),
                    }
                })
                .collect(),
        })
        .collect();

    LeagueLeaders { season: label, categories }
}

/// "field_goals_pct" -> "Field Goals Pct"
fn humanize(s: &str) -> String {
    s.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sportradar::{CalcRank, Conference, Division, PeriodEntry};
    use chrono::{FixedOffset, Utc};
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn season_year_uses_previous_year_before_october() {
        assert_eq!(Season::current(date(2025, 3, 14)).year, 2024);
        assert_eq!(Season::current(date(2025, 9, 30)).year, 2024);
    }

    #[test]
    fn season_year_rolls_forward_in_october() {
        let season = Season::current(date(2025, 10, 1));
        assert_eq!(season.year, 2025);
        assert_eq!(season.kind, SeasonType::Regular);
        assert_eq!(season.resource("standings"), "seasons/2025/REG/standings.json");
        assert_eq!(season.schedule_path(), "games/2025/REG/schedule.json");
        assert_eq!(season.to_string(), "2025 REG");
    }

    #[test]
    fn client_season_follows_the_calendar_unless_pinned() {
        let api = SportradarApi::new(None).with_season_kind(SeasonType::Post);
        assert_eq!(api.season_on(date(2024, 2, 1)), Season::new(2023, SeasonType::Post));
        assert_eq!(api.season_on(date(2024, 11, 1)), Season::new(2024, SeasonType::Post));

        let pinned = api.with_season(Season::new(2021, SeasonType::Regular));
        assert_eq!(pinned.season_on(date(2024, 11, 1)), Season::new(2021, SeasonType::Regular));
    }

    #[test]
    fn season_type_parses_case_insensitively() {
        assert_eq!(SeasonType::parse("pst"), Some(SeasonType::Post));
        assert_eq!(SeasonType::parse(" REG "), Some(SeasonType::Regular));
        assert_eq!(SeasonType::parse("playoffs"), None);
    }

    #[test]
    fn hierarchy_flattens_to_thirty_records_with_inherited_names() {
        // Build the 2 x 3 x 5 league from the directory.
        let standings = fallback::mock_standings();
        let hierarchy = HierarchyResponse {
            conferences: standings
                .conferences
                .iter()
                .map(|c| Conference {
                    name: c.name.clone(),
                    divisions: c
                        .divisions
                        .iter()
                        .map(|d| Division {
                            name: d.name.clone(),
                            teams: d
                                .teams
                                .iter()
                                .map(|t| TeamEntry {
                                    id: t.id.clone(),
                                    name: t.name.clone(),
                                    market: t.market.clone(),
                                    alias: None,
                                })
                                .collect(),
                            ..Division::default()
                        })
                        .collect(),
                    ..Conference::default()
                })
                .collect(),
        };

        let teams = flatten_hierarchy(&hierarchy);
        assert_eq!(teams.len(), 30);

        let celtics = teams.iter().find(|t| t.name == "Celtics").unwrap();
        assert_eq!(celtics.conference, "Eastern Conference");
        assert_eq!(celtics.division, "Atlantic");
        assert_eq!(celtics.full_name, "Boston Celtics");

        let lakers = teams.iter().find(|t| t.name == "Lakers").unwrap();
        assert_eq!(lakers.conference, "Western Conference");
        assert_eq!(lakers.division, "Pacific");
    }

    #[test]
    fn flat_team_entry_gets_placeholder_groups() {
        let entry = TeamEntry {
            id: Some("x".into()),
            name: Some("Heat".into()),
            market: Some("Miami".into()),
            alias: Some("MIA".into()),
        };
        let team = map_team_entry(&entry, NOT_AVAILABLE, NOT_AVAILABLE);
        assert_eq!(team.conference, "N/A");
        assert_eq!(team.division, "N/A");
        assert!(team.logo_url.contains("1610612748"), "logo resolved by name");
    }

    fn row(id: &str, wins: u32) -> StandingsTeam {
        StandingsTeam { id: Some(id.into()), wins: Some(wins), ..StandingsTeam::default() }
    }

    #[test]
    fn standings_lookup_returns_first_match_depth_first() {
        let standings: StandingsResponse = serde_json::from_value(json!({
            "conferences": [
                {"name": "EAST", "divisions": [
                    {"name": "A", "teams": [{"id": "t1", "wins": 10}]},
                    {"name": "B", "teams": [{"id": "t2", "wins": 20}, {"id": "t1", "wins": 99}]}
                ]},
                {"name": "WEST", "divisions": [
                    {"name": "C", "teams": [{"id": "t2", "wins": 77}]}
                ]}
            ]
        }))
        .unwrap();

        assert_eq!(find_standing(&standings, "t1").and_then(|t| t.wins), Some(10));
        assert_eq!(find_standing(&standings, "t2").and_then(|t| t.wins), Some(20));
        assert!(find_standing(&standings, "t3").is_none());
    }

    #[test]
    fn standing_prefers_conference_rank_and_defaults_to_zero() {
        let mut team = row("t1", 41);
        team.rank = Some(9);
        assert_eq!(map_standing(&team).rank, Some(9));

        team.calc_rank = Some(CalcRank { conf_rank: Some(3), div_rank: Some(1) });
        let standing = map_standing(&team);
        assert_eq!(standing.rank, Some(3));
        assert_eq!(standing.won, 41);
        assert_eq!(standing.lost, 0);
        assert_eq!(standing.win_pct, 0.0);
    }

    fn game(status: &str, home_points: Option<u32>, away_points: Option<u32>) -> ScheduleGame {
        ScheduleGame {
            id: Some("g1".into()),
            status: Some(status.into()),
            scheduled: Some("2025-03-15T00:30:00+00:00".into()),
            home: Some(GameTeam {
                name: Some("Boston Celtics".into()),
                alias: Some("BOS".into()),
                points: home_points,
                ..GameTeam::default()
            }),
            away: Some(GameTeam {
                name: Some("Miami Heat".into()),
                alias: Some("MIA".into()),
                points: away_points,
                ..GameTeam::default()
            }),
            venue: Some(VenueEntry {
                name: Some("TD Garden".into()),
                city: Some("Boston".into()),
                state: Some("MA".into()),
                ..VenueEntry::default()
            }),
            ..ScheduleGame::default()
        }
    }

    #[test]
    fn final_game_flags_only_the_winner() {
        let record = map_schedule_game(&game("closed", Some(98), Some(104)), &Utc);
        assert_eq!(record.status, GameStatus::Final);
        assert!(!record.home.won);
        assert!(record.away.won);

        let record = map_schedule_game(&game("closed", Some(110), Some(104)), &Utc);
        assert!(record.home.won);
        assert!(!record.away.won);
    }

    #[test]
    fn live_and_tied_games_have_no_winner() {
        let live = map_schedule_game(&game("inprogress", Some(60), Some(40)), &Utc);
        assert_eq!(live.status.label(), "Live");
        assert!(!live.home.won && !live.away.won);

        let tied = map_schedule_game(&game("closed", Some(100), Some(100)), &Utc);
        assert!(!tied.home.won && !tied.away.won);
    }

    #[test]
    fn schedule_game_formats_local_date_time_and_location() {
        let eastern = FixedOffset::west_opt(4 * 3600).unwrap();
        let record = map_schedule_game(&game("scheduled", None, None), &eastern);
        assert_eq!(record.date, "3/14/2025");
        assert_eq!(record.time, "8:30 PM");
        assert_eq!(record.venue, "TD Garden");
        assert_eq!(record.location, "Boston, MA");
        assert_eq!(record.home.score, 0);
        assert_eq!(record.home.name, "Boston Celtics");
        assert!(record.home.logo_url.contains("1610612738"));
    }

    #[test]
    fn schedule_points_used_when_team_points_missing() {
        let mut g = game("closed", None, None);
        g.home_points = Some(101);
        g.away_points = Some(99);
        let record = map_schedule_game(&g, &Utc);
        assert_eq!(record.home.score, 101);
        assert_eq!(record.away.score, 99);
        assert!(record.home.won);
    }

    #[test]
    fn summary_merge_replaces_points_and_periods() {
        let mut g = game("closed", Some(1), Some(2));
        let summary_home = GameTeam {
            name: Some("Celtics".into()),
            market: Some("Boston".into()),
            points: Some(112),
            scoring: vec![
                PeriodEntry {
                    kind: Some("quarter".into()),
                    number: Some(1),
                    points: Some(30),
                    ..PeriodEntry::default()
                },
                PeriodEntry {
                    kind: Some("overtime".into()),
                    number: Some(1),
                    points: Some(8),
                    ..PeriodEntry::default()
                },
            ],
            ..GameTeam::default()
        };
        merge_summary_side(&mut g.home, Some(summary_home));
        merge_summary_side(&mut g.away, None);

        let record = map_schedule_game(&g, &Utc);
        assert_eq!(record.home.score, 112);
        assert_eq!(record.away.score, 2);
        let labels: Vec<_> = record.home.periods.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["Q1", "OT1"]);
    }

    #[test]
    fn display_name_does_not_repeat_market() {
        assert_eq!(display_name(Some("Boston"), Some("Celtics")), "Boston Celtics");
        assert_eq!(display_name(Some("Boston"), Some("Boston Celtics")), "Boston Celtics");
        assert_eq!(display_name(None, Some("Miami Heat")), "Miami Heat");
        assert_eq!(display_name(Some(""), None), "");
    }

    #[test]
    fn game_detail_requires_both_teams_and_defaults_venue() {
        let summary: GameSummaryResponse = serde_json::from_value(json!({
            "id": "g9",
            "status": "closed",
            "home": {"name": "Celtics", "market": "Boston", "points": 120, "players": [{
                "full_name": "Jayson Tatum", "primary_position": "SF", "starter": true,
                "statistics": {"minutes": "36:10", "points": 31, "rebounds": 9, "assists": 5}
            }]},
            "away": {"name": "Heat", "market": "Miami", "points": 101}
        }))
        .unwrap();

        let detail = map_game_detail(summary.clone(), &Utc).unwrap();
        assert_eq!(detail.title(), "Miami Heat @ Boston Celtics");
        assert_eq!(detail.venue.name, "Unknown Venue");
        assert!(detail.home.team.won);
        assert_eq!(detail.home.players[0].points, 31);
        assert_eq!(detail.home.players[0].position, "SF");

        let partial = GameSummaryResponse { away: None, ..summary };
        assert!(map_game_detail(partial, &Utc).is_none());
    }

    #[test]
    fn leaders_are_grouped_and_named() {
        let raw: LeadersResponse = serde_json::from_value(json!({
            "season": {"year": 2024, "type": "REG"},
            "categories": [{"name": "field_goals_pct", "type": "average", "ranks": [
                {"rank": 1, "score": 0.61,
                 "player": {"full_name": "Daniel Gafford", "position": "C"},
                 "teams": [{"market": "Dallas", "name": "Mavericks"}]}
            ]}]
        }))
        .unwrap();

        let leaders = map_leaders(raw, Season::new(2030, SeasonType::Post));
        assert_eq!(leaders.season, "2024 REG");
        assert_eq!(leaders.categories[0].name, "Field Goals Pct");
        assert_eq!(leaders.categories[0].leaders[0].team, "Dallas Mavericks");

        let empty = map_leaders(LeadersResponse::default(), Season::new(2030, SeasonType::Post));
        assert_eq!(empty.season, "2030 PST");
    }

    #[test]
    fn ids_that_would_alter_the_path_are_rejected() {
        assert!(checked_id("583eca2f-fb46-11e1-82cb-f4ce4684ea4c").is_ok());
        assert!(checked_id("../league").is_err());
        assert!(checked_id("a/b").is_err());
        assert!(checked_id("").is_err());
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let api = SportradarApi::new(Some("secret-key".into()));
        let out = format!("{api:?}");
        assert!(!out.contains("secret-key"));
        assert!(out.contains("<redacted>"));
    }

    #[tokio::test]
    async fn missing_key_is_a_configuration_error() {
        let api = SportradarApi::new(None);
        let result = api.request("league/teams.json").await;
        assert!(matches!(result, Err(ApiError::Configuration(_))));

        let blank = SportradarApi::new(Some("  ".into()));
        let result = blank.request("league/teams.json").await;
        assert!(matches!(result, Err(ApiError::Configuration(_))));
    }
}
