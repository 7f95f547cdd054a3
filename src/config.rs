use anyhow::{Context, Result, bail};
use nba_api::cache::DEFAULT_TTL;
use nba_api::client::{DEFAULT_TIMEOUT, ESPN_NEWS, SPORTRADAR_BASE, SeasonType};
use nba_api::prediction::DEFAULT_ML_API;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// Server configuration sourced from environment variables (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub api_key: Option<String>,
    pub base_url: String,
    /// Pinned season start year; `None` follows the calendar.
    pub season_year: Option<i32>,
    pub season_kind: SeasonType,
    pub cache_ttl: Duration,
    pub upstream_timeout: Duration,
    pub ml_api_url: String,
    pub news_url: String,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            api_key: None,
            base_url: SPORTRADAR_BASE.to_string(),
            season_year: None,
            season_kind: SeasonType::Regular,
            cache_ttl: DEFAULT_TTL,
            upstream_timeout: DEFAULT_TIMEOUT,
            ml_api_url: DEFAULT_ML_API.to_string(),
            news_url: ESPN_NEWS.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or blank keys keep their
    /// defaults, malformed values are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let season_kind = match get("NBA_SEASON_TYPE") {
            Some(raw) => SeasonType::parse(&raw)
                .with_context(|| format!("parse NBA_SEASON_TYPE: {raw:?} is not PRE, REG or PST"))?,
            None => defaults.season_kind,
        };
        let season_year = match get("NBA_SEASON_YEAR") {
            Some(raw) => Some(
                raw.parse::<i32>()
                    .with_context(|| format!("parse NBA_SEASON_YEAR: {raw:?}"))?,
            ),
            None => defaults.season_year,
        };

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or(get("PORT"), "PORT", defaults.port)?,
            api_key: get("SPORTRADAR_API_KEY"),
            base_url: get("SPORTRADAR_BASE_URL").unwrap_or(defaults.base_url),
            season_year,
            season_kind,
            cache_ttl: secs_or(get("CACHE_TTL_SECS"), "CACHE_TTL_SECS", defaults.cache_ttl)?,
            upstream_timeout: positive_secs_or(
                get("UPSTREAM_TIMEOUT_SECS"),
                "UPSTREAM_TIMEOUT_SECS",
                defaults.upstream_timeout,
            )?,
            ml_api_url: get("ML_API_URL").unwrap_or(defaults.ml_api_url),
            news_url: get("NBA_NEWS_URL").unwrap_or(defaults.news_url),
            request_timeout: positive_secs_or(
                get("REQUEST_TIMEOUT_SECS"),
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout,
            )?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value.parse().with_context(|| format!("parse {key}: {value:?}")),
        None => Ok(default),
    }
}

fn secs_or(raw: Option<String>, key: &str, default: Duration) -> Result<Duration> {
    let default_secs = default.as_secs();
    parse_or(raw, key, default_secs).map(Duration::from_secs)
}

fn positive_secs_or(raw: Option<String>, key: &str, default: Duration) -> Result<Duration> {
    let value = secs_or(raw, key, default)?;
    if value.is_zero() {
        bail!("{key} must be greater than zero");
    }
    Ok(value)
}
