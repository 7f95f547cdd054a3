use crate::config::Config;
use nba_api::client::{Season, SportradarApi};
use nba_api::prediction::PredictionClient;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppState {
    pub api: Arc<SportradarApi>,
    pub predictions: Arc<PredictionClient>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(api: SportradarApi, predictions: PredictionClient) -> Self {
        Self {
            api: Arc::new(api),
            predictions: Arc::new(predictions),
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut api = SportradarApi::new(config.api_key.clone())
            .with_base_url(config.base_url.clone())
            .with_news_url(config.news_url.clone())
            .with_season_kind(config.season_kind)
            .with_timeout(config.upstream_timeout)
            .with_cache_ttl(config.cache_ttl);
        if let Some(year) = config.season_year {
            api = api.with_season(Season::new(year, config.season_kind));
        }
        let predictions =
            PredictionClient::new(config.ml_api_url.clone()).with_timeout(config.upstream_timeout);

        Self { request_timeout: config.request_timeout, ..Self::new(api, predictions) }
    }
}
