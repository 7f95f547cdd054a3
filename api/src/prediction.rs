//! Thin client for the external matchup prediction service.

use crate::client::{ApiError, ApiResult, DEFAULT_TIMEOUT, build_http_client, get_json};
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_ML_API: &str = "http://localhost:5000";

#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for PredictionClient {
    fn default() -> Self {
        Self::new(DEFAULT_ML_API)
    }
}

impl PredictionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { client: build_http_client(), base_url: base_url.into(), timeout: DEFAULT_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `GET {base}/api/predict?teams=team1,team2`, body passed through.
    pub async fn predict(&self, team1: &str, team2: &str) -> ApiResult<Value> {
        let raw = format!("{}/api/predict", self.base_url.trim_end_matches('/'));
        let mut url = Url::parse(&raw)
            .map_err(|e| ApiError::Configuration(format!("invalid prediction url {raw}: {e}")))?;
        url.query_pairs_mut().append_pair("teams", &format!("{team1},{team2}"));
        get_json(&self.client, url, self.timeout, "prediction service").await
    }
}
