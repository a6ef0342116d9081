use std::{sync::LazyLock, time::Duration};

use chrono::{DateTime, Utc};
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{config::Settings, models::MarketSnapshot, services::retry::RetryConfig};

pub const API_KEY_HEADER: &str = "x-cg-demo-api-key";

static COIN_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("valid coin id regex"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid coin id: {0:?}")]
    InvalidCoinId(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("CoinGecko returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("response is missing {0}")]
    MissingField(&'static str),
}

impl FetchError {
    pub fn is_retryable(&self, retry: &RetryConfig) -> bool {
        match self {
            FetchError::Transport(_) | FetchError::Timeout(_) => true,
            FetchError::Status { status, .. } => retry.is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Anything that can answer "what is this coin trading at right now".
///
/// `None` means the data is unavailable; the implementation is responsible for
/// logging why.
#[allow(async_fn_in_trait)]
pub trait PriceSource {
    async fn snapshot(&self, coin_id: &str) -> Option<MarketSnapshot>;
}

#[derive(Clone)]
pub struct CoinGeckoClient {
    http: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
    retry: RetryConfig,
}

impl CoinGeckoClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            http: Client::new(),
            base_url: settings.coingecko_base_url.clone(),
            api_key: settings.coingecko_api_key.clone(),
            timeout: settings.http_timeout,
            retry: RetryConfig::with_max_retries(settings.http_max_retries),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn has_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Fetches `/coins/{id}` and flattens its `market_data` into a snapshot.
    pub async fn market_data(&self, coin_id: &str) -> Result<MarketSnapshot, FetchError> {
        let coin_id = normalize_coin_id(coin_id)?;
        let url = format!("{}/coins/{}", self.base_url, coin_id);

        let mut attempt = 0;
        loop {
            match self.fetch_once(&url).await {
                Ok(body) => return parse_coin_response(&body),
                Err(e) if attempt < self.retry.max_retries && e.is_retryable(&self.retry) => {
                    let delay = self.retry.delay_for_attempt(attempt);
                    debug!(coin = %coin_id, attempt, ?delay, error = %e, "retrying CoinGecko request");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let mut req = self.http.get(url).timeout(self.timeout);
        if self.has_key() {
            req = req.header(API_KEY_HEADER, self.api_key.trim());
        }

        let res = req.send().await.map_err(|e| self.map_transport(e))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        res.text().await.map_err(|e| self.map_transport(e))
    }

    fn map_transport(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

impl PriceSource for CoinGeckoClient {
    async fn snapshot(&self, coin_id: &str) -> Option<MarketSnapshot> {
        match self.market_data(coin_id).await {
            Ok(s) => Some(s),
            Err(e) => {
                warn!(coin = %coin_id, error = %e, "market data unavailable");
                None
            }
        }
    }
}

pub fn normalize_coin_id(raw: &str) -> Result<String, FetchError> {
    let id = raw.trim().to_lowercase();
    if COIN_ID_RE.is_match(&id) {
        Ok(id)
    } else {
        Err(FetchError::InvalidCoinId(raw.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct CoinResponse {
    market_data: Option<MarketData>,
    last_updated: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MarketData {
    current_price: Option<UsdValue>,
    price_change_percentage_24h: Option<f64>,
    high_24h: Option<UsdValue>,
    low_24h: Option<UsdValue>,
}

#[derive(Debug, Deserialize)]
struct UsdValue {
    usd: Option<f64>,
}

fn usd(value: Option<UsdValue>, field: &'static str) -> Result<f64, FetchError> {
    value
        .and_then(|v| v.usd)
        .ok_or(FetchError::MissingField(field))
}

pub fn parse_coin_response(body: &str) -> Result<MarketSnapshot, FetchError> {
    let resp: CoinResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    let md = resp
        .market_data
        .ok_or(FetchError::MissingField("market_data"))?;

    let last_updated = resp
        .last_updated
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc));

    Ok(MarketSnapshot {
        current_price: usd(md.current_price, "market_data.current_price.usd")?,
        change_pct_24h: md
            .price_change_percentage_24h
            .ok_or(FetchError::MissingField("market_data.price_change_percentage_24h"))?,
        high_24h: usd(md.high_24h, "market_data.high_24h.usd")?,
        low_24h: usd(md.low_24h, "market_data.low_24h.usd")?,
        last_updated,
    })
}
