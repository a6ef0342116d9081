use chrono::{DateTime, Utc};

/// Point-in-time read of a coin's USD price and daily range. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    pub current_price: f64,
    pub change_pct_24h: f64,
    pub high_24h: f64,
    pub low_24h: f64,
    pub last_updated: Option<DateTime<Utc>>,
}
