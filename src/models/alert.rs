use std::{fmt, str::FromStr};

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertDirection {
    Above,
    Below,
}

impl AlertDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertDirection::Above => "above",
            AlertDirection::Below => "below",
        }
    }
}

impl fmt::Display for AlertDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "above" => Ok(AlertDirection::Above),
            "below" => Ok(AlertDirection::Below),
            other => Err(format!("unknown alert direction: {other:?} (expected above/below)")),
        }
    }
}

// older files hold whatever the user typed, e.g. "Above"
impl<'de> Deserialize<'de> for AlertDirection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub coin: String,

    #[serde(alias = "target")]
    pub target_price: f64,

    #[serde(alias = "type")]
    pub direction: AlertDirection,

    // older files carry a naive local timestamp under "created"
    #[serde(alias = "created", deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(coin: impl Into<String>, target_price: f64, direction: AlertDirection) -> Self {
        Self {
            coin: coin.into(),
            target_price,
            direction,
            created_at: Utc::now(),
        }
    }

    /// Whether `price` is on the triggering side of the threshold. Equal is not a hit.
    pub fn is_hit(&self, price: f64) -> bool {
        match self.direction {
            AlertDirection::Above => price > self.target_price,
            AlertDirection::Below => price < self.target_price,
        }
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|e| format!("invalid timestamp {raw:?}: {e}"))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("timestamp {raw:?} does not exist in the local time zone"))
}
