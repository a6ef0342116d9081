use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use super::{Alert, AlertDirection};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub risk_tolerance: RiskTolerance,

    #[serde(rename = "fav_coins", alias = "favorite_coins", default)]
    pub favorite_coins: BTreeSet<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            risk_tolerance: RiskTolerance::Medium,
            favorite_coins: ["bitcoin", "ethereum"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Everything persisted in the store file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default, deserialize_with = "deserialize_alerts")]
    pub alerts: Vec<Alert>,

    #[serde(default)]
    pub preferences: Preferences,
}

/// Drops entries whose direction is neither above nor below; any other bad
/// entry still fails the whole file.
fn deserialize_alerts<'de, D>(deserializer: D) -> Result<Vec<Alert>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    let mut alerts = Vec::with_capacity(raw.len());

    for value in raw {
        let direction = value
            .get("direction")
            .or_else(|| value.get("type"))
            .and_then(|v| v.as_str());

        if let Some(d) = direction {
            if d.parse::<AlertDirection>().is_err() {
                warn!(direction = %d, coin = ?value.get("coin"), "skipping stored alert with unknown direction");
                continue;
            }
        }

        alerts.push(serde_json::from_value(value).map_err(serde::de::Error::custom)?);
    }

    Ok(alerts)
}
