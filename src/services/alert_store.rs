use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    models::{Alert, AlertDirection, Preferences, UserData},
    services::coingecko::normalize_coin_id,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a valid alerts file: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not serialize user data: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("invalid alert: {0}")]
    InvalidAlert(String),
}

/// Alerts and preferences backed by a single JSON file.
#[derive(Debug)]
pub struct AlertStore {
    path: PathBuf,
    data: UserData,
}

impl AlertStore {
    /// A missing file yields the defaults; anything present must parse.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let data = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str::<UserData>(&text).map_err(|source| {
                StoreError::Malformed {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no alerts file yet, starting with defaults");
                UserData::default()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        debug!(path = %path.display(), alerts = data.alerts.len(), "loaded user data");
        Ok(Self { path, data })
    }

    /// Writes to a sibling temp file and renames it over the target.
    pub fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.data).map_err(StoreError::Serialize)?;

        let tmp = tmp_path(&self.path);
        let io_err = |source: io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        fs::write(&tmp, json).map_err(&io_err)?;
        fs::rename(&tmp, &self.path).map_err(|source| {
            let _ = fs::remove_file(&tmp);
            io_err(source)
        })?;

        debug!(path = %self.path.display(), alerts = self.data.alerts.len(), "saved user data");
        Ok(())
    }

    pub fn append_alert(
        &mut self,
        coin: &str,
        target_price: f64,
        direction: AlertDirection,
    ) -> Result<&Alert, StoreError> {
        let coin = normalize_coin_id(coin).map_err(|e| StoreError::InvalidAlert(e.to_string()))?;
        if !target_price.is_finite() || target_price <= 0.0 {
            return Err(StoreError::InvalidAlert(format!(
                "target price must be a positive number, got {target_price}"
            )));
        }

        self.data
            .alerts
            .push(Alert::new(coin, target_price, direction));

        if let Err(e) = self.save() {
            self.data.alerts.pop();
            return Err(e);
        }

        let alert = &self.data.alerts[self.data.alerts.len() - 1];
        info!(coin = %alert.coin, target = alert.target_price, direction = %alert.direction, "alert created");
        Ok(alert)
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.data.alerts
    }

    pub fn preferences(&self) -> &Preferences {
        &self.data.preferences
    }

    pub fn data(&self) -> &UserData {
        &self.data
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "config.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}
