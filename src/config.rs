use std::{env, path::PathBuf, time::Duration};

use crate::services::tips::Language;

pub const DEFAULT_COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

#[derive(Debug, Clone)]
pub struct Settings {
    pub language: Language,

    pub coingecko_api_key: String,
    pub coingecko_base_url: String,
    pub http_timeout: Duration,
    pub http_max_retries: u32,

    pub data_file: PathBuf,
    pub menu_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Settings {
    /// Builds settings from an arbitrary key lookup. `load` passes the process env.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let language = lookup("LANGUAGE")
            .map(|v| Language::from_env_value(&v))
            .unwrap_or_default();

        let coingecko_api_key = lookup("COINGECKO_API_KEY").unwrap_or_default();

        let coingecko_base_url = lookup("COINGECKO_BASE_URL")
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_COINGECKO_BASE_URL.to_string());

        let http_timeout = lookup("HTTP_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));

        let http_max_retries = lookup("HTTP_MAX_RETRIES")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(2);

        let data_file = lookup("DATA_FILE")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("config.json"));

        let menu_delay = lookup("MENU_DELAY_MS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_secs(1));

        Settings {
            language,
            coingecko_api_key,
            coingecko_base_url,
            http_timeout,
            http_max_retries,
            data_file,
            menu_delay,
        }
    }
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    Settings::from_lookup(|key| env::var(key).ok())
}
