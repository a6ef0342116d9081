//! Library entrypoint for the crypto trading assistant.
//!
//! `main.rs` only wires settings, logging and stdin/stdout together; everything
//! else lives here so integration tests under `tests/` can drive it.

pub mod config;
pub mod models;

pub mod services;

#[path = "views/render.rs"]
pub mod render;

pub mod controllers;
pub mod routes;

use services::{alert_store::AlertStore, coingecko::CoinGeckoClient};

/// Everything the menu actions need, built once at startup.
pub struct AppState<P = CoinGeckoClient> {
    pub settings: config::Settings,
    pub store: AlertStore,
    pub market: P,
}

impl AppState<CoinGeckoClient> {
    pub fn new(settings: config::Settings) -> Result<Self, services::alert_store::StoreError> {
        let store = AlertStore::load(settings.data_file.clone())?;
        let market = CoinGeckoClient::new(&settings);

        Ok(Self {
            settings,
            store,
            market,
        })
    }
}
