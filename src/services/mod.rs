pub mod coingecko;
pub mod retry;
pub mod alert_store;
pub mod alert_monitor;
pub mod tips;
