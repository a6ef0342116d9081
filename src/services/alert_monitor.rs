use std::collections::HashMap;

use tracing::{debug, info};

use crate::{
    models::Alert,
    services::{alert_store::AlertStore, coingecko::PriceSource},
};

/// Returns every stored alert whose condition holds at the current price, in store order.
///
/// Each distinct coin is fetched once per call. Coins with no data (or a
/// nonsensical price) are skipped. Alerts are left untouched, so a hit
/// reported here will be reported again on the next check.
pub async fn check_alerts<P: PriceSource>(store: &AlertStore, source: &P) -> Vec<Alert> {
    let alerts = store.alerts();
    if alerts.is_empty() {
        return Vec::new();
    }

    let mut prices: HashMap<&str, Option<f64>> = HashMap::new();
    for a in alerts {
        if prices.contains_key(a.coin.as_str()) {
            continue;
        }

        let price = source
            .snapshot(&a.coin)
            .await
            .map(|s| s.current_price)
            .filter(|p| p.is_finite() && *p > 0.0);

        if price.is_none() {
            debug!(coin = %a.coin, "no usable price, skipping its alerts");
        }
        prices.insert(a.coin.as_str(), price);
    }

    let triggered: Vec<Alert> = alerts
        .iter()
        .filter(|a| matches!(prices.get(a.coin.as_str()), Some(Some(p)) if a.is_hit(*p)))
        .cloned()
        .collect();

    info!(checked = alerts.len(), triggered = triggered.len(), "alerts checked");
    triggered
}
