use tracing::error;

use crate::{
    AppState,
    models::AlertDirection,
    render,
    services::{
        alert_monitor,
        coingecko::{PriceSource, normalize_coin_id},
    },
};

/// Validates raw prompt answers, then appends and persists the alert.
pub fn create_alert<P>(
    state: &mut AppState<P>,
    coin: &str,
    target_price: &str,
    direction: &str,
) -> String {
    let coin = match normalize_coin_id(coin) {
        Ok(c) => c,
        Err(_) => {
            return "Please enter a valid coin id (letters, digits and dashes, e.g. bitcoin).\n"
                .to_string();
        }
    };

    let target: f64 = match target_price.trim().replace(',', "").parse() {
        Ok(v) => v,
        Err(_) => return "Please enter a valid target price.\n".to_string(),
    };

    if !target.is_finite() || target <= 0.0 {
        return "Please enter a valid target price.\n".to_string();
    }

    let direction: AlertDirection = match direction.parse() {
        Ok(d) => d,
        Err(_) => return "Please choose a valid direction (above/below).\n".to_string(),
    };

    match state.store.append_alert(&coin, target, direction) {
        Ok(_) => "✅ Alert set successfully!\n".to_string(),
        Err(e) => {
            error!(error = %e, "failed to save alert");
            format!("Could not save alert: {e}\n")
        }
    }
}

pub async fn check_alerts<P: PriceSource>(state: &AppState<P>) -> String {
    let triggered = alert_monitor::check_alerts(&state.store, &state.market).await;
    render::render_triggered(&triggered)
}
