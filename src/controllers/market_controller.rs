use crate::{AppState, render, services::coingecko::PriceSource};

pub const FALLBACK_COIN: &str = "bitcoin";

/// Empty input falls back to the first favorite coin.
pub fn resolve_coin<P>(state: &AppState<P>, input: &str) -> String {
    let input = input.trim();
    if !input.is_empty() {
        return input.to_lowercase();
    }

    state
        .store
        .preferences()
        .favorite_coins
        .iter()
        .next()
        .cloned()
        .unwrap_or_else(|| FALLBACK_COIN.to_string())
}

pub async fn show_market<P: PriceSource>(state: &AppState<P>, input: &str) -> String {
    let coin = resolve_coin(state, input);

    match state.market.snapshot(&coin).await {
        Some(snap) => render::render_snapshot(&coin, &snap),
        None => format!("Market data unavailable for {coin} right now.\n"),
    }
}
