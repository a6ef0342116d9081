use std::fmt::Write;

use crate::models::{Alert, MarketSnapshot};

pub const MENU: &str = "\n==============================\n\
CRYPTO TRADING ASSISTANT\n\
==============================\n\
1. Market Data\n\
2. Set Price Alert\n\
3. Check Alerts\n\
4. Get Trading Tip\n\
5. Exit\n";

/// `$1,234.50`; negative values keep the sign in front of the dollar sign.
pub fn fmt_usd(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let grouped = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|c| std::str::from_utf8(c).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",");

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}

pub fn render_snapshot(coin: &str, snap: &MarketSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", coin.to_uppercase());
    let _ = writeln!(out, "Current Price: {}", fmt_usd(snap.current_price));
    let _ = writeln!(out, "24h Change: {:.2}%", snap.change_pct_24h);
    let _ = writeln!(
        out,
        "24h Range: {} - {}",
        fmt_usd(snap.low_24h),
        fmt_usd(snap.high_24h)
    );
    if let Some(ts) = snap.last_updated {
        let _ = writeln!(out, "Last Updated: {}", ts.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    out
}

pub fn render_triggered(alerts: &[Alert]) -> String {
    if alerts.is_empty() {
        return "No alerts triggered\n".to_string();
    }

    let mut out = String::from("\n🚨 TRIGGERED ALERTS:\n");
    for a in alerts {
        let _ = writeln!(
            out,
            "{} is now {} {}",
            a.coin.to_uppercase(),
            a.direction,
            fmt_usd(a.target_price)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AlertDirection;

    #[test]
    fn usd_grouping() {
        assert_eq!(fmt_usd(0.0), "$0.00");
        assert_eq!(fmt_usd(999.999), "$1,000.00");
        assert_eq!(fmt_usd(60000.5), "$60,000.50");
        assert_eq!(fmt_usd(1234567.891), "$1,234,567.89");
        assert_eq!(fmt_usd(-42.1), "-$42.10");
    }

    #[test]
    fn snapshot_lists_range_low_to_high() {
        let snap = MarketSnapshot {
            current_price: 60000.0,
            change_pct_24h: -1.234,
            high_24h: 61000.0,
            low_24h: 59000.0,
            last_updated: None,
        };
        let text = render_snapshot("bitcoin", &snap);
        assert!(text.contains("BITCOIN"));
        assert!(text.contains("Current Price: $60,000.00"));
        assert!(text.contains("24h Change: -1.23%"));
        assert!(text.contains("24h Range: $59,000.00 - $61,000.00"));
        assert!(!text.contains("Last Updated"));
    }

    #[test]
    fn triggered_lines() {
        assert_eq!(render_triggered(&[]), "No alerts triggered\n");

        let text = render_triggered(&[Alert::new("ethereum", 3000.0, AlertDirection::Below)]);
        assert!(text.contains("🚨 TRIGGERED ALERTS:"));
        assert!(text.contains("ETHEREUM is now below $3,000.00"));
    }
}
