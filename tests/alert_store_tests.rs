use std::fs;

use crypto_assistant::AppState;
use crypto_assistant::config::Settings;
use crypto_assistant::models::{AlertDirection, RiskTolerance, UserData};
use crypto_assistant::services::alert_store::{AlertStore, StoreError};
use tempfile::tempdir;

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().unwrap();
    let store = AlertStore::load(dir.path().join("config.json")).unwrap();

    assert!(store.alerts().is_empty());
    assert_eq!(store.preferences().risk_tolerance, RiskTolerance::Medium);
    let favs: Vec<&str> = store
        .preferences()
        .favorite_coins
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(favs, vec!["bitcoin", "ethereum"]);
}

#[test]
fn loading_does_not_create_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    AlertStore::load(&path).unwrap();
    assert!(!path.exists());
}

#[test]
fn append_alert_persists_for_a_fresh_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut store = AlertStore::load(&path).unwrap();
    let before = store.alerts().len();
    store
        .append_alert("bitcoin", 50_000.0, AlertDirection::Above)
        .unwrap();
    assert_eq!(store.alerts().len(), before + 1);

    let reloaded = AlertStore::load(&path).unwrap();
    assert_eq!(reloaded.alerts().len(), 1);
    let alert = &reloaded.alerts()[0];
    assert_eq!(alert.coin, "bitcoin");
    assert_eq!(alert.target_price, 50_000.0);
    assert_eq!(alert.direction, AlertDirection::Above);
    assert_eq!(alert.created_at, store.alerts()[0].created_at);
}

#[test]
fn save_load_cycles_keep_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut store = AlertStore::load(&path).unwrap();
    store.append_alert("bitcoin", 50_000.0, AlertDirection::Above).unwrap();
    store.append_alert("ethereum", 2_500.5, AlertDirection::Below).unwrap();
    let original: UserData = store.data().clone();

    for _ in 0..2 {
        let s = AlertStore::load(&path).unwrap();
        s.save().unwrap();
    }

    let last = AlertStore::load(&path).unwrap();
    assert_eq!(last.data(), &original);
}

#[test]
fn file_is_pretty_printed_with_two_spaces() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut store = AlertStore::load(&path).unwrap();
    store.append_alert("solana", 150.0, AlertDirection::Below).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n  \"alerts\": ["));
    assert!(text.contains("\"direction\": \"below\""));
    assert!(text.contains("\"fav_coins\""));
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn malformed_file_is_a_distinct_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    let err = AlertStore::load(&path).unwrap_err();
    assert!(matches!(err, StoreError::Malformed { .. }));
    assert!(err.to_string().contains("config.json"));
}

#[test]
fn wrong_shape_is_malformed_too() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "alerts": [ { "coin": "bitcoin" } ] }"#).unwrap();

    assert!(matches!(
        AlertStore::load(&path),
        Err(StoreError::Malformed { .. })
    ));
}

#[test]
fn reads_files_written_by_the_old_tool() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
  "alerts": [
    {
      "coin": "bitcoin",
      "target": 70000.0,
      "type": "above",
      "created": "2024-03-01T10:15:30.123456"
    }
  ],
  "preferences": {
    "risk_tolerance": "high",
    "fav_coins": ["solana"]
  }
}"#,
    )
    .unwrap();

    let store = AlertStore::load(&path).unwrap();
    assert_eq!(store.alerts().len(), 1);
    assert_eq!(store.alerts()[0].target_price, 70_000.0);
    assert_eq!(store.alerts()[0].direction, AlertDirection::Above);
    assert_eq!(store.preferences().risk_tolerance, RiskTolerance::High);
    assert!(store.preferences().favorite_coins.contains("solana"));
}

#[test]
fn old_tool_directions_load_in_any_case() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{"alerts":[
            {"coin":"bitcoin","target":70000.0,"type":"Above","created":"2024-03-01T10:15:30.123456"},
            {"coin":"ethereum","target":2000.0,"type":" BELOW ","created":"2024-03-01T10:16:00"}
        ]}"#,
    )
    .unwrap();

    let store = AlertStore::load(&path).unwrap();
    let directions: Vec<AlertDirection> = store.alerts().iter().map(|a| a.direction).collect();
    assert_eq!(directions, vec![AlertDirection::Above, AlertDirection::Below]);
}

#[test]
fn unknown_directions_are_skipped_not_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{"alerts":[
            {"coin":"bitcoin","target":70000.0,"type":"up","created":"2024-03-01T10:15:30"},
            {"coin":"solana","target":150.0,"type":"below","created":"2024-03-01T10:16:00"}
        ]}"#,
    )
    .unwrap();

    let store = AlertStore::load(&path).unwrap();
    assert_eq!(store.alerts().len(), 1);
    assert_eq!(store.alerts()[0].coin, "solana");
}

#[test]
fn missing_preferences_fall_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "alerts": [] }"#).unwrap();

    let store = AlertStore::load(&path).unwrap();
    assert_eq!(store.preferences().risk_tolerance, RiskTolerance::Medium);
    assert_eq!(store.preferences().favorite_coins.len(), 2);
}

#[test]
fn invalid_alerts_are_rejected_without_touching_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    let mut store = AlertStore::load(&path).unwrap();

    for price in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            store.append_alert("bitcoin", price, AlertDirection::Above),
            Err(StoreError::InvalidAlert(_))
        ));
    }
    assert!(matches!(
        store.append_alert("   ", 10.0, AlertDirection::Below),
        Err(StoreError::InvalidAlert(_))
    ));

    assert!(store.alerts().is_empty());
    assert!(!path.exists());
}

#[test]
fn failed_save_rolls_back_the_append() {
    let dir = tempdir().unwrap();
    // parent directory does not exist, so the write fails
    let path = dir.path().join("missing").join("config.json");
    let mut store = AlertStore::load(&path).unwrap();

    let err = store
        .append_alert("bitcoin", 50_000.0, AlertDirection::Above)
        .unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
    assert!(store.alerts().is_empty());
}

#[test]
fn coin_ids_the_api_cannot_take_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    let mut store = AlertStore::load(&path).unwrap();

    for coin in ["bit coin", "../admin", "btc?x=1"] {
        assert!(matches!(
            store.append_alert(coin, 1.0, AlertDirection::Above),
            Err(StoreError::InvalidAlert(_))
        ));
    }
    assert!(store.alerts().is_empty());
    assert!(!path.exists());
}

#[test]
fn app_state_refuses_a_malformed_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "[1, 2").unwrap();

    let settings = Settings {
        data_file: path.clone(),
        ..Settings::default()
    };
    assert!(matches!(
        AppState::new(settings),
        Err(StoreError::Malformed { .. })
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), "[1, 2");
}

#[test]
fn coin_ids_are_stored_lowercase() {
    let dir = tempdir().unwrap();
    let mut store = AlertStore::load(dir.path().join("config.json")).unwrap();
    let alert = store
        .append_alert("  Bitcoin ", 1.0, AlertDirection::Below)
        .unwrap();
    assert_eq!(alert.coin, "bitcoin");
}
