//! Unit tests for configuration and preferences
//!
//! Tests cover:
//! - Environment lookup with legacy fallbacks
//! - Timeout validation
//! - Map provider selection
//! - Preferences persistence and expiry

use crate::api::DEFAULT_BASE_URL;
use crate::settings::*;
use sentinel_map::MapProvider;
use std::collections::HashMap;
use std::time::Duration;
use tempfile::tempdir;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

// ============================================================================
// APP CONFIG TESTS
// ============================================================================

#[test]
fn test_config_defaults() {
    let config = AppConfig::from_lookup(lookup(&[]));
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.api_url, DEFAULT_BASE_URL);
    assert_eq!(config.request_timeout(), Duration::from_secs(30));
    assert!(config.map_provider().is_builtin());
    assert!(config.globe_provider().is_builtin());
}

#[test]
fn test_config_native_names_win_over_legacy() {
    let config = AppConfig::from_lookup(lookup(&[
        ("SENTINEL_API_URL", "http://api.internal:9000"),
        ("NEXT_PUBLIC_API_URL", "http://legacy:8000"),
    ]));
    assert_eq!(config.api_url, "http://api.internal:9000");
}

#[test]
fn test_config_legacy_fallback() {
    let config = AppConfig::from_lookup(lookup(&[
        ("SENTINEL_API_URL", "   "),
        ("NEXT_PUBLIC_API_URL", "http://legacy:8000"),
        ("NEXT_PUBLIC_MAPBOX_TOKEN", "pk.live"),
    ]));
    assert_eq!(config.api_url, "http://legacy:8000");
    assert_eq!(config.mapbox_token.as_deref(), Some("pk.live"));
    assert_eq!(
        config.map_provider(),
        MapProvider::Tiled { token: "pk.live".to_string() }
    );
}

#[test]
fn test_config_timeout() {
    let config = AppConfig::from_lookup(lookup(&[("SENTINEL_API_TIMEOUT_SECS", "5")]));
    assert_eq!(config.request_timeout_secs, 5);

    for bad in ["0", "-3", "soon"] {
        let config = AppConfig::from_lookup(lookup(&[("SENTINEL_API_TIMEOUT_SECS", bad)]));
        assert_eq!(config.request_timeout_secs, 30, "{}", bad);
    }
}

#[test]
fn test_placeholder_token_uses_builtin_map() {
    let config = AppConfig::from_lookup(lookup(&[
        ("SENTINEL_MAPBOX_TOKEN", "your_mapbox_token_here"),
        ("SENTINEL_CESIUM_ION_TOKEN", "CHANGEME"),
    ]));
    assert!(config.map_provider().is_builtin());
    assert!(config.globe_provider().is_builtin());
}

// ============================================================================
// PREFERENCES TESTS
// ============================================================================

#[test]
fn test_preferences_missing_file_defaults() {
    let dir = tempdir().unwrap();
    let prefs = Preferences::load_from(&dir.path().join("nope.json"));
    assert_eq!(prefs, Preferences::default());
    assert!(!prefs.sidebar_collapsed);
}

#[test]
fn test_preferences_round_trip_creates_dirs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("preferences.json");

    let mut prefs = Preferences::default();
    assert!(prefs.toggle_sidebar());
    prefs.save_at(&path, 1_000).unwrap();
    assert_eq!(prefs.expires_at, 1_000 + PREFERENCES_MAX_AGE.as_secs());

    let loaded = Preferences::load_at(&path, 2_000);
    assert!(loaded.sidebar_collapsed);
    assert_eq!(loaded, prefs);
}

#[test]
fn test_preferences_expire_after_a_year() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preferences.json");

    let mut prefs = Preferences { sidebar_collapsed: true, expires_at: 0 };
    prefs.save_at(&path, 1_000).unwrap();

    let just_before = 1_000 + PREFERENCES_MAX_AGE.as_secs() - 1;
    assert!(Preferences::load_at(&path, just_before).sidebar_collapsed);

    let expiry = 1_000 + PREFERENCES_MAX_AGE.as_secs();
    assert_eq!(Preferences::load_at(&path, expiry), Preferences::default());
}

#[test]
fn test_preferences_wire_format() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    let mut prefs = Preferences { sidebar_collapsed: true, expires_at: 0 };
    prefs.save_at(&path, 10).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"sidebarCollapsed\": true"));
    assert!(raw.contains("\"expiresAt\""));
}

#[test]
fn test_preferences_garbage_file_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert_eq!(Preferences::load_at(&path, 0), Preferences::default());
}

#[test]
fn test_preferences_without_expiry_are_expired() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, r#"{ "sidebarCollapsed": true }"#).unwrap();
    assert!(!Preferences::load_at(&path, 5).sidebar_collapsed);
}
