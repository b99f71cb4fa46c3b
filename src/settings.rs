//! Runtime configuration and persisted UI preferences
//!
//! [`AppConfig`] is read from the environment once at startup.
//! [`Preferences`] are the few UI choices that survive restarts; they live in
//! `<config_dir>/sentinel/preferences.json` and expire a year after the last
//! write.

use sentinel_map::MapProvider;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

// =============================================================================
// Environment Configuration
// =============================================================================

pub const ENV_API_URL: &str = "SENTINEL_API_URL";
pub const ENV_API_TIMEOUT: &str = "SENTINEL_API_TIMEOUT_SECS";
pub const ENV_MAPBOX_TOKEN: &str = "SENTINEL_MAPBOX_TOKEN";
pub const ENV_CESIUM_TOKEN: &str = "SENTINEL_CESIUM_ION_TOKEN";

/// Names used by the web deployment, honored when the native ones are unset
const LEGACY_API_URL: &str = "NEXT_PUBLIC_API_URL";
const LEGACY_MAPBOX_TOKEN: &str = "NEXT_PUBLIC_MAPBOX_TOKEN";
const LEGACY_CESIUM_TOKEN: &str = "NEXT_PUBLIC_CESIUM_ION_TOKEN";

fn default_api_url() -> String { crate::api::DEFAULT_BASE_URL.to_string() }
fn default_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub mapbox_token: Option<String>,
    pub cesium_ion_token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_timeout_secs(),
            mapbox_token: None,
            cesium_ion_token: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |primary: &str, legacy: Option<&str>| {
            lookup(primary)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| legacy.and_then(|key| lookup(key)).filter(|v| !v.trim().is_empty()))
        };

        let request_timeout_secs = match get(ENV_API_TIMEOUT, None) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    log::warn!("{}={:?} is not a positive integer; using default", ENV_API_TIMEOUT, raw);
                    default_timeout_secs()
                }
            },
            None => default_timeout_secs(),
        };

        Self {
            api_url: get(ENV_API_URL, Some(LEGACY_API_URL)).unwrap_or_else(default_api_url),
            request_timeout_secs,
            mapbox_token: get(ENV_MAPBOX_TOKEN, Some(LEGACY_MAPBOX_TOKEN)),
            cesium_ion_token: get(ENV_CESIUM_TOKEN, Some(LEGACY_CESIUM_TOKEN)),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Provider for the flat map
    pub fn map_provider(&self) -> MapProvider {
        MapProvider::from_token(self.mapbox_token.as_deref())
    }

    /// Provider for the 3D globe
    pub fn globe_provider(&self) -> MapProvider {
        MapProvider::from_token(self.cesium_ion_token.as_deref())
    }
}

// =============================================================================
// Preferences
// =============================================================================

/// Lifetime of a preferences file after its last write
pub const PREFERENCES_MAX_AGE: Duration = Duration::from_secs(60 * 60 * 24 * 365);

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("preferences I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("preferences could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub sidebar_collapsed: bool,
    /// Unix seconds after which the file is ignored
    #[serde(default)]
    pub expires_at: u64,
}

impl Preferences {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sentinel").join("preferences.json"))
    }

    /// Load from the user config dir; anything unusable yields defaults
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        Self::load_at(path, unix_now())
    }

    /// Load as of `now` (Unix seconds)
    pub fn load_at(path: &Path, now: u64) -> Self {
        let Ok(json) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str::<Preferences>(&json) {
            Ok(prefs) if prefs.is_expired(now) => {
                log::debug!("preferences at {} expired; using defaults", path.display());
                Self::default()
            }
            Ok(prefs) => prefs,
            Err(e) => {
                log::warn!("ignoring unreadable preferences at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn is_expired(&self, now: u64) -> bool {
        self.expires_at <= now
    }

    /// Save to the user config dir, renewing the expiry
    pub fn save(&mut self) -> Result<PathBuf, PreferencesError> {
        let path = Self::default_path().ok_or(PreferencesError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&mut self, path: &Path) -> Result<(), PreferencesError> {
        self.save_at(path, unix_now())
    }

    /// Save as of `now` (Unix seconds)
    pub fn save_at(&mut self, path: &Path, now: u64) -> Result<(), PreferencesError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        self.expires_at = now + PREFERENCES_MAX_AGE.as_secs();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Flip the sidebar state, returning the new value
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        self.sidebar_collapsed
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
