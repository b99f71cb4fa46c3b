//! Demo scenarios and the watchlist store
//!
//! A scenario is a named bundle of countries, customer assets and trade
//! routes for one industry vertical. The user's watchlist is layered on top
//! of the active scenario as two pieces of explicit state:
//!
//! - `removed`: codes hidden from the scenario's base list
//! - `added`: catalog countries appended after the base list
//!
//! The watchlist itself is never stored; it is derived on every read.

use crate::country::Country;
use crate::mock_data;
use parking_lot::RwLock;
use sentinel_map::GeoPoint;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

// =============================================================================
// Scenario Data
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetKind {
    Facility,
    Port,
    RoutePoint,
    Supplier,
    Office,
}

impl AssetKind {
    pub fn label(&self) -> &'static str {
        match self {
            AssetKind::Facility => "Facility",
            AssetKind::Port => "Port",
            AssetKind::RoutePoint => "Route Point",
            AssetKind::Supplier => "Supplier",
            AssetKind::Office => "Office",
        }
    }
}

/// A customer site plotted on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub kind: AssetKind,
    pub label: String,
    pub location: GeoPoint,
    pub detail: String,
    /// Why the site is exposed, when it is
    pub risk: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRoute {
    pub id: String,
    pub label: String,
    pub color: String,
    pub points: Vec<GeoPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub industry: String,
    pub description: String,
    pub countries: Vec<Country>,
    pub assets: Vec<Asset>,
    pub routes: Vec<TradeRoute>,
}

impl Scenario {
    pub fn contains(&self, code: &str) -> bool {
        self.countries.iter().any(|c| c.code == code)
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("unknown scenario '{0}'")]
    UnknownScenario(String),
    #[error("country '{0}' is not in the catalog")]
    UnknownCountry(String),
}

// =============================================================================
// Watchlist Store
// =============================================================================

pub struct ScenarioStore {
    scenarios: Vec<Scenario>,
    catalog: Vec<Country>,
    active: usize,
    removed: HashSet<String>,
    added: Vec<Country>,
}

impl ScenarioStore {
    /// Store over the built-in demo scenarios, starting on the default one
    pub fn new() -> Self {
        Self::with_scenarios(mock_data::demo_scenarios(), mock_data::country_catalog())
    }

    /// Store over arbitrary scenarios. The first scenario starts active.
    ///
    /// # Panics
    /// If `scenarios` is empty.
    pub fn with_scenarios(scenarios: Vec<Scenario>, catalog: Vec<Country>) -> Self {
        assert!(!scenarios.is_empty(), "at least one scenario is required");
        Self {
            scenarios,
            catalog,
            active: 0,
            removed: HashSet::new(),
            added: Vec::new(),
        }
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// The active scenario as loaded, before watchlist edits
    pub fn active(&self) -> &Scenario {
        &self.scenarios[self.active]
    }

    pub fn catalog(&self) -> &[Country] {
        &self.catalog
    }

    /// Switch scenarios. Watchlist edits made under the previous scenario
    /// are discarded.
    pub fn set_scenario(&mut self, id: &str) -> Result<(), ScenarioError> {
        let index = self
            .scenarios
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| ScenarioError::UnknownScenario(id.to_string()))?;

        self.active = index;
        self.removed.clear();
        self.added.clear();
        log::info!("scenario switched to {}", id);
        Ok(())
    }

    /// Add a catalog country to the watchlist.
    ///
    /// Re-adding a removed base country restores the base entry in its
    /// original position instead of appending a duplicate.
    pub fn add_country(&mut self, code: &str) -> Result<(), ScenarioError> {
        let code = code.trim().to_uppercase();
        if self.removed.remove(&code) {
            log::debug!("{} restored to base watchlist", code);
            return Ok(());
        }
        if self.contains(&code) {
            return Ok(());
        }

        let country = self
            .catalog
            .iter()
            .find(|c| c.code == code)
            .cloned()
            .ok_or_else(|| ScenarioError::UnknownCountry(code.clone()))?;
        log::debug!("{} added to watchlist", code);
        self.added.push(country);
        Ok(())
    }

    /// Remove a country from the watchlist. Codes not on it are ignored.
    pub fn remove_country(&mut self, code: &str) {
        let code = code.trim().to_uppercase();
        if self.active().contains(&code) {
            self.removed.insert(code.clone());
        }
        self.added.retain(|c| c.code != code);
    }

    /// `(base - removed) ++ added`, one entry per code
    pub fn watchlist(&self) -> Vec<Country> {
        let mut seen = HashSet::new();
        self.active()
            .countries
            .iter()
            .filter(|c| !self.removed.contains(&c.code))
            .chain(self.added.iter())
            .filter(|c| seen.insert(c.code.clone()))
            .cloned()
            .collect()
    }

    pub fn contains(&self, code: &str) -> bool {
        let base = self.active().contains(code) && !self.removed.contains(code);
        base || self.added.iter().any(|c| c.code == code)
    }

    pub fn find_country(&self, code: &str) -> Option<Country> {
        let code = code.trim().to_uppercase();
        self.watchlist().into_iter().find(|c| c.code == code)
    }

    /// Catalog countries not currently on the watchlist
    pub fn available_to_add(&self) -> Vec<Country> {
        self.catalog
            .iter()
            .filter(|c| !self.contains(&c.code))
            .cloned()
            .collect()
    }

    /// The active scenario with its country list replaced by the watchlist
    pub fn effective_scenario(&self) -> Scenario {
        Scenario {
            countries: self.watchlist(),
            ..self.active().clone()
        }
    }
}

impl Default for ScenarioStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared owner of the scenario state, handed to every view that needs it
#[derive(Clone, Default)]
pub struct ScenarioHandle {
    inner: Arc<RwLock<ScenarioStore>>,
}

impl ScenarioHandle {
    pub fn new(store: ScenarioStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn set_scenario(&self, id: &str) -> Result<(), ScenarioError> {
        self.inner.write().set_scenario(id)
    }

    pub fn add_country(&self, code: &str) -> Result<(), ScenarioError> {
        self.inner.write().add_country(code)
    }

    pub fn remove_country(&self, code: &str) {
        self.inner.write().remove_country(code)
    }

    pub fn watchlist(&self) -> Vec<Country> {
        self.inner.read().watchlist()
    }

    pub fn active_id(&self) -> String {
        self.inner.read().active().id.clone()
    }

    pub fn find_country(&self, code: &str) -> Option<Country> {
        self.inner.read().find_country(code)
    }

    pub fn effective_scenario(&self) -> Scenario {
        self.inner.read().effective_scenario()
    }

    /// Run a read-only closure against the store
    pub fn read<R>(&self, f: impl FnOnce(&ScenarioStore) -> R) -> R {
        f(&self.inner.read())
    }
}
