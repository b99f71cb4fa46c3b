//! Sentinel - headless core of a geopolitical-risk dashboard
//!
//! Everything the dashboard pages do besides drawing: talking to the risk
//! backend, layering the user's watchlist over a demo scenario, loading
//! page sections without letting stale responses win, and driving the map.
//!
//! # Modules
//!
//! - [`api`]: async REST client and wire types
//! - [`country`]: country risk model and level bucketing
//! - [`scenario`]: demo scenarios and the watchlist store
//! - [`view_model`]: generation-guarded page sections
//! - [`dashboard`]: the dashboard's sections and KPI aggregation
//! - [`globe`]: map page selection and layer controller
//! - [`navigation`]: routes, history and not-found handling
//! - [`settings`]: environment config and persisted preferences

pub mod api;
pub mod country;
pub mod dashboard;
pub mod globe;
pub mod mock_data;
pub mod navigation;
pub mod scenario;
pub mod settings;
pub mod view_model;

#[cfg(test)]
mod tests;

pub use api::{ApiError, SentinelClient};
pub use country::{Country, RiskLevel};
pub use scenario::{ScenarioHandle, ScenarioStore};
