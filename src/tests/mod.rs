//! Test modules for the Sentinel dashboard core
//!
//! ## Test Categories
//!
//! - **Unit Tests**: Individual module functionality
//!   - `country_test` - Risk level bucketing and normalization
//!   - `scenario_test` - Watchlist store transitions
//!   - `view_model_test` - Section loading, fallback and stale results
//!   - `dashboard_test` - Dashboard sections, selection and local KPIs
//!   - `globe_test` - Selection toggle, layers and map lifecycle
//!   - `navigation_test` - Routes, history and country resolution
//!   - `settings_test` - Environment config and preferences file
//!
//! - **Integration Tests**: Against a local HTTP backend
//!   - `api_test` - Client requests, status and body errors
//!   - `integration_test` - Dashboard view model over the real client
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all tests
//! cargo test --workspace
//!
//! # Run specific test module
//! cargo test scenario_test
//! ```

#[cfg(test)]
pub mod country_test;





#[cfg(test)]
pub mod navigation_test;

#[cfg(test)]
pub mod settings_test;



#[cfg(test)]
pub mod support;
