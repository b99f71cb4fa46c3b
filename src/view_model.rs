//! View-model sections
//!
//! A [`Section`] is one independently loaded panel of a page. Its state is
//! always renderable: before the first result, and after any failure, it
//! holds the section's fallback value.
//!
//! Every `load` takes a ticket from the section's generation counter. A
//! result is applied only while its ticket is still current, so a slow
//! response can never overwrite the state produced by a newer request, and
//! nothing is applied after the section is cancelled or dropped.

use crate::api::{
    AnalyzeResult, AnomalyResult, ApiError, DashboardAlert, DashboardKpis, DashboardSubScores,
    DashboardSummary, ForecastResult, RecentActivityResponse, SentinelClient,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

// =============================================================================
// Load State
// =============================================================================

/// Coarse status of a section, for choosing spinner / data / error chrome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested (a per-country panel with no country selected)
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

/// What a view renders. `data` is never absent; on failure it is the
/// section's fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    pub data: T,
    pub loading: bool,
    pub error: bool,
}

impl<T> ViewState<T> {
    pub fn load_state(&self) -> LoadState {
        match (self.loading, self.error) {
            (true, _) => LoadState::Loading,
            (false, true) => LoadState::Error,
            (false, false) => LoadState::Loaded,
        }
    }
}

// =============================================================================
// Section
// =============================================================================

pub struct Section<T> {
    name: &'static str,
    fallback: T,
    state: Arc<RwLock<ViewState<T>>>,
    generation: Arc<AtomicU64>,
    idle: AtomicBool,
}

impl<T> Section<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// New section showing `fallback` in the loading state
    pub fn new(name: &'static str, fallback: T) -> Self {
        Self {
            name,
            state: Arc::new(RwLock::new(ViewState {
                data: fallback.clone(),
                loading: true,
                error: false,
            })),
            fallback,
            generation: Arc::new(AtomicU64::new(0)),
            idle: AtomicBool::new(false),
        }
    }

    /// New section that waits for input before loading anything
    pub fn idle(name: &'static str, fallback: T) -> Self {
        let section = Self::new(name, fallback);
        section.state.write().loading = false;
        section.idle.store(true, Ordering::SeqCst);
        section
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fallback(&self) -> &T {
        &self.fallback
    }

    pub fn snapshot(&self) -> ViewState<T> {
        self.state.read().clone()
    }

    /// Borrow the current state without cloning the data
    pub fn read<R>(&self, f: impl FnOnce(&ViewState<T>) -> R) -> R {
        f(&self.state.read())
    }

    pub fn load_state(&self) -> LoadState {
        if self.idle.load(Ordering::SeqCst) {
            return LoadState::Idle;
        }
        self.state.read().load_state()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// Current request ticket; bumps on every load and cancel
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Start a request and supersede any in flight.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn load<F, E>(&self, request: F) -> JoinHandle<()>
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let ticket = {
            let mut state = self.state.write();
            state.loading = true;
            self.idle.store(false, Ordering::SeqCst);
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };
        log::debug!("{}: load #{}", self.name, ticket);

        let name = self.name;
        let fallback = self.fallback.clone();
        let state = Arc::clone(&self.state);
        let generation = Arc::clone(&self.generation);

        tokio::spawn(async move {
            let result = request.await;

            let mut state = state.write();
            if generation.load(Ordering::SeqCst) != ticket {
                log::debug!("{}: discarding stale result #{}", name, ticket);
                return;
            }
            match result {
                Ok(data) => {
                    state.data = data;
                    state.error = false;
                }
                Err(e) => {
                    log::warn!("{}: load failed, showing fallback: {}", name, e);
                    state.data = fallback;
                    state.error = true;
                }
            }
            state.loading = false;
        })
    }

    /// Supersede any in-flight request. Data and error flag are kept.
    pub fn cancel(&self) {
        let mut state = self.state.write();
        self.generation.fetch_add(1, Ordering::SeqCst);
        state.loading = false;
    }

    /// Cancel and go back to showing the fallback with no request pending
    pub fn reset(&self) {
        let mut state = self.state.write();
        self.generation.fetch_add(1, Ordering::SeqCst);
        state.data = self.fallback.clone();
        state.loading = false;
        state.error = false;
        self.idle.store(true, Ordering::SeqCst);
    }
}

impl<T> Drop for Section<T> {
    fn drop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

// =============================================================================
// Data Source
// =============================================================================

/// The backend endpoints view models consume
#[async_trait]
pub trait DataSource: Send + Sync + 'static {
    async fn dashboard_summary(&self) -> Result<DashboardSummary, ApiError>;

    async fn dashboard_kpis(&self) -> Result<DashboardKpis, ApiError>;

    async fn sub_scores(&self) -> Result<DashboardSubScores, ApiError>;

    async fn alerts(&self) -> Result<Vec<DashboardAlert>, ApiError>;

    async fn anomalies(&self) -> Result<Vec<AnomalyResult>, ApiError>;

    async fn recent_activity(&self) -> Result<RecentActivityResponse, ApiError>;

    async fn analyze(&self, country: &str, code: &str) -> Result<AnalyzeResult, ApiError>;

    async fn forecast(&self, country: &str, code: &str) -> Result<ForecastResult, ApiError>;
}

#[async_trait]
impl DataSource for SentinelClient {
    async fn dashboard_summary(&self) -> Result<DashboardSummary, ApiError> {
        self.get_dashboard_summary().await
    }

    async fn dashboard_kpis(&self) -> Result<DashboardKpis, ApiError> {
        self.get_dashboard_kpis().await
    }

    async fn sub_scores(&self) -> Result<DashboardSubScores, ApiError> {
        self.get_dashboard_sub_scores().await
    }

    async fn alerts(&self) -> Result<Vec<DashboardAlert>, ApiError> {
        Ok(self.get_dashboard_alerts().await?.alerts)
    }

    async fn anomalies(&self) -> Result<Vec<AnomalyResult>, ApiError> {
        self.get_anomalies().await
    }

    async fn recent_activity(&self) -> Result<RecentActivityResponse, ApiError> {
        self.get_recent_activity().await
    }

    async fn analyze(&self, country: &str, code: &str) -> Result<AnalyzeResult, ApiError> {
        self.analyze_country(country, code).await
    }

    async fn forecast(&self, country: &str, code: &str) -> Result<ForecastResult, ApiError> {
        self.get_forecast(country, code).await
    }
}
