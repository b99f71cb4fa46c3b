//! Dashboard view model
//!
//! Provides the state behind the command-center dashboard:
//! - KPI strip and country risk table (fetched together)
//! - Risk signal decomposition (sub-scores)
//! - Alert feed
//! - Anomaly list
//! - Recent news activity
//! - Per-country analysis and forecast for the selected country

use crate::api::{
    AnalyzeResult, AnomalyResult, DashboardAlert, DashboardKpis, DashboardSubScores,
    DashboardSummary, ForecastResult, RecentActivityResponse,
};
use crate::country::{self, Country, Severity};
use crate::mock_data;
use crate::view_model::{DataSource, Section};
use std::sync::Arc;
use tokio::task::JoinHandle;

// =============================================================================
// Data Models
// =============================================================================

/// Headline numbers of the KPI strip
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KpiStrip {
    pub global_threat_index: f64,
    pub global_threat_index_delta: f64,
    pub active_anomalies: u32,
    pub high_plus_countries: u32,
    pub high_plus_countries_delta: i32,
    pub escalation_alerts_24h: u32,
}

impl KpiStrip {
    pub fn from_summary(summary: &DashboardSummary) -> Self {
        Self {
            global_threat_index: summary.global_threat_index,
            global_threat_index_delta: summary.global_threat_index_delta,
            active_anomalies: summary.active_anomalies,
            high_plus_countries: summary.high_plus_countries,
            high_plus_countries_delta: summary.high_plus_countries_delta,
            escalation_alerts_24h: summary.escalation_alerts_24h,
        }
    }
}

/// KPI strip aggregated from a country list alone, the same way the backend
/// aggregates its monitored set. Deltas are zero: there is no previous run.
pub fn local_kpis(countries: &[Country]) -> KpiStrip {
    let global_threat_index = if countries.is_empty() {
        0.0
    } else {
        let total: f64 = countries.iter().map(|c| c.risk_score).sum();
        (total / countries.len() as f64).round()
    };

    KpiStrip {
        global_threat_index,
        global_threat_index_delta: 0.0,
        active_anomalies: countries.iter().filter(|c| c.anomaly.detected).count() as u32,
        high_plus_countries: countries.iter().filter(|c| c.is_high_plus()).count() as u32,
        high_plus_countries_delta: 0,
        escalation_alerts_24h: countries.iter().filter(|c| c.anomaly.score > 0.5).count() as u32,
    }
}

/// KPI strip, full KPI object and the risk table, loaded as one unit
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub strip: KpiStrip,
    pub kpis: DashboardKpis,
    /// Highest risk first
    pub countries: Vec<Country>,
}

impl DashboardData {
    pub fn from_remote(kpis: DashboardKpis, summary: DashboardSummary) -> Self {
        let strip = KpiStrip::from_summary(&summary);
        let mut countries =
            country::normalize_all(summary.countries.into_iter().map(Country::from).collect());
        country::sort_by_risk(&mut countries);
        Self {
            strip,
            kpis,
            countries,
        }
    }

    /// Shown before the first load and whenever the backend is unreachable
    pub fn fallback() -> Self {
        let mut countries = mock_data::fallback_countries();
        country::sort_by_risk(&mut countries);
        Self {
            strip: local_kpis(&countries),
            kpis: DashboardKpis::default(),
            countries,
        }
    }

    pub fn high_plus(&self) -> impl Iterator<Item = &Country> {
        self.countries.iter().filter(|c| c.is_high_plus())
    }
}

// =============================================================================
// Dashboard View Model
// =============================================================================

pub struct DashboardViewModel<D: DataSource> {
    pub dashboard: Section<DashboardData>,
    pub sub_scores: Section<Option<DashboardSubScores>>,
    pub alerts: Section<Vec<DashboardAlert>>,
    pub anomalies: Section<Vec<AnomalyResult>>,
    pub recent_activity: Section<RecentActivityResponse>,

    /// Keyed by the selected country
    pub analysis: Section<Option<AnalyzeResult>>,
    pub forecast: Section<Option<ForecastResult>>,

    selected: Option<String>,
    source: Arc<D>,
}

impl<D: DataSource> DashboardViewModel<D> {
    pub fn new(source: Arc<D>) -> Self {
        Self {
            dashboard: Section::new("dashboard", DashboardData::fallback()),
            sub_scores: Section::new("sub-scores", None),
            alerts: Section::new("alerts", Vec::new()),
            anomalies: Section::new("anomalies", Vec::new()),
            recent_activity: Section::new("recent-activity", RecentActivityResponse::default()),
            analysis: Section::idle("analysis", None),
            forecast: Section::idle("forecast", None),
            selected: None,
            source,
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Reload every dashboard-level section. Per-country sections are driven
    /// by [`DashboardViewModel::select_country`].
    pub fn refresh(&self) -> Vec<JoinHandle<()>> {
        vec![
            self.load_dashboard(),
            self.load_sub_scores(),
            self.load_alerts(),
            self.load_anomalies(),
            self.load_recent_activity(),
        ]
    }

    /// Change the country the analysis and forecast panels describe.
    ///
    /// Any request for the previous country is superseded; `None` reverts
    /// both panels to empty.
    pub fn select_country(&mut self, country: Option<&Country>) -> Vec<JoinHandle<()>> {
        let Some(country) = country else {
            self.selected = None;
            self.analysis.reset();
            self.forecast.reset();
            return Vec::new();
        };

        self.selected = Some(country.code.clone());

        let source = Arc::clone(&self.source);
        let (name, code) = (country.name.clone(), country.code.clone());
        let analysis = self.analysis.load(async move {
            source.analyze(&name, &code).await.map(Some)
        });

        let source = Arc::clone(&self.source);
        let (name, code) = (country.name.clone(), country.code.clone());
        let forecast = self.forecast.load(async move {
            source.forecast(&name, &code).await.map(Some)
        });

        vec![analysis, forecast]
    }

    fn load_dashboard(&self) -> JoinHandle<()> {
        let source = Arc::clone(&self.source);
        self.dashboard.load(async move {
            let (kpis, summary) =
                tokio::try_join!(source.dashboard_kpis(), source.dashboard_summary())?;
            Ok::<_, crate::api::ApiError>(DashboardData::from_remote(kpis, summary))
        })
    }

    fn load_sub_scores(&self) -> JoinHandle<()> {
        let source = Arc::clone(&self.source);
        self.sub_scores
            .load(async move { source.sub_scores().await.map(Some) })
    }

    fn load_alerts(&self) -> JoinHandle<()> {
        let source = Arc::clone(&self.source);
        self.alerts.load(async move { source.alerts().await })
    }

    fn load_anomalies(&self) -> JoinHandle<()> {
        let source = Arc::clone(&self.source);
        self.anomalies.load(async move { source.anomalies().await })
    }

    fn load_recent_activity(&self) -> JoinHandle<()> {
        let source = Arc::clone(&self.source);
        self.recent_activity
            .load(async move { source.recent_activity().await })
    }

    /// Anomalies at the given tier or above, most severe first
    pub fn anomalies_at_least(&self, severity: Severity) -> Vec<AnomalyResult> {
        self.anomalies.read(|state| {
            let mut list: Vec<AnomalyResult> = state
                .data
                .iter()
                .filter(|a| a.is_anomaly && a.severity >= severity)
                .cloned()
                .collect();
            list.sort_by(|a, b| {
                b.anomaly_score
                    .partial_cmp(&a.anomaly_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            list
        })
    }
}

// =============================================================================
// Text Formatting
// =============================================================================

/// Signed whole-number delta, empty when it rounds to zero
pub fn format_delta(delta: f64) -> String {
    let rounded = delta.round() as i64;
    match rounded {
        0 => String::new(),
        n if n > 0 => format!("+{}", n),
        n => n.to_string(),
    }
}

/// One-line rendering of the KPI strip
pub fn format_strip(strip: &KpiStrip) -> String {
    let gti_delta = format_delta(strip.global_threat_index_delta);
    let high_delta = format_delta(strip.high_plus_countries_delta as f64);
    format!(
        "GTI {}{} | anomalies {} | HIGH+ {}{} | escalations 24h {}",
        strip.global_threat_index,
        if gti_delta.is_empty() { String::new() } else { format!(" ({})", gti_delta) },
        strip.active_anomalies,
        strip.high_plus_countries,
        if high_delta.is_empty() { String::new() } else { format!(" ({})", high_delta) },
        strip.escalation_alerts_24h,
    )
}

// =============================================================================
// Tests
// =============================================================================
