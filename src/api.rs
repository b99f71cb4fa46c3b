//! API client for the Sentinel risk backend
//!
//! One async method per backend endpoint. The client does no computation
//! beyond decoding bodies: no retry, no caching, no de-duplication of
//! concurrent requests.

use crate::country::{Anomaly, Country, Forecast, RiskLevel, Severity, Trend};
use crate::settings::AppConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// API client for the Sentinel backend
#[derive(Clone)]
pub struct SentinelClient {
    base_url: String,
    client: reqwest::Client,
}

impl SentinelClient {
    /// Create a new client with default localhost URL
    pub fn new() -> Self {
        Self::with_url(DEFAULT_BASE_URL)
    }

    /// Create a new client with custom base URL
    pub fn with_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_base_url(base_url.into()),
            client: reqwest::Client::new(),
        }
    }

    /// Create a shared client for handing to several view models
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Client for the configured backend with the configured request timeout
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::with_timeout(config.api_url.clone(), config.request_timeout())
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            base_url: trim_base_url(base_url.into()),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // Dashboard

    /// Get the precomputed dashboard summary
    pub async fn get_dashboard_summary(&self) -> Result<DashboardSummary, ApiError> {
        let url = format!("{}/api/dashboard/summary", self.base_url);
        self.get_json(&url).await
    }

    /// Get the full KPI object
    pub async fn get_dashboard_kpis(&self) -> Result<DashboardKpis, ApiError> {
        let url = format!("{}/api/dashboard/kpis", self.base_url);
        self.get_json(&url).await
    }

    /// Get per-metric KPI time series
    pub async fn get_dashboard_kpi_history(&self) -> Result<KpiHistory, ApiError> {
        let url = format!("{}/api/dashboard/kpis/history", self.base_url);
        self.get_json(&url).await
    }

    pub async fn get_dashboard_sub_scores(&self) -> Result<DashboardSubScores, ApiError> {
        let url = format!("{}/api/dashboard/sub-scores", self.base_url);
        self.get_json(&url).await
    }

    pub async fn get_dashboard_alerts(&self) -> Result<DashboardAlertsResponse, ApiError> {
        let url = format!("{}/api/dashboard/alerts", self.base_url);
        self.get_json(&url).await
    }

    // Countries

    /// Get precomputed risk scores for every monitored country
    pub async fn get_countries(&self) -> Result<Vec<CountryRisk>, ApiError> {
        let url = format!("{}/api/countries", self.base_url);
        self.get_json(&url).await
    }

    /// Run the full analysis for one country
    pub async fn analyze_country(
        &self,
        country: &str,
        country_code: &str,
    ) -> Result<AnalyzeResult, ApiError> {
        let url = format!("{}/api/analyze", self.base_url);
        self.post_json(&url, &CountryRequest::new(country, country_code))
            .await
    }

    pub async fn get_forecast(
        &self,
        country: &str,
        country_code: &str,
    ) -> Result<ForecastResult, ApiError> {
        let url = format!("{}/api/forecast", self.base_url);
        self.post_json(&url, &CountryRequest::new(country, country_code))
            .await
    }

    pub async fn get_anomalies(&self) -> Result<Vec<AnomalyResult>, ApiError> {
        let url = format!("{}/api/anomalies", self.base_url);
        self.get_json(&url).await
    }

    /// Get news-derived activity. A missing news key is reported in the
    /// body's `error` field, not as a failed request.
    pub async fn get_recent_activity(&self) -> Result<RecentActivityResponse, ApiError> {
        let url = format!("{}/api/recent-activity", self.base_url);
        self.get_json(&url).await
    }

    pub async fn get_track_record(&self) -> Result<TrackRecord, ApiError> {
        let url = format!("{}/api/track-record", self.base_url);
        self.get_json(&url).await
    }

    /// Health check
    pub async fn health_check(&self) -> Result<HealthResponse, ApiError> {
        let url = format!("{}/health", self.base_url);
        self.get_json(&url).await
    }

    // Transport

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        decode(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        log::debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        decode(response).await
    }
}

impl Default for SentinelClient {
    fn default() -> Self {
        Self::new()
    }
}

fn trim_base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !status.is_success() {
        let message = error_detail(&body)
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&body).map_err(|e| ApiError::Parse(e.to_string()))
}

/// FastAPI puts the reason for an HTTPException in `detail`
fn error_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// API error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Transport failure: connection refused, timeout, broken body
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx response
    #[error("API error: {status} {message}")]
    Status { status: u16, message: String },
    /// Body did not match the expected shape
    #[error("unexpected response body: {0}")]
    Parse(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// =============================================================================
// Request / Response types
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRequest {
    pub country: String,
    pub country_code: String,
}

impl CountryRequest {
    pub fn new(country: &str, country_code: &str) -> Self {
        Self {
            country: country.to_string(),
            country_code: country_code.to_string(),
        }
    }
}

/// Row of `/api/countries`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRisk {
    pub country_code: String,
    pub country: String,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
}

impl From<CountryRisk> for Country {
    fn from(row: CountryRisk) -> Self {
        let mut country = Country::new(&row.country_code, &row.country, row.risk_score);
        country.risk_level = row.risk_level;
        country.normalized()
    }
}

// Dashboard summary

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCountry {
    pub code: String,
    pub name: String,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub is_anomaly: bool,
    #[serde(default)]
    pub anomaly_score: f64,
}

impl From<DashboardCountry> for Country {
    fn from(row: DashboardCountry) -> Self {
        let mut country = Country::new(&row.code, &row.name, row.risk_score);
        country.risk_level = row.risk_level;
        country.anomaly = Anomaly {
            detected: row.is_anomaly,
            score: row.anomaly_score,
            severity: Severity::from_anomaly_score(row.anomaly_score),
        };
        country.normalized()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub global_threat_index: f64,
    #[serde(default)]
    pub global_threat_index_delta: f64,
    pub active_anomalies: u32,
    pub high_plus_countries: u32,
    #[serde(default)]
    pub high_plus_countries_delta: i32,
    #[serde(rename = "escalationAlerts24h")]
    pub escalation_alerts_24h: u32,
    /// Accuracy percentage on recent backends, an object on older ones
    #[serde(default)]
    pub model_health: Option<serde_json::Value>,
    #[serde(default)]
    pub countries: Vec<DashboardCountry>,
    #[serde(default)]
    pub computed_at: Option<String>,
}

// Dashboard KPIs

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalThreatIndex {
    pub score: f64,
    #[serde(rename = "delta24h")]
    pub delta_24h: f64,
    pub trend: Trend,
    pub top_contributors: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeverityCounts {
    #[serde(rename = "HIGH")]
    pub high: u32,
    #[serde(rename = "MED")]
    pub med: u32,
    #[serde(rename = "LOW")]
    pub low: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActiveAnomalies {
    pub total: u32,
    pub by_severity: SeverityCounts,
    pub countries: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskDistribution {
    /// Level label to number of countries at that level
    pub distribution: BTreeMap<String, u32>,
    pub total_countries: u32,
    pub recent_changes: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegionalRisk {
    pub region: String,
    pub avg_risk: f64,
    pub anomalies: u32,
    pub escalations: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EscalationAlerts {
    pub count: u32,
    pub alerts: Vec<DashboardAlert>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SourcesActive {
    pub active: u32,
    pub total: u32,
    pub sources: Vec<serde_json::Value>,
}

/// `/api/dashboard/kpis`. `Default` is the empty strip shown before the
/// first load.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardKpis {
    pub global_threat_index: GlobalThreatIndex,
    pub active_anomalies: ActiveAnomalies,
    pub risk_distribution: RiskDistribution,
    pub regional_breakdown: Vec<RegionalRisk>,
    pub escalation_alerts: EscalationAlerts,
    pub sources_active: SourcesActive,
    pub computed_at: String,
}

/// Named series to values, oldest first
pub type KpiHistory = BTreeMap<String, Vec<f64>>;

// Sub-scores

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SubScoreItem {
    pub value: f64,
    pub delta: f64,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubScoreSet {
    pub conflict_intensity: SubScoreItem,
    pub social_unrest: SubScoreItem,
    pub economic_stress: SubScoreItem,
    pub humanitarian: SubScoreItem,
    pub media_sentiment: SubScoreItem,
}

impl SubScoreSet {
    /// `(label, item)` pairs in card order
    pub fn items(&self) -> [(&'static str, &SubScoreItem); 5] {
        [
            ("Conflict Intensity", &self.conflict_intensity),
            ("Social Unrest", &self.social_unrest),
            ("Economic Stress", &self.economic_stress),
            ("Humanitarian", &self.humanitarian),
            ("Media & Sentiment", &self.media_sentiment),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSubScores {
    pub sub_scores: SubScoreSet,
    #[serde(default)]
    pub computed_at: Option<String>,
}

// Alerts

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardAlert {
    #[serde(rename = "type")]
    pub kind: String,
    pub country: String,
    pub code: String,
    pub detail: String,
    pub time: String,
    /// Free-form tier; alert feeds also use ELEVATED
    pub severity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardAlertsResponse {
    pub alerts: Vec<DashboardAlert>,
}

// Analysis

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CausalStep {
    pub step: u32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub data_source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MlMetadata {
    pub risk_score: f64,
    pub confidence: f64,
    pub risk_level: Option<String>,
    pub anomaly_detected: bool,
    pub anomaly_score: f64,
    pub sentiment_label: String,
    pub escalatory_pct: f64,
    pub top_drivers: Vec<String>,
    pub data_sources: Vec<String>,
    pub model_version: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResult {
    pub risk_score: f64,
    /// As written by the brief generator; see [`AnalyzeResult::level`]
    pub risk_level: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_factors: Vec<String>,
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub watch_list: Vec<String>,
    #[serde(default)]
    pub causal_chain: Vec<CausalStep>,
    #[serde(default)]
    pub ml_metadata: Option<MlMetadata>,
    #[serde(default)]
    pub sub_scores: Option<SubScoreSet>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl AnalyzeResult {
    /// Level to display, always the bucket of the score
    pub fn level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score.clamp(0.0, 100.0))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(rename = "forecast_30d")]
    pub forecast_30d: f64,
    #[serde(rename = "forecast_60d")]
    pub forecast_60d: f64,
    #[serde(rename = "forecast_90d")]
    pub forecast_90d: f64,
    #[serde(default)]
    pub trend: Trend,
}

impl From<&ForecastResult> for Forecast {
    fn from(result: &ForecastResult) -> Self {
        Forecast {
            score_30d: result.forecast_30d,
            score_60d: result.forecast_60d,
            score_90d: result.forecast_90d,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyResult {
    pub country_code: String,
    pub country: String,
    pub anomaly_score: f64,
    pub is_anomaly: bool,
    pub severity: Severity,
}

impl From<&AnomalyResult> for Anomaly {
    fn from(result: &AnomalyResult) -> Self {
        Anomaly {
            detected: result.is_anomaly,
            score: result.anomaly_score.clamp(0.0, 1.0),
            severity: result.severity,
        }
    }
}

// Recent activity

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityItem {
    pub title: String,
    pub source: Option<String>,
    pub url: Option<String>,
    pub country: Option<String>,
    pub code: Option<String>,
    pub time: Option<String>,
    pub sentiment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecentActivityResponse {
    #[serde(alias = "articles")]
    pub items: Vec<ActivityItem>,
    pub error: Option<String>,
}

impl RecentActivityResponse {
    pub fn issue(&self) -> Option<ActivityIssue> {
        self.error.as_deref().map(ActivityIssue::from_code)
    }
}

/// Condition reported in the recent-activity `error` field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityIssue {
    NoApiKey,
    InvalidApiKey,
    Other(String),
}

impl ActivityIssue {
    pub fn from_code(code: &str) -> Self {
        match code {
            "no_api_key" | "missing_api_key" => ActivityIssue::NoApiKey,
            "invalid_api_key" => ActivityIssue::InvalidApiKey,
            other => ActivityIssue::Other(other.to_string()),
        }
    }

    /// Text shown in place of the activity feed
    pub fn message(&self) -> String {
        match self {
            ActivityIssue::NoApiKey => {
                "News feed unavailable: no news API key is configured on the backend.".to_string()
            }
            ActivityIssue::InvalidApiKey => {
                "News feed unavailable: the backend's news API key was rejected.".to_string()
            }
            ActivityIssue::Other(code) => format!("News feed unavailable ({})", code),
        }
    }
}

// Health / track record

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HealthResponse {
    pub status: String,
    pub api: bool,
    pub ml: bool,
    pub version: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackRecord {
    pub predictions: Vec<serde_json::Value>,
    pub accuracy: Option<serde_json::Value>,
}

impl TrackRecord {
    pub fn accuracy_pct(&self) -> Option<f64> {
        self.accuracy.as_ref()?.get("accuracy_pct")?.as_f64()
    }
}
