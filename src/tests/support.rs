//! Shared test fixtures: a throwaway HTTP backend and a scripted data source

use crate::api::*;
use crate::view_model::DataSource;
use async_trait::async_trait;
use axum::Router;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A URL nothing listens on
pub async fn dead_backend() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn unavailable() -> ApiError {
    ApiError::Network("connection refused".to_string())
}

pub fn summary_json() -> serde_json::Value {
    serde_json::json!({
        "globalThreatIndex": 61,
        "globalThreatIndexDelta": 2,
        "activeAnomalies": 2,
        "highPlusCountries": 2,
        "highPlusCountriesDelta": -1,
        "escalationAlerts24h": 2,
        "modelHealth": 91.5,
        "countries": [
            { "code": "SD", "name": "Sudan", "riskScore": 89, "riskLevel": "CRITICAL", "isAnomaly": true, "anomalyScore": 0.81 },
            { "code": "IN", "name": "India", "riskScore": 35, "riskLevel": "MODERATE", "isAnomaly": false, "anomalyScore": 0.1 },
            { "code": "IL", "name": "Israel", "riskScore": 76, "riskLevel": "HIGH", "isAnomaly": true, "anomalyScore": 0.62 }
        ],
        "computedAt": "2026-10-17T08:00:00Z"
    })
}

pub fn sample_summary() -> DashboardSummary {
    serde_json::from_value(summary_json()).unwrap()
}

pub fn sample_analysis(code: &str) -> AnalyzeResult {
    AnalyzeResult {
        risk_score: 72.0,
        risk_level: "HIGH".to_string(),
        summary: format!("analysis of {}", code),
        key_factors: vec!["armed clashes".to_string()],
        industries: Vec::new(),
        watch_list: Vec::new(),
        causal_chain: Vec::new(),
        ml_metadata: None,
        sub_scores: None,
        last_updated: None,
    }
}

pub fn sample_forecast(code: &str) -> ForecastResult {
    ForecastResult {
        country_code: Some(code.to_string()),
        country: None,
        forecast_30d: 70.0,
        forecast_60d: 72.0,
        forecast_90d: 75.0,
        trend: crate::country::Trend::Escalating,
    }
}

/// Data source with canned answers. `None` fields fail with a network error.
#[derive(Default)]
pub struct FakeSource {
    pub summary: Option<DashboardSummary>,
    pub kpis: Option<DashboardKpis>,
    pub sub_scores: Option<DashboardSubScores>,
    pub alerts: Option<Vec<DashboardAlert>>,
    pub anomalies: Option<Vec<AnomalyResult>>,
    pub activity: Option<RecentActivityResponse>,
    /// Per-code latency of analyze / forecast
    pub latency: HashMap<String, Duration>,
    pub analyze_calls: AtomicUsize,
}

impl FakeSource {
    /// Every dashboard endpoint answers
    pub fn healthy() -> Self {
        Self {
            summary: Some(sample_summary()),
            kpis: Some(DashboardKpis::default()),
            sub_scores: Some(DashboardSubScores::default()),
            alerts: Some(Vec::new()),
            anomalies: Some(Vec::new()),
            activity: Some(RecentActivityResponse::default()),
            ..Default::default()
        }
    }

    /// Every endpoint fails
    pub fn down() -> Self {
        Self::default()
    }

    async fn delay(&self, code: &str) {
        if let Some(latency) = self.latency.get(code) {
            tokio::time::sleep(*latency).await;
        }
    }
}

#[async_trait]
impl DataSource for FakeSource {
    async fn dashboard_summary(&self) -> Result<DashboardSummary, ApiError> {
        self.summary.clone().ok_or_else(unavailable)
    }

    async fn dashboard_kpis(&self) -> Result<DashboardKpis, ApiError> {
        self.kpis.clone().ok_or_else(unavailable)
    }

    async fn sub_scores(&self) -> Result<DashboardSubScores, ApiError> {
        self.sub_scores.clone().ok_or_else(unavailable)
    }

    async fn alerts(&self) -> Result<Vec<DashboardAlert>, ApiError> {
        self.alerts.clone().ok_or_else(unavailable)
    }

    async fn anomalies(&self) -> Result<Vec<AnomalyResult>, ApiError> {
        self.anomalies.clone().ok_or_else(unavailable)
    }

    async fn recent_activity(&self) -> Result<RecentActivityResponse, ApiError> {
        self.activity.clone().ok_or_else(unavailable)
    }

    async fn analyze(&self, _country: &str, code: &str) -> Result<AnalyzeResult, ApiError> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        self.delay(code).await;
        Ok(sample_analysis(code))
    }

    async fn forecast(&self, _country: &str, code: &str) -> Result<ForecastResult, ApiError> {
        self.delay(code).await;
        Ok(sample_forecast(code))
    }
}
