//! Country risk model
//!
//! A [`Country`] is the row every dashboard panel renders: watchlist table,
//! map marker, detail panel. Countries are plain values; a refresh replaces
//! the whole list.

use sentinel_map::GeoPoint;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Five-bucket ordinal classification of a 0-100 risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    Elevated,
    High,
    Critical,
}

impl RiskLevel {
    /// Bucket a score. Monotonic: a higher score never yields a lower level.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            RiskLevel::Critical
        } else if score >= 70.0 {
            RiskLevel::High
        } else if score >= 40.0 {
            RiskLevel::Elevated
        } else if score >= 25.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    /// Half-open score band `[lower, upper)` covered by this level
    pub fn band(&self) -> (f64, f64) {
        match self {
            RiskLevel::Low => (0.0, 25.0),
            RiskLevel::Moderate => (25.0, 40.0),
            RiskLevel::Elevated => (40.0, 70.0),
            RiskLevel::High => (70.0, 80.0),
            RiskLevel::Critical => (80.0, f64::INFINITY),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::Elevated => "ELEVATED",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }

    pub fn is_high_plus(&self) -> bool {
        *self >= RiskLevel::High
    }

    pub fn all() -> &'static [RiskLevel] {
        &[
            RiskLevel::Critical,
            RiskLevel::High,
            RiskLevel::Elevated,
            RiskLevel::Moderate,
            RiskLevel::Low,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Trend {
    #[serde(rename = "ESCALATING")]
    Escalating,
    #[default]
    #[serde(rename = "STABLE")]
    Stable,
    #[serde(rename = "DE-ESCALATING")]
    DeEscalating,
}

impl Trend {
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Escalating => "ESCALATING",
            Trend::Stable => "STABLE",
            Trend::DeEscalating => "DE-ESCALATING",
        }
    }
}

/// Anomaly / alert severity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    Low,
    Med,
    High,
}

impl Severity {
    /// Tier for a 0-1 anomaly score when the backend does not send one
    pub fn from_anomaly_score(score: f64) -> Self {
        if score >= 0.75 {
            Severity::High
        } else if score >= 0.5 {
            Severity::Med
        } else {
            Severity::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Med => "MED",
            Severity::High => "HIGH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Anomaly {
    pub detected: bool,
    /// Deviation from the country's own baseline, 0-1
    pub score: f64,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubScores {
    pub conflict_intensity: f64,
    pub social_unrest: f64,
    pub economic_stress: f64,
}

impl SubScores {
    pub fn mean(&self) -> f64 {
        (self.conflict_intensity + self.social_unrest + self.economic_stress) / 3.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Forecast {
    #[serde(rename = "score30d")]
    pub score_30d: f64,
    #[serde(rename = "score60d")]
    pub score_60d: f64,
    #[serde(rename = "score90d")]
    pub score_90d: f64,
}

/// A monitored country as rendered by every dashboard panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub code: String,
    pub name: String,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub trend: Trend,
    #[serde(default)]
    pub anomaly: Anomaly,
    #[serde(default)]
    pub sub_scores: SubScores,
    #[serde(default)]
    pub forecast: Forecast,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

impl Country {
    /// Build a country whose level is derived from its score
    pub fn new(code: &str, name: &str, risk_score: f64) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
            trend: Trend::Stable,
            anomaly: Anomaly::default(),
            sub_scores: SubScores::default(),
            forecast: Forecast::default(),
            location: None,
        }
    }

    pub fn is_level_consistent(&self) -> bool {
        self.risk_level == RiskLevel::from_score(self.risk_score)
    }

    /// Clamp the score into [0, 100] and make the level agree with it.
    ///
    /// Applied to every country before it reaches a view; a backend or
    /// fixture that disagrees with the bucketing gets corrected, not shown.
    pub fn normalized(mut self) -> Self {
        let score = if self.risk_score.is_finite() {
            self.risk_score.clamp(0.0, 100.0)
        } else {
            0.0
        };
        self.risk_score = score;
        let level = RiskLevel::from_score(score);
        if level != self.risk_level {
            log::warn!(
                "{}: level {} contradicts score {}; showing {}",
                self.code,
                self.risk_level.label(),
                score,
                level.label()
            );
            self.risk_level = level;
        }
        self.code = self.code.trim().to_uppercase();
        self.anomaly.score = self.anomaly.score.clamp(0.0, 1.0);
        self
    }

    pub fn is_high_plus(&self) -> bool {
        self.risk_level.is_high_plus()
    }

    /// Composite column of the watchlist table
    pub fn composite_sub_score(&self) -> f64 {
        self.sub_scores.mean()
    }

    /// Projected 90-day movement in score points
    pub fn forecast_delta(&self) -> f64 {
        self.forecast.score_90d - self.risk_score
    }
}

/// Normalize a list and drop repeated codes (first occurrence wins)
pub fn normalize_all(countries: Vec<Country>) -> Vec<Country> {
    let mut seen = HashSet::new();
    countries
        .into_iter()
        .map(Country::normalized)
        .filter(|c| seen.insert(c.code.clone()))
        .collect()
}

/// Highest score first; ties broken by code for a stable table
pub fn sort_by_risk(countries: &mut [Country]) {
    countries.sort_by(|a, b| {
        b.risk_score
            .partial_cmp(&a.risk_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.code.cmp(&b.code))
    });
}
