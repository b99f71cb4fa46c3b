//! Unit tests for the country risk model
//!
//! Tests cover:
//! - Level bucketing and its boundaries
//! - Normalization (level repair, clamping)
//! - Wire format
//! - Fixture consistency

use crate::country::*;
use crate::mock_data;

// ============================================================================
// BUCKETING TESTS
// ============================================================================

#[test]
fn test_level_boundaries() {
    assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
    assert_eq!(RiskLevel::from_score(24.9), RiskLevel::Low);
    assert_eq!(RiskLevel::from_score(25.0), RiskLevel::Moderate);
    assert_eq!(RiskLevel::from_score(39.9), RiskLevel::Moderate);
    assert_eq!(RiskLevel::from_score(40.0), RiskLevel::Elevated);
    assert_eq!(RiskLevel::from_score(69.9), RiskLevel::Elevated);
    assert_eq!(RiskLevel::from_score(70.0), RiskLevel::High);
    assert_eq!(RiskLevel::from_score(79.9), RiskLevel::High);
    assert_eq!(RiskLevel::from_score(80.0), RiskLevel::Critical);
    assert_eq!(RiskLevel::from_score(100.0), RiskLevel::Critical);
}

#[test]
fn test_level_is_monotonic() {
    let mut previous = RiskLevel::Low;
    for tenth in 0..=1000 {
        let level = RiskLevel::from_score(tenth as f64 / 10.0);
        assert!(level >= previous, "level dropped at {}", tenth as f64 / 10.0);
        previous = level;
    }
}

#[test]
fn test_seventy_plus_is_high_plus() {
    for score in 70..=100 {
        assert!(RiskLevel::from_score(score as f64).is_high_plus());
    }
    assert!(!RiskLevel::from_score(69.0).is_high_plus());
}

#[test]
fn test_band_contains_bucketed_scores() {
    for level in RiskLevel::all() {
        let (lower, _) = level.band();
        assert_eq!(RiskLevel::from_score(lower), *level);
    }
}

#[test]
fn test_severity_from_anomaly_score() {
    assert_eq!(Severity::from_anomaly_score(0.9), Severity::High);
    assert_eq!(Severity::from_anomaly_score(0.75), Severity::High);
    assert_eq!(Severity::from_anomaly_score(0.6), Severity::Med);
    assert_eq!(Severity::from_anomaly_score(0.2), Severity::Low);
}

// ============================================================================
// NORMALIZATION TESTS
// ============================================================================

#[test]
fn test_normalized_repairs_contradicting_level() {
    let mut country = Country::new("ET", "Ethiopia", 68.0);
    country.risk_level = RiskLevel::High;
    assert!(!country.is_level_consistent());

    let fixed = country.normalized();
    assert_eq!(fixed.risk_level, RiskLevel::Elevated);
    assert!(fixed.is_level_consistent());
}

#[test]
fn test_normalized_clamps_score() {
    let high = Country::new("XX", "Over", 150.0).normalized();
    assert_eq!(high.risk_score, 100.0);
    assert_eq!(high.risk_level, RiskLevel::Critical);

    let low = Country::new("YY", "Under", -5.0).normalized();
    assert_eq!(low.risk_score, 0.0);
    assert_eq!(low.risk_level, RiskLevel::Low);

    let nan = Country::new("ZZ", "Broken", f64::NAN).normalized();
    assert_eq!(nan.risk_score, 0.0);
    assert_eq!(nan.risk_level, RiskLevel::Low);
}

#[test]
fn test_normalized_uppercases_code() {
    let country = Country::new(" ua ", "Ukraine", 87.0).normalized();
    assert_eq!(country.code, "UA");
}

#[test]
fn test_normalize_all_keeps_first_duplicate() {
    let list = normalize_all(vec![
        Country::new("IR", "Iran", 78.0),
        Country::new("UA", "Ukraine", 87.0),
        Country::new("ir", "Iran (stale)", 50.0),
    ]);
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].name, "Iran");
    assert_eq!(list[0].risk_score, 78.0);
}

#[test]
fn test_sort_by_risk() {
    let mut list = vec![
        Country::new("BR", "Brazil", 28.0),
        Country::new("UA", "Ukraine", 87.0),
        Country::new("AF", "Afghanistan", 87.0),
        Country::new("PK", "Pakistan", 62.0),
    ];
    sort_by_risk(&mut list);
    let codes: Vec<&str> = list.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["AF", "UA", "PK", "BR"]);
}

#[test]
fn test_composite_and_forecast_delta() {
    let mut country = Country::new("IQ", "Iraq", 81.0);
    country.sub_scores = SubScores {
        conflict_intensity: 88.0,
        social_unrest: 74.0,
        economic_stress: 69.0,
    };
    country.forecast.score_90d = 84.0;
    assert!((country.composite_sub_score() - 77.0).abs() < 1e-9);
    assert_eq!(country.forecast_delta(), 3.0);
}

// ============================================================================
// WIRE FORMAT TESTS
// ============================================================================

#[test]
fn test_country_deserialization() {
    let json = r#"{
        "code": "IL",
        "name": "Israel",
        "riskScore": 76,
        "riskLevel": "HIGH",
        "trend": "DE-ESCALATING",
        "anomaly": { "detected": true, "score": 0.62, "severity": "MED" },
        "subScores": { "conflictIntensity": 84, "socialUnrest": 61, "economicStress": 47 },
        "forecast": { "score30d": 73, "score60d": 71, "score90d": 70 }
    }"#;

    let country: Country = serde_json::from_str(json).unwrap();
    assert_eq!(country.risk_level, RiskLevel::High);
    assert_eq!(country.trend, Trend::DeEscalating);
    assert_eq!(country.anomaly.severity, Severity::Med);
    assert_eq!(country.sub_scores.conflict_intensity, 84.0);
    assert_eq!(country.forecast.score_90d, 70.0);
    assert!(country.location.is_none());
}

#[test]
fn test_country_optional_fields_default() {
    let json = r#"{ "code": "IN", "name": "India", "riskScore": 35, "riskLevel": "MODERATE" }"#;
    let country: Country = serde_json::from_str(json).unwrap();
    assert_eq!(country.trend, Trend::Stable);
    assert!(!country.anomaly.detected);
}

// ============================================================================
// FIXTURE TESTS
// ============================================================================

#[test]
fn test_fallback_countries_are_consistent() {
    let fallback = mock_data::fallback_countries();
    assert_eq!(fallback.len(), 8);
    assert!(fallback.iter().all(Country::is_level_consistent));

    let ethiopia = fallback.iter().find(|c| c.code == "ET").unwrap();
    assert_eq!(ethiopia.risk_level, RiskLevel::Elevated);
}

#[test]
fn test_scenario_countries_are_consistent() {
    for scenario in mock_data::demo_scenarios() {
        for country in &scenario.countries {
            assert!(
                country.is_level_consistent(),
                "{} in {} is inconsistent",
                country.code,
                scenario.id
            );
            assert!(country.location.is_some());
        }
    }
}

#[test]
fn test_catalog_has_unique_codes() {
    let catalog = mock_data::country_catalog();
    let mut codes: Vec<&str> = catalog.iter().map(|c| c.code.as_str()).collect();
    let total = codes.len();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), total);
    assert!(catalog.iter().any(|c| c.code == "TW"));
    assert!(catalog.iter().any(|c| c.code == "SD"));
}
