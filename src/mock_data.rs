//! Static fixtures: demo scenarios, the add-country catalog and the fallback
//! watchlist shown when the backend cannot be reached.

use crate::country::{normalize_all, Anomaly, Country, Forecast, RiskLevel, Severity, SubScores, Trend};
use crate::scenario::{Asset, AssetKind, Scenario, TradeRoute};
use sentinel_map::GeoPoint;
use std::collections::HashSet;

pub const DEFAULT_SCENARIO_ID: &str = "meridian";

// =============================================================================
// Builders
// =============================================================================

/// `anomaly`: `None` for no detection, else `(score, severity)`
#[allow(clippy::too_many_arguments)]
fn country(
    code: &str,
    name: &str,
    score: f64,
    trend: Trend,
    anomaly: Option<(f64, Severity)>,
    sub: [f64; 3],
    forecast: [f64; 3],
    (lat, lon): (f64, f64),
) -> Country {
    let anomaly = match anomaly {
        Some((score, severity)) => Anomaly {
            detected: true,
            score,
            severity,
        },
        None => Anomaly {
            detected: false,
            score: 0.2,
            severity: Severity::Low,
        },
    };
    Country {
        trend,
        anomaly,
        sub_scores: SubScores {
            conflict_intensity: sub[0],
            social_unrest: sub[1],
            economic_stress: sub[2],
        },
        forecast: Forecast {
            score_30d: forecast[0],
            score_60d: forecast[1],
            score_90d: forecast[2],
        },
        location: Some(GeoPoint::new(lat, lon)),
        ..Country::new(code, name, score)
    }
}

fn asset(
    id: &str,
    kind: AssetKind,
    label: &str,
    (lat, lon): (f64, f64),
    detail: &str,
    risk: Option<&str>,
) -> Asset {
    Asset {
        id: id.to_string(),
        kind,
        label: label.to_string(),
        location: GeoPoint::new(lat, lon),
        detail: detail.to_string(),
        risk: risk.map(str::to_string),
    }
}

/// Route points are written `(lon, lat)`, the order map engines take them in
fn route(id: &str, label: &str, color: &str, points: &[(f64, f64)]) -> TradeRoute {
    TradeRoute {
        id: id.to_string(),
        label: label.to_string(),
        color: color.to_string(),
        points: points
            .iter()
            .map(|(lon, lat)| GeoPoint::new(*lat, *lon))
            .collect(),
    }
}

use Severity::{High as SevHigh, Med as SevMed};
use Trend::{DeEscalating, Escalating, Stable};

fn iran() -> Country {
    country("IR", "Iran", 78.0, Escalating, Some((0.84, SevHigh)), [74.0, 81.0, 78.0], [82.0, 80.0, 78.0], (32.4, 53.7))
}

// =============================================================================
// Scenarios
// =============================================================================

fn meridian_energy() -> Scenario {
    Scenario {
        id: "meridian".to_string(),
        name: "Meridian Energy Corp".to_string(),
        industry: "Oil & Gas".to_string(),
        description: "Global upstream & midstream operations across MENA and Central Asia".to_string(),
        countries: vec![
            country("IQ", "Iraq", 81.0, Escalating, Some((0.86, SevHigh)), [88.0, 74.0, 69.0], [85.0, 86.0, 84.0], (33.3, 44.4)),
            iran(),
            country("LY", "Libya", 74.0, Stable, None, [79.0, 58.0, 66.0], [72.0, 73.0, 73.0], (26.3, 17.2)),
            country("NG", "Nigeria", 67.0, Escalating, Some((0.77, SevHigh)), [63.0, 79.0, 70.0], [72.0, 74.0, 75.0], (9.1, 7.5)),
            country("KZ", "Kazakhstan", 52.0, Escalating, None, [34.0, 66.0, 55.0], [58.0, 61.0, 63.0], (48.0, 68.0)),
            country("SA", "Saudi Arabia", 38.0, Stable, None, [36.0, 22.0, 31.0], [36.0, 36.0, 35.0], (23.9, 45.1)),
            country("AE", "UAE", 22.0, DeEscalating, None, [18.0, 9.0, 20.0], [20.0, 19.0, 19.0], (23.4, 53.8)),
        ],
        assets: vec![
            asset("m1", AssetKind::Facility, "Basra Refinery", (30.5, 47.8), "Primary refining facility, 200k bpd capacity", Some("40km from active militia zone")),
            asset("m2", AssetKind::Facility, "Rumaila Field Ops", (30.3, 47.3), "Upstream operations center", Some("Inside conflict perimeter")),
            asset("m3", AssetKind::Facility, "Tengiz Pipeline Hub", (46.2, 53.2), "CPC pipeline connection point", Some("Worker protests within 10km")),
            asset("m4", AssetKind::Office, "Dubai HQ", (25.2, 55.3), "Regional headquarters and trading desk", None),
            asset("m5", AssetKind::Port, "Yanbu Terminal", (24.1, 38.1), "Export terminal, Red Sea access", Some("Houthi drone range")),
            asset("m6", AssetKind::Supplier, "Warri Depot", (5.5, 5.7), "Niger Delta supply depot", Some("Pipeline sabotage zone")),
        ],
        routes: vec![
            route("r1", "Persian Gulf Export", "#ef4444", &[(47.8, 30.5), (50.5, 26.5), (54.0, 25.0), (56.5, 25.2)]),
            route("r2", "CPC Pipeline", "#f97316", &[(47.3, 30.3), (50.0, 35.0), (53.2, 46.2), (55.0, 48.0)]),
            route("r3", "Red Sea Shipping", "#eab308", &[(38.1, 24.1), (40.0, 18.0), (43.0, 14.0), (45.0, 12.5)]),
        ],
    }
}

fn pacific_semiconductor() -> Scenario {
    Scenario {
        id: "pacific".to_string(),
        name: "Pacific Semiconductor".to_string(),
        industry: "Tech / Manufacturing".to_string(),
        description: "Fabless chip designer with suppliers across East Asia and Europe".to_string(),
        countries: vec![
            country("TW", "Taiwan", 73.0, Escalating, Some((0.88, SevHigh)), [71.0, 28.0, 32.0], [78.0, 80.0, 82.0], (23.7, 121.0)),
            country("CN", "China", 64.0, Escalating, None, [58.0, 49.0, 61.0], [68.0, 69.0, 70.0], (35.9, 104.2)),
            country("KR", "South Korea", 45.0, Stable, None, [32.0, 57.0, 44.0], [46.0, 46.0, 45.0], (35.9, 127.8)),
            country("JP", "Japan", 28.0, Stable, None, [21.0, 17.0, 35.0], [27.0, 27.0, 26.0], (36.2, 138.3)),
            country("NL", "Netherlands", 18.0, Stable, None, [6.0, 22.0, 19.0], [17.0, 17.0, 16.0], (52.1, 5.3)),
            country("VN", "Vietnam", 35.0, DeEscalating, None, [24.0, 31.0, 42.0], [33.0, 32.0, 31.0], (14.1, 108.3)),
        ],
        assets: vec![
            asset("p1", AssetKind::Facility, "TSMC Fab 18", (24.8, 120.9), "Primary 3nm supplier, Tainan Science Park", Some("Within PLA exercise zone")),
            asset("p2", AssetKind::Facility, "Samsung Pyeongtaek", (37.0, 127.1), "Secondary HBM supplier", None),
            asset("p3", AssetKind::Supplier, "ASML Veldhoven", (51.4, 5.5), "EUV lithography supplier, sole source", None),
            asset("p4", AssetKind::Facility, "Rapidus Hokkaido", (43.1, 141.3), "2nm R&D facility, strategic backup", None),
            asset("p5", AssetKind::Office, "HCMC Design Center", (10.8, 106.6), "Chip design team, 200 engineers", None),
            asset("p6", AssetKind::Supplier, "Rare Earth Processing", (23.1, 113.3), "Guangzhou rare earth refinery", Some("Export control target")),
        ],
        routes: vec![
            route("r1", "Taiwan-US Shipping", "#ef4444", &[(120.9, 24.8), (125.0, 28.0), (140.0, 35.0), (180.0, 40.0)]),
            route("r2", "Korea-Taiwan Link", "#f97316", &[(127.1, 37.0), (125.0, 32.0), (122.0, 27.0), (120.9, 24.8)]),
            route("r3", "ASML Supply Chain", "#2563eb", &[(5.5, 51.4), (30.0, 35.0), (60.0, 25.0), (100.0, 15.0), (120.9, 24.8)]),
        ],
    }
}

fn atlas_logistics() -> Scenario {
    Scenario {
        id: "atlas".to_string(),
        name: "Atlas Global Logistics".to_string(),
        industry: "Shipping & Trade".to_string(),
        description: "Container shipping and freight forwarding across major global trade routes".to_string(),
        countries: vec![
            country("YE", "Yemen", 91.0, Escalating, Some((0.95, SevHigh)), [96.0, 81.0, 88.0], [93.0, 93.0, 92.0], (15.6, 48.5)),
            country("EG", "Egypt", 62.0, Escalating, None, [41.0, 66.0, 79.0], [66.0, 68.0, 69.0], (26.8, 30.8)),
            country("SO", "Somalia", 85.0, Stable, None, [90.0, 77.0, 84.0], [86.0, 86.0, 85.0], (5.2, 46.2)),
            country("PA", "Panama", 41.0, DeEscalating, None, [18.0, 45.0, 52.0], [38.0, 36.0, 35.0], (8.5, -80.0)),
            country("UA", "Ukraine", 88.0, Stable, None, [95.0, 72.0, 68.0], [87.0, 86.0, 85.0], (48.4, 31.2)),
            country("SG", "Singapore", 12.0, Stable, None, [4.0, 8.0, 21.0], [11.0, 11.0, 11.0], (1.4, 103.8)),
            iran(),
        ],
        assets: vec![
            asset("a1", AssetKind::Port, "Port Said Terminal", (31.3, 32.3), "Suez Canal entry, container ops", Some("Revenue collapse from diversions")),
            asset("a2", AssetKind::Port, "Hodeidah Port", (14.8, 43.0), "Red Sea transit monitoring", Some("Active missile threat zone")),
            asset("a3", AssetKind::Port, "Singapore Hub", (1.3, 103.8), "Transshipment mega-hub, record volumes", None),
            asset("a4", AssetKind::Port, "Odesa Port", (46.5, 30.7), "Black Sea grain corridor", Some("Under air defense umbrella")),
            asset("a5", AssetKind::Port, "Balboa Terminal", (9.0, -79.6), "Panama Canal Pacific side", Some("Draft restrictions easing")),
            asset("a6", AssetKind::Office, "Dubai Ops Center", (25.2, 55.3), "Regional logistics coordination", None),
        ],
        routes: vec![
            route("r1", "Red Sea Route (DISRUPTED)", "#ef4444", &[(103.8, 1.3), (80.0, 10.0), (55.0, 15.0), (43.0, 14.8), (40.0, 18.0), (32.3, 31.3)]),
            route("r2", "Cape of Good Hope Alt", "#eab308", &[(103.8, 1.3), (80.0, 5.0), (55.0, -10.0), (30.0, -35.0), (18.0, -34.0), (0.0, -5.0), (-10.0, 30.0), (0.0, 48.0)]),
            route("r3", "Black Sea Corridor", "#f97316", &[(30.7, 46.5), (32.0, 44.0), (29.0, 41.0), (26.0, 40.0)]),
            route("r4", "Panama Transit", "#22c55e", &[(-79.6, 9.0), (-80.0, 10.0), (-82.0, 15.0), (-85.0, 20.0)]),
        ],
    }
}

/// Built-in scenarios; the first is the default
pub fn demo_scenarios() -> Vec<Scenario> {
    vec![meridian_energy(), pacific_semiconductor(), atlas_logistics()]
}

// =============================================================================
// Catalog
// =============================================================================

/// Countries offered by the picker that no scenario ships with
pub fn available_countries() -> Vec<Country> {
    vec![
        country("RU", "Russia", 72.0, Stable, None, [70.0, 48.0, 61.0], [71.0, 71.0, 70.0], (61.5, 105.3)),
        country("AF", "Afghanistan", 87.0, Stable, None, [84.0, 71.0, 92.0], [87.0, 87.0, 86.0], (33.9, 67.7)),
        country("VE", "Venezuela", 65.0, Escalating, None, [45.0, 62.0, 79.0], [69.0, 70.0, 71.0], (6.4, -66.6)),
        country("ET", "Ethiopia", 71.0, Escalating, Some((0.76, SevHigh)), [79.0, 65.0, 72.0], [76.0, 77.0, 78.0], (9.1, 40.5)),
        country("MM", "Myanmar", 83.0, Stable, None, [91.0, 76.0, 73.0], [82.0, 82.0, 81.0], (21.9, 95.9)),
        country("SD", "Sudan", 89.0, Stable, None, [94.0, 80.0, 90.0], [90.0, 90.0, 90.0], (12.9, 30.2)),
        country("PH", "Philippines", 44.0, Escalating, None, [46.0, 33.0, 30.0], [48.0, 50.0, 51.0], (12.9, 121.8)),
        country("PK", "Pakistan", 62.0, Escalating, Some((0.72, SevMed)), [68.0, 74.0, 71.0], [66.0, 64.0, 61.0], (30.4, 69.3)),
        country("MX", "Mexico", 56.0, Stable, None, [66.0, 44.0, 41.0], [57.0, 57.0, 57.0], (23.6, -102.6)),
        country("IL", "Israel", 76.0, DeEscalating, None, [84.0, 61.0, 47.0], [73.0, 71.0, 70.0], (31.0, 34.9)),
        country("CO", "Colombia", 48.0, Stable, None, [57.0, 46.0, 38.0], [47.0, 47.0, 46.0], (4.6, -74.3)),
        country("IN", "India", 35.0, Stable, None, [31.0, 29.0, 27.0], [34.0, 34.0, 34.0], (20.6, 79.0)),
    ]
}

/// Everything `add_country` accepts: picker countries plus every scenario
/// country, one entry per code
pub fn country_catalog() -> Vec<Country> {
    let mut seen = HashSet::new();
    available_countries()
        .into_iter()
        .chain(demo_scenarios().into_iter().flat_map(|s| s.countries))
        .filter(|c| seen.insert(c.code.clone()))
        .collect()
}

// =============================================================================
// Fallback Watchlist
// =============================================================================

/// Rows shown while the backend is unreachable.
///
/// Levels are recorded as last published; normalization corrects any that
/// drifted out of their score band (Ethiopia).
pub fn fallback_countries() -> Vec<Country> {
    let mut ethiopia = country("ET", "Ethiopia", 68.0, Stable, Some((0.76, SevHigh)), [79.0, 65.0, 72.0], [71.0, 69.0, 66.0], (9.1, 40.5));
    ethiopia.risk_level = RiskLevel::High;

    normalize_all(vec![
        country("UA", "Ukraine", 87.0, Stable, Some((0.91, SevHigh)), [95.0, 72.0, 68.0], [86.0, 85.0, 84.0], (48.4, 30.5)),
        country("IR", "Iran", 79.0, Stable, Some((0.84, SevHigh)), [74.0, 81.0, 78.0], [82.0, 80.0, 78.0], (32.4, 53.7)),
        country("TW", "Taiwan", 72.0, Stable, Some((0.88, SevHigh)), [71.0, 28.0, 32.0], [75.0, 74.0, 71.0], (23.7, 120.9)),
        ethiopia,
        country("PK", "Pakistan", 62.0, Stable, Some((0.72, SevMed)), [68.0, 74.0, 71.0], [66.0, 64.0, 61.0], (30.4, 69.3)),
        country("VE", "Venezuela", 55.0, Stable, None, [45.0, 62.0, 79.0], [58.0, 56.0, 54.0], (6.4, -66.6)),
        country("RS", "Serbia", 38.0, DeEscalating, None, [22.0, 54.0, 41.0], [37.0, 36.0, 35.0], (44.0, 21.0)),
        country("BR", "Brazil", 28.0, DeEscalating, None, [18.0, 38.0, 34.0], [27.0, 26.0, 25.0], (-14.2, -51.9)),
    ])
}
