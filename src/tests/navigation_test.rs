//! Unit tests for navigation
//!
//! Tests cover:
//! - Route paths and parsing
//! - Sidebar order and active state
//! - History back/forward and its cap
//! - Country detail resolution

use crate::navigation::*;
use crate::scenario::ScenarioHandle;

// ============================================================================
// ROUTE TESTS
// ============================================================================

#[test]
fn test_every_route_parses_from_its_path() {
    let routes = vec![
        Route::Dashboard,
        Route::Globe,
        Route::Analysis,
        Route::Countries,
        Route::Country("IQ".to_string()),
        Route::Alerts,
        Route::Intelligence,
        Route::Forecasts,
        Route::Settings,
    ];
    for route in routes {
        assert_eq!(Route::parse(&route.path()), Some(route.clone()), "{}", route.path());
    }
}

#[test]
fn test_parse_aliases_and_noise() {
    assert_eq!(Route::parse("/"), Some(Route::Dashboard));
    assert_eq!(Route::parse(""), Some(Route::Dashboard));
    assert_eq!(Route::parse("/globe/"), Some(Route::Globe));
    assert_eq!(Route::parse("/alerts?severity=high"), Some(Route::Alerts));
    assert_eq!(Route::parse("/country/ir#forecast"), Some(Route::Country("IR".to_string())));
}

#[test]
fn test_parse_unknown_paths() {
    assert_eq!(Route::parse("/portfolio"), None);
    assert_eq!(Route::parse("/countries/IQ/extra"), None);
}

#[test]
fn test_country_title() {
    assert_eq!(Route::Country("TW".to_string()).title(), "Country TW");
    assert_eq!(Route::default().title(), "Dashboard");
}

// ============================================================================
// SIDEBAR TESTS
// ============================================================================

#[test]
fn test_nav_items_order() {
    let paths: Vec<&str> = NAV_ITEMS.iter().map(|item| item.path).collect();
    assert_eq!(
        paths,
        vec![
            "/dashboard",
            "/globe",
            "/analysis",
            "/countries",
            "/alerts",
            "/intelligence",
            "/forecasts",
            "/settings"
        ]
    );
    assert!(NAV_ITEMS.iter().all(|item| item.route().is_some()));
    assert_eq!(NAV_ITEMS.last().unwrap().section, NavSection::System);
}

#[test]
fn test_exactly_one_item_active() {
    let current = Route::Country("IQ".to_string());
    let active: Vec<&str> = NAV_ITEMS
        .iter()
        .filter(|item| item.is_active(&current))
        .map(|item| item.label)
        .collect();
    assert_eq!(active, vec!["Countries"]);

    let active = NAV_ITEMS.iter().filter(|item| item.is_active(&Route::Dashboard)).count();
    assert_eq!(active, 1);
}

// ============================================================================
// HISTORY TESTS
// ============================================================================

#[test]
fn test_back_and_forward() {
    let mut nav = Navigator::new();
    nav.navigate(Route::Globe);
    nav.navigate(Route::Alerts);

    assert_eq!(nav.back(), Some(&Route::Globe));
    assert_eq!(nav.back(), Some(&Route::Dashboard));
    assert_eq!(nav.back(), None);

    assert_eq!(nav.forward(), Some(&Route::Globe));
    assert!(nav.can_go_forward());
}

#[test]
fn test_navigate_drops_forward_history() {
    let mut nav = Navigator::new();
    nav.navigate(Route::Globe);
    nav.navigate(Route::Alerts);
    nav.back();

    nav.navigate(Route::Settings);
    assert!(!nav.can_go_forward());
    assert_eq!(nav.len(), 3);
    assert_eq!(nav.current(), &Route::Settings);
}

#[test]
fn test_navigate_same_route_is_noop() {
    let mut nav = Navigator::new();
    nav.navigate(Route::Dashboard);
    assert_eq!(nav.len(), 1);
    assert!(!nav.can_go_back());
}

#[test]
fn test_history_is_capped() {
    let mut nav = Navigator::new();
    for i in 0..(MAX_HISTORY + 10) {
        nav.navigate(Route::Country(format!("C{}", i)));
    }
    assert_eq!(nav.len(), MAX_HISTORY);
    assert_eq!(nav.current(), &Route::Country(format!("C{}", MAX_HISTORY + 9)));
}

#[test]
fn test_navigate_path() {
    let mut nav = Navigator::new();
    assert!(nav.navigate_path("/countries/ua"));
    assert_eq!(nav.current(), &Route::Country("UA".to_string()));

    assert!(!nav.navigate_path("/nowhere"));
    assert_eq!(nav.current(), &Route::Country("UA".to_string()));
}

// ============================================================================
// COUNTRY DETAIL TESTS
// ============================================================================

#[test]
fn test_resolve_country_on_watchlist() {
    let scenario = ScenarioHandle::default();
    match resolve_country(&scenario, "iq") {
        CountryPage::Found(country) => assert_eq!(country.name, "Iraq"),
        other => panic!("expected Found, got {:?}", other),
    }
}

#[test]
fn test_resolve_country_off_watchlist() {
    let scenario = ScenarioHandle::default();
    let page = resolve_country(&scenario, "tw");
    assert_eq!(
        page,
        CountryPage::NotFound {
            code: "TW".to_string(),
            back: Route::Dashboard
        }
    );

    scenario.add_country("TW").unwrap();
    assert!(resolve_country(&scenario, "TW").is_found());
}
