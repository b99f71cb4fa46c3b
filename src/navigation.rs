//! Navigation for the Sentinel dashboard
//!
//! Provides:
//! - Page routes with path round-tripping
//! - Sidebar items in display order
//! - Route history with back/forward
//! - Country detail resolution with an explicit not-found page

use crate::country::Country;
use crate::scenario::ScenarioHandle;
use std::collections::VecDeque;

// =============================================================================
// Routes
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Dashboard,
    Globe,
    Analysis,
    Countries,
    /// Detail page for one country code
    Country(String),
    Alerts,
    Intelligence,
    Forecasts,
    Settings,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/dashboard".to_string(),
            Route::Globe => "/globe".to_string(),
            Route::Analysis => "/analysis".to_string(),
            Route::Countries => "/countries".to_string(),
            Route::Country(code) => format!("/countries/{}", code),
            Route::Alerts => "/alerts".to_string(),
            Route::Intelligence => "/intelligence".to_string(),
            Route::Forecasts => "/forecasts".to_string(),
            Route::Settings => "/settings".to_string(),
        }
    }

    /// Parse a path. `/` is the dashboard; unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let route = match segments.as_slice() {
            [] | ["dashboard"] => Route::Dashboard,
            ["globe"] => Route::Globe,
            ["analysis"] => Route::Analysis,
            ["countries"] => Route::Countries,
            ["countries", code] | ["country", code] => Route::Country(code.to_uppercase()),
            ["alerts"] => Route::Alerts,
            ["intelligence"] => Route::Intelligence,
            ["forecasts"] => Route::Forecasts,
            ["settings"] => Route::Settings,
            _ => return None,
        };
        Some(route)
    }

    pub fn title(&self) -> String {
        match self {
            Route::Dashboard => "Dashboard".to_string(),
            Route::Globe => "Globe".to_string(),
            Route::Analysis => "Analysis".to_string(),
            Route::Countries => "Countries".to_string(),
            Route::Country(code) => format!("Country {}", code),
            Route::Alerts => "Alerts".to_string(),
            Route::Intelligence => "Intelligence".to_string(),
            Route::Forecasts => "Forecasts".to_string(),
            Route::Settings => "Settings".to_string(),
        }
    }
}

// =============================================================================
// Sidebar
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSection {
    Overview,
    Analysis,
    System,
}

impl NavSection {
    pub fn label(&self) -> &'static str {
        match self {
            NavSection::Overview => "Overview",
            NavSection::Analysis => "Analysis",
            NavSection::System => "System",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    pub section: NavSection,
}

impl NavItem {
    /// Whether the item should render as active for `current`. Items other
    /// than the dashboard also own their sub-paths.
    pub fn is_active(&self, current: &Route) -> bool {
        let path = current.path();
        path == self.path || (self.path != "/dashboard" && path.starts_with(&format!("{}/", self.path)))
    }

    pub fn route(&self) -> Option<Route> {
        Route::parse(self.path)
    }
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem { path: "/dashboard", label: "Dashboard", section: NavSection::Overview },
    NavItem { path: "/globe", label: "Globe", section: NavSection::Overview },
    NavItem { path: "/analysis", label: "Analysis", section: NavSection::Analysis },
    NavItem { path: "/countries", label: "Countries", section: NavSection::Analysis },
    NavItem { path: "/alerts", label: "Alerts", section: NavSection::Analysis },
    NavItem { path: "/intelligence", label: "Intelligence", section: NavSection::Analysis },
    NavItem { path: "/forecasts", label: "Forecasts", section: NavSection::Analysis },
    NavItem { path: "/settings", label: "Settings", section: NavSection::System },
];

// =============================================================================
// History
// =============================================================================

pub const MAX_HISTORY: usize = 50;

/// Visited routes for back/forward navigation
#[derive(Debug, Clone)]
pub struct Navigator {
    history: VecDeque<Route>,
    current_index: usize,
    max_size: usize,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Start on the dashboard
    pub fn new() -> Self {
        Self::starting_at(Route::Dashboard)
    }

    pub fn starting_at(route: Route) -> Self {
        let mut history = VecDeque::new();
        history.push_back(route);
        Self {
            history,
            current_index: 0,
            max_size: MAX_HISTORY,
        }
    }

    pub fn current(&self) -> &Route {
        // history always holds at least the starting route
        &self.history[self.current_index]
    }

    /// Visit `route`, dropping any forward history. Re-visiting the current
    /// route is a no-op.
    pub fn navigate(&mut self, route: Route) {
        if *self.current() == route {
            return;
        }

        while self.history.len() > self.current_index + 1 {
            self.history.pop_back();
        }

        log::debug!("navigate {}", route.path());
        self.history.push_back(route);

        while self.history.len() > self.max_size {
            self.history.pop_front();
        }

        self.current_index = self.history.len() - 1;
    }

    /// Navigate to a path; unknown paths are ignored and reported as `false`
    pub fn navigate_path(&mut self, path: &str) -> bool {
        match Route::parse(path) {
            Some(route) => {
                self.navigate(route);
                true
            }
            None => {
                log::debug!("no route for {}", path);
                false
            }
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.current_index + 1 < self.history.len()
    }

    pub fn back(&mut self) -> Option<&Route> {
        if !self.can_go_back() {
            return None;
        }
        self.current_index -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&Route> {
        if !self.can_go_forward() {
            return None;
        }
        self.current_index += 1;
        Some(self.current())
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

// =============================================================================
// Country Detail
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum CountryPage {
    Found(Country),
    /// The code is not on the active watchlist
    NotFound { code: String, back: Route },
}

impl CountryPage {
    pub fn is_found(&self) -> bool {
        matches!(self, CountryPage::Found(_))
    }
}

pub fn resolve_country(scenario: &ScenarioHandle, code: &str) -> CountryPage {
    match scenario.find_country(code) {
        Some(country) => CountryPage::Found(country),
        None => CountryPage::NotFound {
            code: code.trim().to_uppercase(),
            back: Route::Dashboard,
        },
    }
}
