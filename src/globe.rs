//! Globe page controller
//!
//! Owns the page's selection and layer state and drives a [`MapSurface`]
//! through a [`MapSession`]. Clicks arrive from the surface as events and are
//! applied on [`GlobeController::handle_clicks`], so the surface never calls
//! back into the controller while it is borrowed.

use crate::country::Country;
use crate::scenario::{Scenario, ScenarioHandle};
use sentinel_map::{Layer, LayerVisibility, MapSession, MapSurface, Marker, Projection, RoutePath};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

pub struct GlobeController<S: MapSurface> {
    session: MapSession<S>,
    scenario: ScenarioHandle,
    selected: Option<String>,
    layers: LayerVisibility,
    projection: Projection,
    clicks: UnboundedReceiver<Option<String>>,
}

impl<S: MapSurface> GlobeController<S> {
    /// Mount `surface`, apply the default layers and draw the scenario
    pub fn mount(mut surface: S, scenario: ScenarioHandle) -> Self {
        let (tx, clicks) = unbounded_channel();
        surface.on_select(Box::new(move |id: Option<&str>| {
            let _ = tx.send(id.map(str::to_string));
        }));

        let layers = LayerVisibility::default();
        for (layer, visible) in layers.iter() {
            surface.set_layer_visible(layer, visible);
        }
        surface.set_projection(Projection::Flat);

        let mut controller = Self {
            session: MapSession::mount(surface),
            scenario,
            selected: None,
            layers,
            projection: Projection::Flat,
            clicks,
        };
        controller.render();
        controller
    }

    pub fn surface(&self) -> Option<&S> {
        self.session.surface()
    }

    /// Tear the map down and hand the surface back
    pub fn unmount(mut self) -> Option<S> {
        self.session.release()
    }

    // Selection

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Toggle selection of `code`: an empty code or the current selection
    /// deselects, anything else replaces the selection.
    pub fn select_country(&mut self, code: &str) {
        let code = code.trim().to_uppercase();
        if code.is_empty() || self.selected.as_deref() == Some(code.as_str()) {
            self.clear_selection();
            return;
        }

        let location = self
            .scenario
            .find_country(&code)
            .and_then(|c| c.location);
        log::debug!("selected {}", code);
        self.selected = Some(code);

        if let Some(surface) = self.session.surface_mut() {
            surface.highlight(self.selected.as_deref());
            match location {
                Some(point) => surface.fly_to(point),
                None => log::debug!("no coordinates for selection; camera unchanged"),
            }
        }
    }

    pub fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            if let Some(surface) = self.session.surface_mut() {
                surface.highlight(None);
            }
        }
    }

    /// The selected country as currently on the watchlist
    pub fn selected_country(&self) -> Option<Country> {
        self.scenario.find_country(self.selected.as_deref()?)
    }

    /// Apply clicks queued by the surface. Clicks on non-country features
    /// are ignored; a click on empty map deselects. Returns the number of
    /// clicks drained.
    pub fn handle_clicks(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(click) = self.clicks.try_recv() {
            handled += 1;
            match click {
                Some(id) if self.scenario.find_country(&id).is_some() => self.select_country(&id),
                Some(_) => {}
                None => self.clear_selection(),
            }
        }
        handled
    }

    // Layers

    pub fn layers(&self) -> LayerVisibility {
        self.layers
    }

    pub fn set_layer_visible(&mut self, layer: Layer, visible: bool) {
        self.layers.set(layer, visible);
        if let Some(surface) = self.session.surface_mut() {
            surface.set_layer_visible(layer, visible);
        }
    }

    /// Flip one layer, returning its new visibility
    pub fn toggle_layer(&mut self, layer: Layer) -> bool {
        let visible = !self.layers.is_visible(layer);
        self.set_layer_visible(layer, visible);
        visible
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn is_3d(&self) -> bool {
        self.projection == Projection::Globe
    }

    pub fn toggle_projection(&mut self) -> Projection {
        self.projection = match self.projection {
            Projection::Flat => Projection::Globe,
            Projection::Globe => Projection::Flat,
        };
        if let Some(surface) = self.session.surface_mut() {
            surface.set_projection(self.projection);
        }
        self.projection
    }

    // Features

    /// Redraw from the current watchlist. A selection that left the
    /// watchlist is cleared.
    pub fn render(&mut self) {
        let scenario = self.scenario.effective_scenario();
        if let Some(code) = self.selected.as_deref() {
            if !scenario.contains(code) {
                self.clear_selection();
            }
        }

        let markers = scenario_markers(&scenario);
        let routes = scenario_routes(&scenario);
        if let Some(surface) = self.session.surface_mut() {
            surface.render_markers(&markers);
            surface.render_routes(&routes);
        }
    }
}

/// Country markers on the conflict layer, an extra pulse on the anomaly
/// layer for each detected anomaly, and one facility marker per asset
pub fn scenario_markers(scenario: &Scenario) -> Vec<Marker> {
    let mut markers = Vec::new();
    for country in &scenario.countries {
        let Some(point) = country.location else {
            continue;
        };
        markers.push(Marker {
            id: country.code.clone(),
            label: country.name.clone(),
            point,
            layer: Layer::ConflictZones,
            weight: country.risk_score,
        });
        if country.anomaly.detected {
            markers.push(Marker {
                id: country.code.clone(),
                label: format!("{} anomaly", country.name),
                point,
                layer: Layer::AnomalyAlerts,
                weight: country.anomaly.score * 100.0,
            });
        }
    }
    markers.extend(scenario.assets.iter().map(|asset| Marker {
        id: asset.id.clone(),
        label: asset.label.clone(),
        point: asset.location,
        layer: Layer::Facilities,
        weight: if asset.risk.is_some() { 1.0 } else { 0.0 },
    }));
    markers
}

pub fn scenario_routes(scenario: &Scenario) -> Vec<RoutePath> {
    scenario
        .routes
        .iter()
        .map(|route| RoutePath {
            id: route.id.clone(),
            label: route.label.clone(),
            color: route.color.clone(),
            points: route.points.clone(),
        })
        .collect()
}
