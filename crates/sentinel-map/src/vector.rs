//! Built-in vector map surface
//!
//! Used whenever no tiled provider is configured. It keeps the full map state
//! in memory (features, layer flags, camera, highlight) so the dashboard keeps
//! working without a third-party engine, and so page controllers can be
//! exercised without one.

use crate::{GeoPoint, Layer, LayerVisibility, MapSurface, Marker, Projection, RoutePath, SelectListener};

#[derive(Default)]
pub struct VectorMap {
    markers: Vec<Marker>,
    routes: Vec<RoutePath>,
    layers: LayerVisibility,
    camera: Option<GeoPoint>,
    highlighted: Option<String>,
    projection: Projection,
    listeners: Vec<SelectListener>,
    teardowns: usize,
    torn_down: bool,
}

impl VectorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Markers whose layer is currently visible
    pub fn visible_markers(&self) -> Vec<&Marker> {
        self.markers
            .iter()
            .filter(|m| self.layers.is_visible(m.layer))
            .collect()
    }

    /// Routes are drawn only while the trade-routes layer is on
    pub fn visible_routes(&self) -> &[RoutePath] {
        if self.layers.is_visible(Layer::TradeRoutes) {
            self.routes.as_slice()
        } else {
            &[]
        }
    }

    pub fn routes(&self) -> &[RoutePath] {
        &self.routes
    }

    pub fn layers(&self) -> LayerVisibility {
        self.layers
    }

    pub fn camera(&self) -> Option<GeoPoint> {
        self.camera
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// How many times teardown actually released resources
    pub fn teardown_count(&self) -> usize {
        self.teardowns
    }

    /// Simulate a user click on a feature (or on empty map with `None`)
    pub fn click(&self, id: Option<&str>) {
        if self.torn_down {
            return;
        }
        for listener in &self.listeners {
            listener(id);
        }
    }
}

impl MapSurface for VectorMap {
    fn render_markers(&mut self, markers: &[Marker]) {
        if self.torn_down {
            log::debug!("render_markers on torn down vector map ignored");
            return;
        }
        self.markers = markers
            .iter()
            .filter(|m| m.point.is_valid())
            .cloned()
            .collect();
    }

    fn render_routes(&mut self, routes: &[RoutePath]) {
        if self.torn_down {
            return;
        }
        self.routes = routes.to_vec();
    }

    fn on_select(&mut self, listener: SelectListener) {
        if self.torn_down {
            return;
        }
        self.listeners.push(listener);
    }

    fn set_layer_visible(&mut self, layer: Layer, visible: bool) {
        self.layers.set(layer, visible);
    }

    fn fly_to(&mut self, point: GeoPoint) {
        if point.is_valid() {
            self.camera = Some(point);
        }
    }

    fn highlight(&mut self, id: Option<&str>) {
        self.highlighted = id.map(str::to_string);
    }

    fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.markers.clear();
        self.routes.clear();
        self.listeners.clear();
        self.highlighted = None;
        self.torn_down = true;
        self.teardowns += 1;
    }
}
