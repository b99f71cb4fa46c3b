//! Sentinel Map - a rendering-agnostic map capability layer
//!
//! The dashboard never talks to a mapping engine directly. Page controllers
//! drive a [`MapSurface`], and the concrete surface is picked once from the
//! configured provider tokens.
//!
//! # Components
//!
//! - [`MapSurface`]: the capability trait every map engine adapter implements
//! - [`VectorMap`]: built-in surface used when no provider token is configured
//! - [`MapSession`]: owns a surface for the lifetime of a view and tears it
//!   down exactly once
//! - [`MapProvider`]: provider selection from (possibly placeholder) tokens

pub mod session;
pub mod vector;

#[cfg(test)]
mod tests;

pub use session::MapSession;
pub use vector::VectorMap;

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Whether the point lies on the globe
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Independently toggleable overlay layers
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Layer {
    ConflictZones,
    AnomalyAlerts,
    Facilities,
    TradeRoutes,
    Infrastructure,
}

impl Layer {
    pub fn all() -> &'static [Layer] {
        &[
            Layer::ConflictZones,
            Layer::AnomalyAlerts,
            Layer::Facilities,
            Layer::TradeRoutes,
            Layer::Infrastructure,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Layer::ConflictZones => "Conflict Zones",
            Layer::AnomalyAlerts => "Anomaly Alerts",
            Layer::Facilities => "Facilities",
            Layer::TradeRoutes => "Trade Routes",
            Layer::Infrastructure => "Infrastructure",
        }
    }
}

/// Visibility flags for every [`Layer`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerVisibility {
    pub conflict_zones: bool,
    pub anomaly_alerts: bool,
    pub facilities: bool,
    pub trade_routes: bool,
    pub infrastructure: bool,
}

impl Default for LayerVisibility {
    fn default() -> Self {
        Self {
            conflict_zones: true,
            anomaly_alerts: true,
            facilities: true,
            trade_routes: false,
            infrastructure: false,
        }
    }
}

impl LayerVisibility {
    pub fn is_visible(&self, layer: Layer) -> bool {
        match layer {
            Layer::ConflictZones => self.conflict_zones,
            Layer::AnomalyAlerts => self.anomaly_alerts,
            Layer::Facilities => self.facilities,
            Layer::TradeRoutes => self.trade_routes,
            Layer::Infrastructure => self.infrastructure,
        }
    }

    pub fn set(&mut self, layer: Layer, visible: bool) {
        let flag = match layer {
            Layer::ConflictZones => &mut self.conflict_zones,
            Layer::AnomalyAlerts => &mut self.anomaly_alerts,
            Layer::Facilities => &mut self.facilities,
            Layer::TradeRoutes => &mut self.trade_routes,
            Layer::Infrastructure => &mut self.infrastructure,
        };
        *flag = visible;
    }

    /// Iterate `(layer, visible)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (Layer, bool)> + '_ {
        Layer::all().iter().map(move |layer| (*layer, self.is_visible(*layer)))
    }
}

/// A point feature placed on the map
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Country code for country markers, asset id otherwise
    pub id: String,
    pub label: String,
    pub point: GeoPoint,
    pub layer: Layer,
    /// Drives marker radius / fill intensity (risk score for countries)
    pub weight: f64,
}

/// A polyline feature (trade route, pipeline, corridor)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutePath {
    pub id: String,
    pub label: String,
    pub color: String,
    pub points: Vec<GeoPoint>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    #[default]
    Flat,
    Globe,
}

/// Callback invoked with the clicked feature id, or `None` for a click on
/// empty map
pub type SelectListener = Box<dyn Fn(Option<&str>) + Send + Sync>;

/// Minimal capability set a map engine must offer to the dashboard
pub trait MapSurface: Send {
    fn render_markers(&mut self, markers: &[Marker]);

    fn render_routes(&mut self, routes: &[RoutePath]);

    fn on_select(&mut self, listener: SelectListener);

    fn set_layer_visible(&mut self, layer: Layer, visible: bool);

    /// Center the camera on a point
    fn fly_to(&mut self, point: GeoPoint);

    /// Highlight one feature, or clear the highlight with `None`
    fn highlight(&mut self, id: Option<&str>);

    fn set_projection(&mut self, projection: Projection);

    /// Release engine resources: markers, routes, listeners.
    /// Must tolerate being called more than once.
    fn teardown(&mut self);
}

/// Values shipped in `.env.example` files that mean "not configured"
const PLACEHOLDER_TOKENS: &[&str] = &[
    "your_mapbox_token_here",
    "your_token_here",
    "changeme",
];

/// Which map engine backs the dashboard
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapProvider {
    /// No usable token; render with the built-in vector surface
    BuiltinVector,
    /// A tiled provider with an access token
    Tiled { token: String },
}

impl MapProvider {
    pub fn from_token(token: Option<&str>) -> Self {
        match token.map(str::trim) {
            Some(t) if !t.is_empty() && !is_placeholder(t) => MapProvider::Tiled {
                token: t.to_string(),
            },
            Some(t) if !t.is_empty() => {
                log::warn!("map token is a placeholder value; using built-in vector map");
                MapProvider::BuiltinVector
            }
            _ => MapProvider::BuiltinVector,
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, MapProvider::BuiltinVector)
    }
}

fn is_placeholder(token: &str) -> bool {
    PLACEHOLDER_TOKENS
        .iter()
        .any(|p| token.eq_ignore_ascii_case(p))
}
