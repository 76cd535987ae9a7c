use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LayerCategory {
    #[serde(alias = "AERO")]
    Aerodrome,
    Fir,
    Sector,
    Waypoint,
}

/// Full snapshot of the chart controls. A new value replaces the previous
/// one on every control change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiSelection {
    pub arrival_runway: Option<String>,
    pub departure_runway: Option<String>,
    pub layers: BTreeSet<LayerCategory>,
    pub radius_nm: Option<f64>,
}

impl UiSelection {
    pub fn new(arrival_runway: Option<&str>, departure_runway: Option<&str>, layers: impl IntoIterator<Item = LayerCategory>, radius_nm: Option<f64>) -> Self {
        UiSelection {
            arrival_runway: arrival_runway.map(str::to_string),
            departure_runway: departure_runway.map(str::to_string),
            layers: layers.into_iter().collect(),
            radius_nm,
        }
    }

    pub fn has_layer(&self, layer: LayerCategory) -> bool {
        self.layers.contains(&layer)
    }
}

/// Reads the radius text box. Anything that is not a number becomes `None`,
/// which leaves the current ring in place.
pub fn parse_radius_input(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|nm| !nm.is_nan())
}
