use std::{collections::BTreeSet, fs::File, path::Path};

use anyhow::Context;
use serde::{de::DeserializeOwned, de::Error as _, Deserialize, Deserializer, Serialize};

use crate::{
    chart::selection::LayerCategory,
    style::{BoundaryStyle, MarkerStyle, PolygonStyle, ProcedureStyle, RingStyle},
};

/// Session-wide settings: defaults for the controls and the styles shared by
/// whole overlay families.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartConfig {
    pub version: String,
    /// ICAO code of the airport the radius ring is centred on
    pub ring_reference: String,
    pub default_radius_nm: Option<f64>,
    pub default_layers: BTreeSet<LayerCategory>,
    /// Falls back to the first runway in the procedure table
    pub default_arrival_runway: Option<String>,
    /// Falls back to the fifth runway in the procedure table (or the last)
    pub default_departure_runway: Option<String>,
    #[serde(deserialize_with = "airport_marker")]
    pub airport_marker: MarkerStyle,
    #[serde(deserialize_with = "runway_active")]
    pub runway_active: PolygonStyle,
    #[serde(deserialize_with = "runway_inactive")]
    pub runway_inactive: PolygonStyle,
    pub waypoint_marker: MarkerStyle,
    pub waypoint_highlights: WaypointHighlights,
    pub fir_boundary: BoundaryStyle,
    pub procedure: ProcedureStyle,
    pub ring: RingStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            ring_reference: "WSSS".to_string(),
            default_radius_nm: Some(50_f64),
            default_layers: [LayerCategory::Aerodrome, LayerCategory::Fir].into_iter().collect(),
            default_arrival_runway: None,
            default_departure_runway: None,
            airport_marker: default_airport_marker(),
            runway_active: default_runway_active(),
            runway_inactive: default_runway_inactive(),
            waypoint_marker: MarkerStyle::default(),
            waypoint_highlights: WaypointHighlights::default(),
            fir_boundary: BoundaryStyle::default(),
            procedure: ProcedureStyle::default(),
            ring: RingStyle::default(),
        }
    }
}

fn default_airport_marker() -> MarkerStyle {
    MarkerStyle {
        color: "steelblue".to_string(),
        size: 11_f64,
    }
}

fn default_runway_active() -> PolygonStyle {
    PolygonStyle {
        fill_color: "rgba(0, 0, 255, 0.1)".to_string(),
        line_color: "dodgerblue".to_string(),
        opacity: 0.1,
        line_width: 1.5,
    }
}

fn default_runway_inactive() -> PolygonStyle {
    PolygonStyle {
        fill_color: "rgba(255, 0, 0, 0.7)".to_string(),
        line_color: "red".to_string(),
        opacity: 0.7,
        line_width: 1.5,
    }
}

/// Reads a style object field by field on top of `base`, so fields left out
/// keep the chart's default rather than the style type's.
fn merge_onto<'de, D, T>(deserializer: D, base: T) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Serialize + DeserializeOwned,
{
    let overrides = serde_json::Value::deserialize(deserializer)?;
    let mut merged = serde_json::to_value(base).map_err(D::Error::custom)?;
    match (&mut merged, overrides) {
        (serde_json::Value::Object(fields), serde_json::Value::Object(set)) => fields.extend(set),
        (_, other) => merged = other,
    }

    serde_json::from_value(merged).map_err(D::Error::custom)
}

fn airport_marker<'de, D: Deserializer<'de>>(deserializer: D) -> Result<MarkerStyle, D::Error> {
    merge_onto(deserializer, default_airport_marker())
}

fn runway_active<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PolygonStyle, D::Error> {
    merge_onto(deserializer, default_runway_active())
}

fn runway_inactive<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PolygonStyle, D::Error> {
    merge_onto(deserializer, default_runway_inactive())
}

impl ChartConfig {
    pub fn try_new_from_file(file: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config: ChartConfig = serde_json::from_reader(File::open(&file).with_context(|| format!("Could not open {}", file.as_ref().display()))?)
            .context("Invalid chart config Json")?;

        Ok(config)
    }

    /// Marker style for a named waypoint, taking the highlight lists into
    /// account.
    pub fn waypoint_style(&self, name: &str) -> MarkerStyle {
        let hl = &self.waypoint_highlights;
        let name = name.to_string();
        if hl.entry_exit.contains(&name) || hl.holding.contains(&name) {
            MarkerStyle { color: hl.holding_color.to_string(), size: hl.size }
        } else if hl.dme.contains(&name) {
            MarkerStyle { color: hl.dme_color.to_string(), size: hl.size }
        } else {
            self.waypoint_marker.clone()
        }
    }
}

/// Waypoints drawn larger and in a distinct colour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WaypointHighlights {
    pub entry_exit: Vec<String>,
    pub holding: Vec<String>,
    pub dme: Vec<String>,
    pub size: f64,
    pub holding_color: String,
    pub dme_color: String,
}

impl Default for WaypointHighlights {
    fn default() -> Self {
        let names = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            entry_exit: names(&["KEXAS", "PASPU", "REMES", "VAMPO"]),
            holding: names(&["NYLON", "KEXAS", "REMES", "BOBAG", "VAMPO"]),
            dme: names(&["BTM", "PU", "SJ", "TPG", "VJB", "VMR", "VTK"]),
            size: 12_f64,
            holding_color: "orangered".to_string(),
            dme_color: "orange".to_string(),
        }
    }
}
