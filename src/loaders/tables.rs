use std::{collections::HashMap, fs::File, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    coord::GeoPoint,
    style::{BoundaryStyle, LabelBoxStyle, PolygonStyle},
};

/// `(latitude, longitude)` in table notation, e.g. `("013112N", "1035936E")`.
pub type DmsPair = (String, String);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorEntry {
    pub name: String,
    pub coordinates: Vec<DmsPair>,
    #[serde(default)]
    pub style: PolygonStyle,
    pub group: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirEntry {
    pub name: String,
    pub coordinates: Vec<DmsPair>,
    /// Overrides the config-wide boundary style
    pub style: Option<BoundaryStyle>,
    /// Position of the `FIR <name>` caption; no caption when absent
    pub label: Option<GeoPoint>,
    pub group: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelBoxEntry {
    pub text: String,
    pub center: GeoPoint,
    pub width_km: f64,
    pub height_km: f64,
    #[serde(default)]
    pub style: LabelBoxStyle,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportEntry {
    pub name: String,
    pub code: String,
    pub lat: f64,
    pub lon: f64,
    pub group: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunwayEntry {
    pub name: String,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    /// Restricted or military strips are drawn in the inactive style
    #[serde(default = "default_true")]
    pub active: bool,
    pub group: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaypointEntry {
    pub name: String,
    pub lat: String,
    pub lon: String,
}

/// Procedures flyable from one runway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunwayProcedures {
    pub runway: String,
    #[serde(default)]
    pub stars: Vec<String>,
    #[serde(default)]
    pub sids: Vec<String>,
}

/// Every static table the chart is built from. Table order is drawing order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartTables {
    pub sectors: Vec<SectorEntry>,
    pub firs: Vec<FirEntry>,
    pub label_boxes: Vec<LabelBoxEntry>,
    pub airports: Vec<AirportEntry>,
    pub runways: Vec<RunwayEntry>,
    pub waypoints: Vec<WaypointEntry>,
    /// Waypoints referenced by STARs and SIDs
    pub procedure_waypoints: HashMap<String, DmsPair>,
    pub stars: HashMap<String, Vec<String>>,
    pub sids: HashMap<String, Vec<String>>,
    pub runway_procedures: Vec<RunwayProcedures>,
}

impl ChartTables {
    pub fn try_new_from_file(file: impl AsRef<Path>) -> anyhow::Result<Self> {
        let tables: ChartTables = serde_json::from_reader(File::open(&file).with_context(|| format!("Could not open {}", file.as_ref().display()))?)
            .context("Invalid chart tables Json")?;

        Ok(tables)
    }

    pub fn airport(&self, code: &str) -> Option<&AirportEntry> {
        self.airports.iter().find(|apt| apt.code == code)
    }
}
