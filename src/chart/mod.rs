use std::collections::HashSet;

use geojson::FeatureCollection;
use uuid::Uuid;

use crate::{
    config::ChartConfig,
    coord::GeoPoint,
    error::{ChartError, ChartResult},
    loaders::tables::ChartTables,
    overlay::{
        builders::label_box,
        ring::radius_ring,
        Overlay, OverlayKind, ProcedureRoute, RouteType,
    },
    style::{OverlayStyle, RingStyle, Shape},
};

pub mod selection;
pub mod session;
pub mod visibility;

use selection::UiSelection;
use visibility::resolve;

/// Index of the runway preselected in the departure dropdown when the config
/// names none.
const DEFAULT_DEPARTURE_INDEX: usize = 4;

/// One overlay as the renderer sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand<'a> {
    pub id: Uuid,
    pub kind: OverlayKind,
    pub name: &'a str,
    pub shape: Shape,
    pub geometry: &'a [GeoPoint],
    pub style: &'a OverlayStyle,
    pub hover: &'a [String],
    pub label: Option<&'a str>,
    pub visible: bool,
}

impl<'a> From<&'a Overlay> for DrawCommand<'a> {
    fn from(value: &'a Overlay) -> Self {
        DrawCommand {
            id: value.id,
            kind: value.kind,
            name: &value.name,
            shape: value.shape,
            geometry: &value.geometry,
            style: &value.style,
            hover: &value.hover,
            label: value.label.as_deref(),
            visible: value.is_visible(),
        }
    }
}

/// Every overlay of the chart, built once, plus the single radius ring.
#[derive(Debug, Clone)]
pub struct OverlayRegistry {
    overlays: Vec<Overlay>,
    ring: Option<Overlay>,
    ring_reference: GeoPoint,
    ring_style: RingStyle,
    runways: Vec<String>,
    default_selection: UiSelection,
    selection: UiSelection,
}

impl OverlayRegistry {
    /// Registry over prebuilt overlays. Nothing is shown until a selection
    /// is applied.
    pub fn new(overlays: Vec<Overlay>, ring_reference: GeoPoint, ring_style: RingStyle) -> Self {
        OverlayRegistry {
            overlays,
            ring: None,
            ring_reference,
            ring_style,
            runways: Vec::new(),
            default_selection: UiSelection::default(),
            selection: UiSelection::default(),
        }
    }

    /// Builds every overlay from the input tables and applies the default
    /// selection from `config`.
    pub fn try_from_tables(tables: &ChartTables, config: &ChartConfig) -> ChartResult<Self> {
        let ring_reference = tables
            .airport(&config.ring_reference)
            .map(|apt| GeoPoint::new(apt.lat, apt.lon))
            .ok_or_else(|| ChartError::UnknownReference(config.ring_reference.to_string()))?;

        let mut overlays = Vec::new();

        // Sectors
        for entry in &tables.sectors {
            let sector = Overlay::try_from_dms_polygon(OverlayKind::Sector, &entry.name, &entry.coordinates, &entry.style)
                .map_err(|e| e.in_entry(format!("sector {}", entry.name)))?;
            overlays.push(sector.with_group(entry.group.clone()));
        }

        // FIRs
        for entry in &tables.firs {
            let style = entry.style.as_ref().unwrap_or(&config.fir_boundary);
            let fir = Overlay::try_from_dms_boundary(&entry.name, &entry.coordinates, style)
                .map_err(|e| e.in_entry(format!("FIR {}", entry.name)))?;
            overlays.push(fir.with_group(entry.group.clone().or(Some("FIR".to_string()))));

            if let Some(position) = entry.label {
                overlays.push(Overlay::fir_label(&entry.name, position, style).with_group(entry.group.clone().or(Some("FIR".to_string()))));
            }
        }

        for entry in &tables.label_boxes {
            let (rect, label) = label_box(OverlayKind::FirBoundary, entry.center, entry.width_km, entry.height_km, &entry.text, &entry.style);
            overlays.push(rect);
            overlays.push(label);
        }

        // Airports
        for entry in &tables.airports {
            let group = entry.group.clone().unwrap_or(entry.code.to_string());
            overlays.push(Overlay::airport(&entry.name, &entry.code, GeoPoint::new(entry.lat, entry.lon), &config.airport_marker).with_group(Some(group)));
        }

        // Runways
        for entry in &tables.runways {
            let style = if entry.active { &config.runway_active } else { &config.runway_inactive };
            let runway = Overlay::try_from_decimal_polygon(OverlayKind::Runway, &entry.name, &entry.lat, &entry.lon, style)
                .map_err(|e| e.in_entry(format!("runway {}", entry.name)))?;
            overlays.push(runway.with_group(entry.group.clone()));
        }
        overlays.push(Overlay::note(
            "Red RWY: Restricted/Military",
            Shape::Polygon,
            OverlayStyle {
                fill_color: Some(config.runway_inactive.fill_color.to_string()),
                line_color: Some(config.runway_inactive.line_color.to_string()),
                line_width: config.runway_inactive.line_width,
                ..Default::default()
            },
        ));

        // STARs and SIDs
        let mut procedure_count = 0;
        let mut built = HashSet::new();
        for rwy in &tables.runway_procedures {
            for (route_type, names, table) in [(RouteType::Star, &rwy.stars, &tables.stars), (RouteType::Sid, &rwy.sids, &tables.sids)] {
                for proc_name in names {
                    if !built.insert((rwy.runway.as_str(), route_type, proc_name.as_str())) {
                        log::warn!("{} {} listed twice for runway {}", route_type, proc_name, rwy.runway);
                        continue;
                    }
                    let Some(waypoint_names) = table.get(proc_name) else {
                        log::debug!("{} {} for runway {} has no route", route_type, proc_name, rwy.runway);
                        continue;
                    };
                    let route = ProcedureRoute { runway: rwy.runway.to_string(), route_type };
                    let procedure = Overlay::try_from_procedure(proc_name, route, waypoint_names, &tables.procedure_waypoints, &config.procedure)
                        .map_err(|e| e.in_entry(format!("{} {} ({})", route_type, proc_name, rwy.runway)))?;
                    if let Some(procedure) = procedure {
                        overlays.push(procedure);
                        procedure_count += 1;
                    }
                }
            }
        }

        overlays.push(Overlay::note(
            &format!("map version: {}", config.version),
            Shape::Line,
            OverlayStyle {
                line_color: Some("black".to_string()),
                line_width: 2_f64,
                ..Default::default()
            },
        ));

        // Waypoints
        for entry in &tables.waypoints {
            let style = config.waypoint_style(&entry.name);
            let waypoint = Overlay::try_from_dms_waypoint(&entry.name, &entry.lat, &entry.lon, &style)
                .map_err(|e| e.in_entry(format!("waypoint {}", entry.name)))?;
            overlays.push(waypoint);
        }
        let highlights = &config.waypoint_highlights;
        for (name, colour) in [("Red: Holding Fix", &highlights.holding_color), ("Orange: DME", &highlights.dme_color)] {
            overlays.push(Overlay::note(
                name,
                Shape::Marker,
                OverlayStyle {
                    marker_color: Some(colour.to_string()),
                    marker_size: Some(config.waypoint_marker.size),
                    ..Default::default()
                },
            ));
        }

        log::info!(
            "Built {} overlays ({} procedures) from {} sectors, {} FIRs, {} airports, {} waypoints",
            overlays.len(),
            procedure_count,
            tables.sectors.len(),
            tables.firs.len(),
            tables.airports.len(),
            tables.waypoints.len()
        );

        let mut runways = Vec::<String>::new();
        for rwy in &tables.runway_procedures {
            if !runways.contains(&rwy.runway) {
                runways.push(rwy.runway.to_string());
            }
        }
        let default_selection = default_selection(config, &runways);

        let mut registry = OverlayRegistry::new(overlays, ring_reference, config.ring.clone());
        registry.runways = runways;
        registry.default_selection = default_selection.clone();
        registry.apply_selection(&default_selection);

        Ok(registry)
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn ring(&self) -> Option<&Overlay> {
        self.ring.as_ref()
    }

    pub fn ring_reference(&self) -> GeoPoint {
        self.ring_reference
    }

    /// Runway identifiers offered by the dropdowns, in table order.
    pub fn runways(&self) -> &[String] {
        &self.runways
    }

    pub fn default_selection(&self) -> &UiSelection {
        &self.default_selection
    }

    /// The selection most recently applied.
    pub fn selection(&self) -> &UiSelection {
        &self.selection
    }

    /// All overlays in drawing order, the radius ring last.
    pub fn iter(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.iter().chain(self.ring.iter())
    }

    /// Recomputes every visibility flag for `selection` and regenerates the
    /// radius ring. Flags are resolved in full before any is written.
    pub fn apply_selection(&mut self, selection: &UiSelection) {
        let flags = self.overlays.iter().map(|overlay| resolve(overlay, selection)).collect::<Vec<_>>();
        for (overlay, visible) in self.overlays.iter_mut().zip(flags) {
            overlay.set_visible(visible);
        }
        self.selection = selection.clone();

        self.set_radius(selection.radius_nm);
    }

    /// Replaces the radius ring. Returns `false` and keeps the current ring
    /// when the radius is absent, negative or not a number.
    pub fn set_radius(&mut self, radius_nm: Option<f64>) -> bool {
        let Some(mut ring) = radius_nm.and_then(|nm| radius_ring(self.ring_reference, nm, &self.ring_style)) else {
            log::debug!("Ignoring radius input {:?}", radius_nm);
            return false;
        };

        ring.set_visible(resolve(&ring, &self.selection));
        self.ring = Some(ring);
        true
    }

    pub fn draw_commands(&self) -> Vec<DrawCommand<'_>> {
        self.iter().map(DrawCommand::from).collect()
    }

    pub fn to_feature_collection(&self) -> anyhow::Result<FeatureCollection> {
        let features = self.iter().map(Overlay::to_feature).collect::<anyhow::Result<Vec<_>>>()?;

        Ok(FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        })
    }
}

fn default_selection(config: &ChartConfig, runways: &[String]) -> UiSelection {
    let arrival = config.default_arrival_runway.clone().or_else(|| runways.first().cloned());
    let departure = config.default_departure_runway.clone().or_else(|| match runways.get(DEFAULT_DEPARTURE_INDEX) {
        Some(rwy) => Some(rwy.to_string()),
        None => {
            if !runways.is_empty() {
                log::warn!("Only {} runways in the procedure table, preselecting the last for departures", runways.len());
            }
            runways.last().cloned()
        }
    });

    for rwy in arrival.iter().chain(departure.iter()) {
        if !runways.contains(rwy) {
            log::warn!("Default runway {} has no procedures", rwy);
        }
    }

    UiSelection {
        arrival_runway: arrival,
        departure_runway: departure,
        layers: config.default_layers.clone(),
        radius_nm: config.default_radius_nm,
    }
}
