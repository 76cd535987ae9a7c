use std::fmt::Display;

use geojson::{feature::Id, Feature, Geometry, Value};
use serde::{Deserialize, Serialize};
use serde_json::Map;
use uuid::Uuid;

use crate::{
    coord::GeoPoint,
    style::{OverlayStyle, Shape},
};

pub mod builders;
pub mod ring;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverlayKind {
    Sector,
    FirBoundary,
    Airport,
    Runway,
    Waypoint,
    Procedure,
    Note,
    RadiusRing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RouteType {
    Star,
    Sid,
}

impl Display for RouteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteType::Star => write!(f, "STAR"),
            RouteType::Sid => write!(f, "SID"),
        }
    }
}

/// Runway and procedure type a STAR/SID overlay is keyed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureRoute {
    pub runway: String,
    pub route_type: RouteType,
}

/// One drawable chart feature.
///
/// Everything except the visibility flag is fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    pub id: Uuid,
    pub kind: OverlayKind,
    pub name: String,
    pub shape: Shape,
    /// Empty for legend-only entries
    pub geometry: Vec<GeoPoint>,
    pub style: OverlayStyle,
    /// Legend grouping, cosmetic only
    pub group: Option<String>,
    pub route: Option<ProcedureRoute>,
    /// One entry per vertex, or a single entry for the whole overlay
    pub hover: Vec<String>,
    pub label: Option<String>,
    visible: bool,
}

impl Overlay {
    pub fn new(kind: OverlayKind, name: impl Into<String>, shape: Shape, geometry: Vec<GeoPoint>, style: OverlayStyle) -> Self {
        Overlay {
            id: Uuid::new_v4(),
            kind,
            name: name.into(),
            shape,
            geometry,
            style,
            group: None,
            route: None,
            hover: Vec::new(),
            label: None,
            visible: false,
        }
    }

    pub fn with_group(mut self, group: Option<String>) -> Self {
        self.group = group;
        self
    }

    pub fn with_route(mut self, runway: impl Into<String>, route_type: RouteType) -> Self {
        self.route = Some(ProcedureRoute { runway: runway.into(), route_type });
        self
    }

    pub fn with_hover(mut self, hover: Vec<String>) -> Self {
        self.hover = hover;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_legend_only(&self) -> bool {
        self.geometry.is_empty()
    }

    fn geojson_geometry(&self) -> Option<Geometry> {
        let positions = self.geometry.iter().map(|pt| pt.to_position()).collect::<Vec<Vec<f64>>>();
        let value = match (self.shape, positions.len()) {
            (_, 0) => return None,
            (Shape::Polygon, n) if n >= 3 => Value::Polygon(vec![positions]),
            (Shape::Polygon | Shape::Line | Shape::LineWithMarkers, n) if n >= 2 => Value::LineString(positions),
            (_, 1) => Value::Point(positions[0].clone()),
            _ => Value::MultiPoint(positions),
        };

        Some(Geometry::new(value))
    }

    pub fn to_feature(&self) -> anyhow::Result<Feature> {
        let mut props_map = Map::new();
        props_map.insert("kind".to_string(), serde_json::to_value(self.kind)?);
        props_map.insert("name".to_string(), serde_json::to_value(&self.name)?);
        props_map.insert("shape".to_string(), serde_json::to_value(self.shape)?);
        props_map.insert("visible".to_string(), serde_json::to_value(self.visible)?);
        props_map.insert("lineWidth".to_string(), serde_json::to_value(self.style.line_width)?);
        if let Some(fill) = &self.style.fill_color {
            props_map.insert("fillColor".to_string(), serde_json::to_value(fill)?);
        }
        if let Some(line) = &self.style.line_color {
            props_map.insert("color".to_string(), serde_json::to_value(line)?);
        }
        if let Some(size) = self.style.marker_size {
            props_map.insert("markerSize".to_string(), serde_json::to_value(size)?);
        }
        if let Some(marker) = &self.style.marker_color {
            props_map.insert("markerColor".to_string(), serde_json::to_value(marker)?);
        }
        if let Some(group) = &self.group {
            props_map.insert("group".to_string(), serde_json::to_value(group)?);
        }
        if let Some(route) = &self.route {
            props_map.insert("runway".to_string(), serde_json::to_value(&route.runway)?);
            props_map.insert("routeType".to_string(), serde_json::to_value(route.route_type)?);
        }
        if let Some(label) = &self.label {
            props_map.insert("text".to_string(), serde_json::to_value(label)?);
            props_map.insert("showText".to_string(), serde_json::to_value(true)?);
            if let Some(size) = self.style.text_size {
                props_map.insert("textSize".to_string(), serde_json::to_value(size)?);
            }
        }
        if !self.hover.is_empty() {
            props_map.insert("hover".to_string(), serde_json::to_value(&self.hover)?);
        }

        Ok(Feature {
            id: Some(Id::String(self.id.to_string())),
            bbox: None,
            foreign_members: None,
            geometry: self.geojson_geometry(),
            properties: Some(props_map),
        })
    }
}
