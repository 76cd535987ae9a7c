use serde::{Deserialize, Serialize};

mod colour;
pub use colour::{resolve_fill, Colour};

/// How the renderer should draw an overlay's geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    /// Filled ring
    Polygon,
    Line,
    LineWithMarkers,
    Marker,
    /// Text only, anchored at the single geometry point
    Text,
    /// Marker plus text label
    LabelledMarker,
}

/// Fully resolved drawing attributes handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayStyle {
    pub fill_color: Option<String>,
    pub line_color: Option<String>,
    pub line_width: f64,
    pub marker_size: Option<f64>,
    pub marker_color: Option<String>,
    pub text_size: Option<f64>,
}

/// Style for filled polygons: sectors and runways.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolygonStyle {
    /// CSS colour name, hex, or an already formatted `rgba(...)` string
    pub fill_color: String,
    pub line_color: String,
    pub opacity: f64,
    pub line_width: f64,
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            fill_color: "lightgrey".to_string(),
            line_color: "grey".to_string(),
            opacity: 0.3,
            line_width: 1_f64,
        }
    }
}

/// Style for unfilled boundaries (FIRs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoundaryStyle {
    pub line_color: String,
    pub line_width: f64,
    pub label_size: f64,
    pub label_color: String,
}

impl Default for BoundaryStyle {
    fn default() -> Self {
        Self {
            line_color: "black".to_string(),
            line_width: 1.5,
            label_size: 15_f64,
            label_color: "black".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkerStyle {
    pub color: String,
    pub size: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: "royalblue".to_string(),
            size: 9_f64,
        }
    }
}

/// Style for a labelled rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelBoxStyle {
    pub line_color: String,
    pub fill_color: String,
    pub text_color: String,
    pub font_size: f64,
    pub line_width: f64,
}

impl Default for LabelBoxStyle {
    fn default() -> Self {
        Self {
            line_color: "black".to_string(),
            fill_color: "rgba(255,255,255,1)".to_string(),
            text_color: "black".to_string(),
            font_size: 12_f64,
            line_width: 2_f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcedureStyle {
    pub star_color: String,
    pub sid_color: String,
    pub line_width: f64,
}

impl Default for ProcedureStyle {
    fn default() -> Self {
        Self {
            star_color: "salmon".to_string(),
            sid_color: "mediumseagreen".to_string(),
            line_width: 2_f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RingStyle {
    pub line_color: String,
    pub line_width: f64,
}

impl Default for RingStyle {
    fn default() -> Self {
        Self {
            line_color: "mediumblue".to_string(),
            line_width: 2_f64,
        }
    }
}
