//! Constructors turning table entries into [`Overlay`]s.
//!
//! Builders only tag overlays with a kind; visibility is decided later by
//! [`crate::chart::visibility::resolve`].

use std::collections::HashMap;

use aviation_calc_util::units::Angle;

use super::{Overlay, OverlayKind, ProcedureRoute, RouteType};
use crate::{
    coord::{self, GeoPoint, DISPLAY_PRECISION},
    error::{ChartError, ChartResult},
    style::{resolve_fill, BoundaryStyle, LabelBoxStyle, MarkerStyle, OverlayStyle, PolygonStyle, ProcedureStyle, Shape},
};

/// Kilometres per degree of latitude.
pub const KM_PER_DEG_LAT: f64 = 110.574;
/// Kilometres per degree of longitude at the equator.
pub const KM_PER_DEG_LON_EQUATOR: f64 = 111.320;

fn parse_ring<S: AsRef<str>>(coordinates: &[(S, S)]) -> ChartResult<Vec<GeoPoint>> {
    let points = coord::parse_dms_list(coordinates)?;
    let total = points.len();
    let ring = points.into_iter().flatten().map(GeoPoint::normalized).collect::<Vec<_>>();
    if ring.len() != total {
        log::debug!("dropped {} absent vertices", total - ring.len());
    }
    Ok(ring)
}

fn vertex_hover(name: &str, points: &[GeoPoint]) -> Vec<String> {
    points
        .iter()
        .enumerate()
        .map(|(i, pt)| {
            let shown = coord::round_coordinate(*pt, DISPLAY_PRECISION);
            format!("{}\n{}\n#{}", name, coord::to_dms_display_string(shown), i)
        })
        .collect()
}

fn polygon_style(style: &PolygonStyle) -> ChartResult<OverlayStyle> {
    Ok(OverlayStyle {
        fill_color: Some(resolve_fill(&style.fill_color, style.opacity)?),
        line_color: Some(style.line_color.to_string()),
        line_width: style.line_width,
        ..Default::default()
    })
}

impl Overlay {
    /// Filled polygon from DMS pairs. The ring is used exactly as given;
    /// closing it is the caller's responsibility.
    pub fn try_from_dms_polygon<S: AsRef<str>>(kind: OverlayKind, name: &str, coordinates: &[(S, S)], style: &PolygonStyle) -> ChartResult<Self> {
        let ring = parse_ring(coordinates)?;
        let hover = vertex_hover(name, &ring);

        Ok(Overlay::new(kind, name, Shape::Polygon, ring, polygon_style(style)?).with_hover(hover))
    }

    /// Filled polygon from parallel decimal latitude/longitude lists.
    pub fn try_from_decimal_polygon(kind: OverlayKind, name: &str, lat: &[f64], lon: &[f64], style: &PolygonStyle) -> ChartResult<Self> {
        if lat.len() != lon.len() {
            return Err(ChartError::MismatchedCoordinates { lat: lat.len(), lon: lon.len() });
        }
        let ring = lat.iter().zip(lon).map(|(lat, lon)| GeoPoint::new(*lat, *lon)).collect::<Vec<_>>();

        Ok(Overlay::new(kind, name, Shape::Polygon, ring, polygon_style(style)?))
    }

    /// Unfilled boundary line from DMS pairs.
    pub fn try_from_dms_boundary<S: AsRef<str>>(name: &str, coordinates: &[(S, S)], style: &BoundaryStyle) -> ChartResult<Self> {
        let line = parse_ring(coordinates)?;
        let hover = vertex_hover(name, &line);
        let overlay_style = OverlayStyle {
            line_color: Some(style.line_color.to_string()),
            line_width: style.line_width,
            ..Default::default()
        };

        Ok(Overlay::new(OverlayKind::FirBoundary, name, Shape::Line, line, overlay_style).with_hover(hover))
    }

    /// Cross marker with a two line `FIR` caption; the word "FIR" is
    /// stripped from `name` for the caption.
    pub fn fir_label(name: &str, position: GeoPoint, style: &BoundaryStyle) -> Self {
        let cleaned = name.replace("FIR", "");
        let overlay_style = OverlayStyle {
            marker_size: Some(30_f64),
            text_size: Some(style.label_size),
            line_color: Some(style.label_color.to_string()),
            ..Default::default()
        };

        Overlay::new(OverlayKind::FirBoundary, name, Shape::LabelledMarker, vec![position], overlay_style)
            .with_label(format!("FIR\n{}", cleaned.trim()))
    }

    /// Airport marker shown as `Name (ICAO)` with the ICAO code as hover.
    pub fn airport(name: &str, code: &str, position: GeoPoint, style: &MarkerStyle) -> Self {
        let overlay_style = OverlayStyle {
            marker_size: Some(style.size),
            marker_color: Some(style.color.to_string()),
            ..Default::default()
        };

        Overlay::new(OverlayKind::Airport, format!("{} ({})", name, code), Shape::Marker, vec![position], overlay_style)
            .with_hover(vec![code.to_string()])
    }

    /// Waypoint marker. The sentinel pair produces a legend-only marker.
    pub fn try_from_dms_waypoint(name: &str, lat: &str, lon: &str, style: &MarkerStyle) -> ChartResult<Self> {
        let overlay_style = OverlayStyle {
            marker_size: Some(style.size),
            marker_color: Some(style.color.to_string()),
            ..Default::default()
        };

        let (geometry, hover) = match coord::parse_dms(lat, lon)? {
            Some(point) => {
                let point = point.normalized();
                let shown = coord::round_coordinate(point, DISPLAY_PRECISION);
                (vec![point], vec![coord::to_dms_display_string(shown)])
            }
            None => (vec![], vec![]),
        };

        Ok(Overlay::new(OverlayKind::Waypoint, name, Shape::Marker, geometry, overlay_style).with_hover(hover))
    }

    /// STAR or SID line through the named waypoints.
    ///
    /// Waypoint names missing from `waypoints` are skipped; `Ok(None)` is
    /// returned when none of them resolve.
    pub fn try_from_procedure(
        name: &str,
        route: ProcedureRoute,
        waypoint_names: &[String],
        waypoints: &HashMap<String, (String, String)>,
        style: &ProcedureStyle,
    ) -> ChartResult<Option<Self>> {
        let mut line = Vec::with_capacity(waypoint_names.len());
        let mut hover = Vec::with_capacity(waypoint_names.len());
        for wp in waypoint_names {
            let Some((lat, lon)) = waypoints.get(wp) else {
                log::debug!("{} {}: waypoint {} has no coordinates", route.route_type, name, wp);
                continue;
            };
            if let Some(point) = coord::parse_dms(lat, lon)? {
                line.push(point.normalized());
                hover.push(wp.to_string());
            }
        }

        if line.is_empty() {
            return Ok(None);
        }

        let colour = match route.route_type {
            RouteType::Star => &style.star_color,
            RouteType::Sid => &style.sid_color,
        };
        let overlay_style = OverlayStyle {
            line_color: Some(colour.to_string()),
            marker_color: Some(colour.to_string()),
            line_width: style.line_width,
            ..Default::default()
        };

        Ok(Some(
            Overlay::new(OverlayKind::Procedure, name, Shape::LineWithMarkers, line, overlay_style)
                .with_route(route.runway, route.route_type)
                .with_group(Some(name.to_string()))
                .with_hover(hover),
        ))
    }

    /// Legend-only entry; never hidden by layer toggles.
    pub fn note(name: &str, shape: Shape, style: OverlayStyle) -> Self {
        Overlay::new(OverlayKind::Note, name, shape, vec![], style).with_group(Some("note".to_string()))
    }
}

/// Rectangle of `width_km` x `height_km` centred on `center` plus a text
/// overlay at the centre.
///
/// Uses a flat earth: [`KM_PER_DEG_LAT`] per degree of latitude and
/// [`KM_PER_DEG_LON_EQUATOR`]·cos(lat) per degree of longitude. The ring runs
/// clockwise from the top left corner and repeats it at the end.
pub fn label_box(kind: OverlayKind, center: GeoPoint, width_km: f64, height_km: f64, text: &str, style: &LabelBoxStyle) -> (Overlay, Overlay) {
    let km_per_deg_lon = KM_PER_DEG_LON_EQUATOR * Angle::from_degrees(center.lat).as_radians().cos();
    let dlat = (height_km / 2_f64) / KM_PER_DEG_LAT;
    let dlon = (width_km / 2_f64) / km_per_deg_lon;

    let ring = vec![
        GeoPoint::new(center.lat + dlat, center.lon - dlon),
        GeoPoint::new(center.lat + dlat, center.lon + dlon),
        GeoPoint::new(center.lat - dlat, center.lon + dlon),
        GeoPoint::new(center.lat - dlat, center.lon - dlon),
        GeoPoint::new(center.lat + dlat, center.lon - dlon),
    ];

    let rect = Overlay::new(
        kind,
        text,
        Shape::Polygon,
        ring,
        OverlayStyle {
            fill_color: Some(style.fill_color.to_string()),
            line_color: Some(style.line_color.to_string()),
            line_width: style.line_width,
            ..Default::default()
        },
    );
    let label = Overlay::new(
        kind,
        text,
        Shape::Text,
        vec![center],
        OverlayStyle {
            line_color: Some(style.text_color.to_string()),
            text_size: Some(style.font_size),
            ..Default::default()
        },
    )
    .with_label(text);

    (rect, label)
}
