use std::f64::consts::PI;

use super::{Overlay, OverlayKind};
use crate::{
    coord::GeoPoint,
    style::{OverlayStyle, RingStyle, Shape},
};

/// Samples over a full turn; the last repeats the first.
pub const RING_SAMPLES: usize = 101;

/// Circle of `radius_nm` around `reference` in degree space.
///
/// One nautical mile is taken as 1/60 degree on both axes, so the ring is
/// not corrected for longitude compression away from the equator.
/// Returns `None` for negative, NaN or infinite radii.
pub fn generate_ring(reference: GeoPoint, radius_nm: f64) -> Option<Vec<GeoPoint>> {
    if !radius_nm.is_finite() || radius_nm < 0_f64 {
        return None;
    }

    let radius_deg = radius_nm / 60_f64;
    let steps = (RING_SAMPLES - 1) as f64;
    let ring = (0..RING_SAMPLES)
        .map(|i| {
            let theta = 2_f64 * PI * i as f64 / steps;
            GeoPoint::new(reference.lat + radius_deg * theta.sin(), reference.lon + radius_deg * theta.cos())
        })
        .collect();

    Some(ring)
}

pub fn ring_name(radius_nm: f64) -> String {
    format!("{} NM Radius Circle", radius_nm)
}

/// Builds the dynamic ring overlay, or `None` if the radius is unusable.
pub fn radius_ring(reference: GeoPoint, radius_nm: f64, style: &RingStyle) -> Option<Overlay> {
    let ring = generate_ring(reference, radius_nm)?;
    let overlay_style = OverlayStyle {
        line_color: Some(style.line_color.to_string()),
        line_width: style.line_width,
        ..Default::default()
    };

    Some(
        Overlay::new(OverlayKind::RadiusRing, ring_name(radius_nm), Shape::Line, ring, overlay_style)
            .with_group(Some("note".to_string())),
    )
}
