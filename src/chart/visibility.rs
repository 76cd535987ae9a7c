use super::selection::{LayerCategory, UiSelection};
use crate::overlay::{Overlay, OverlayKind, RouteType};

/// Whether `overlay` is shown under `selection`.
///
/// Procedures follow the runway dropdowns only; every other kind follows its
/// layer toggle, except notes and the radius ring which are always shown.
pub fn resolve(overlay: &Overlay, selection: &UiSelection) -> bool {
    if overlay.kind == OverlayKind::Procedure {
        if let Some(route) = &overlay.route {
            let selected = match route.route_type {
                RouteType::Star => selection.arrival_runway.as_deref(),
                RouteType::Sid => selection.departure_runway.as_deref(),
            };
            if selected == Some(route.runway.as_str()) {
                return true;
            }
        }
    }

    match overlay.kind {
        OverlayKind::Airport | OverlayKind::Runway => selection.has_layer(LayerCategory::Aerodrome),
        OverlayKind::Waypoint => selection.has_layer(LayerCategory::Waypoint),
        OverlayKind::Sector => selection.has_layer(LayerCategory::Sector),
        OverlayKind::FirBoundary => selection.has_layer(LayerCategory::Fir),
        OverlayKind::RadiusRing | OverlayKind::Note => true,
        OverlayKind::Procedure => false,
    }
}
