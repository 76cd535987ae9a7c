//! Conversion between the fixed-width DMS strings used by the source tables
//! and decimal degrees.

use serde::{Deserialize, Serialize};

use crate::error::ChartResult;

pub mod dms;
pub use dms::{DmsCoordinate, Hemisphere};

/// Precision applied to hover/display values.
pub const DISPLAY_PRECISION: u32 = 5;
/// Precision applied right after DMS parsing inside the builders.
pub const NORMALIZED_PRECISION: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        GeoPoint { lat, lon }
    }

    pub fn normalized(self) -> Self {
        round_coordinate(self, NORMALIZED_PRECISION)
    }

    /// GeoJSON position order (`[lon, lat]`).
    pub fn to_position(self) -> Vec<f64> {
        vec![self.lon, self.lat]
    }
}

/// Parses a `(latitude, longitude)` DMS pair.
///
/// The empty pair `("", "")` is the table sentinel for "no coordinate" and
/// yields `Ok(None)`. The result is not rounded.
pub fn parse_dms(lat: &str, lon: &str) -> ChartResult<Option<GeoPoint>> {
    if lat.is_empty() && lon.is_empty() {
        return Ok(None);
    }

    let lat = DmsCoordinate::parse_latitude(lat)?.to_decimal();
    let lon = DmsCoordinate::parse_longitude(lon)?.to_decimal();
    Ok(Some(GeoPoint { lat, lon }))
}

pub fn parse_dms_list<S: AsRef<str>>(pairs: &[(S, S)]) -> ChartResult<Vec<Option<GeoPoint>>> {
    pairs
        .iter()
        .map(|(lat, lon)| parse_dms(lat.as_ref(), lon.as_ref()))
        .collect()
}

/// Rounds both fields to `precision` decimals, ties to even.
pub fn round_coordinate(point: GeoPoint, precision: u32) -> GeoPoint {
    GeoPoint {
        lat: round_half_even(point.lat, precision),
        lon: round_half_even(point.lon, precision),
    }
}

fn round_half_even(value: f64, precision: u32) -> f64 {
    let factor = 10_f64.powi(precision as i32);
    (value * factor).round_ties_even() / factor
}

/// Formats a point as `(DDMMSSH, DDDMMSSH)` for hover text.
///
/// Not an exact inverse of [`parse_dms`]: seconds are rounded to the nearest
/// whole second and carried so that no field ever reads 60.
pub fn to_dms_display_string(point: GeoPoint) -> String {
    format!("({}, {})", format_latitude(point.lat), format_longitude(point.lon))
}

pub fn format_latitude(value: f64) -> String {
    let (deg, min, sec) = split_sexagesimal(value);
    format!("{:02}{:02}{:02}{}", deg, min, sec, Hemisphere::for_latitude(value))
}

pub fn format_longitude(value: f64) -> String {
    let (deg, min, sec) = split_sexagesimal(value);
    format!("{:03}{:02}{:02}{}", deg, min, sec, Hemisphere::for_longitude(value))
}

fn split_sexagesimal(value: f64) -> (u32, u32, u32) {
    let value = value.abs();
    let mut degrees = value.trunc() as u32;
    let minutes_float = (value - f64::from(degrees)) * 60_f64;
    let mut minutes = minutes_float.trunc() as u32;
    let mut seconds = ((minutes_float - f64::from(minutes)) * 60_f64).round_ties_even() as u32;

    if seconds == 60 {
        seconds = 0;
        minutes += 1;
        if minutes == 60 {
            minutes = 0;
            degrees += 1;
        }
    }

    (degrees, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_changi_reference() {
        let point = parse_dms("013112N", "1035936E").unwrap().unwrap();
        assert!((point.lat - 1.52).abs() < 1e-4);
        assert!((point.lon - 103.993333).abs() < 1e-4);
    }

    #[test]
    fn sentinel_pair_is_absent() {
        assert_eq!(parse_dms("", "").unwrap(), None);
    }

    #[test]
    fn half_sentinel_is_a_format_error() {
        assert!(parse_dms("", "1035936E").is_err());
        assert!(parse_dms("013112N", "").is_err());
    }

    #[test]
    fn values_past_the_poles_or_antimeridian_are_rejected() {
        assert!(parse_dms("903000N", "1000000E").is_err());
        assert!(parse_dms("000000N", "1803000E").is_err());
    }

    #[test]
    fn list_preserves_order() {
        let pairs = [("013112N", "1035936E"), ("011500S", "1040000W"), ("", "")];
        let points = parse_dms_list(&pairs).unwrap();
        assert_eq!(points.len(), 3);
        assert!(points[0].unwrap().lat > 0_f64);
        assert!(points[1].unwrap().lon < 0_f64);
        assert!(points[2].is_none());
        assert!(parse_dms_list::<&str>(&[]).unwrap().is_empty());
    }

    #[test]
    fn rounding_uses_ties_to_even() {
        let rounded = round_coordinate(GeoPoint::new(0.125, -2.5), 2);
        assert_eq!(rounded.lat, 0.12);
        let whole = round_coordinate(GeoPoint::new(2.5, 3.5), 0);
        assert_eq!(whole, GeoPoint::new(2.0, 4.0));
        assert_eq!(round_coordinate(GeoPoint::new(1.234567891, 103.9933333), 5), GeoPoint::new(1.23457, 103.99333));
    }

    #[test]
    fn display_string_matches_source_notation() {
        let point = parse_dms("013112N", "1035936E").unwrap().unwrap();
        assert_eq!(to_dms_display_string(point), "(013112N, 1035936E)");
        assert_eq!(to_dms_display_string(GeoPoint::new(-1.25, -45.3)), "(011500S, 0451800W)");
    }

    #[test]
    fn seconds_carry_into_minutes_and_degrees() {
        assert_eq!(format_latitude(1.99999861), "020000N");
        assert_eq!(format_longitude(-103.99999861), "1040000W");
        // 59.7 seconds on an otherwise ordinary minute
        assert_eq!(format_latitude(1.5 + 59.7 / 3600_f64), "013100N");
    }

    #[test]
    fn display_round_trips_hemisphere_and_degrees() {
        for (lat, lon) in [("013112N", "1035936E"), ("453059S", "0001501W"), ("000001N", "1795959E")] {
            let point = parse_dms(lat, lon).unwrap().unwrap();
            let shown = to_dms_display_string(point.normalized());
            assert_eq!(shown, format!("({lat}, {lon})"));
        }
    }
}
