use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hemisphere {
    N,
    S,
    E,
    W,
}

impl Hemisphere {
    pub fn is_negative(self) -> bool {
        matches!(self, Hemisphere::S | Hemisphere::W)
    }

    pub fn for_latitude(value: f64) -> Self {
        if value < 0_f64 { Hemisphere::S } else { Hemisphere::N }
    }

    pub fn for_longitude(value: f64) -> Self {
        if value < 0_f64 { Hemisphere::W } else { Hemisphere::E }
    }
}

impl Display for Hemisphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            Hemisphere::N => 'N',
            Hemisphere::S => 'S',
            Hemisphere::E => 'E',
            Hemisphere::W => 'W',
        };
        write!(f, "{c}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn degree_digits(self) -> usize {
        match self {
            Axis::Latitude => 2,
            Axis::Longitude => 3,
        }
    }

    fn max_degrees(self) -> u16 {
        match self {
            Axis::Latitude => 90,
            Axis::Longitude => 180,
        }
    }
}

/// A sexagesimal coordinate component as written in the AIP tables,
/// e.g. `013112N` or `1035936E`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DmsCoordinate {
    pub degrees: u16,
    pub minutes: u8,
    pub seconds: u8,
    pub hemisphere: Hemisphere,
}

impl DmsCoordinate {
    /// Parses a 7 character `DDMMSSH` latitude.
    pub fn parse_latitude(value: &str) -> ChartResult<Self> {
        Self::parse(value, Axis::Latitude)
    }

    /// Parses an 8 character `DDDMMSSH` longitude.
    pub fn parse_longitude(value: &str) -> ChartResult<Self> {
        Self::parse(value, Axis::Longitude)
    }

    fn parse(value: &str, axis: Axis) -> ChartResult<Self> {
        let deg_len = axis.degree_digits();
        if !value.is_ascii() || value.len() != deg_len + 5 {
            return Err(ChartError::format(value, "unexpected length"));
        }

        let degrees = parse_unsigned(value, &value[..deg_len])?;
        let minutes = parse_unsigned(value, &value[deg_len..deg_len + 2])?;
        let seconds = parse_unsigned(value, &value[deg_len + 2..deg_len + 4])?;

        let hemisphere = match (axis, &value[deg_len + 4..]) {
            (Axis::Latitude, "N") => Hemisphere::N,
            (Axis::Latitude, "S") => Hemisphere::S,
            (Axis::Longitude, "E") => Hemisphere::E,
            (Axis::Longitude, "W") => Hemisphere::W,
            _ => return Err(ChartError::format(value, "invalid hemisphere")),
        };

        if minutes > 59 || seconds > 59 {
            return Err(ChartError::format(value, "minutes and seconds must be below 60"));
        }
        if degrees > axis.max_degrees() || (degrees == axis.max_degrees() && (minutes > 0 || seconds > 0)) {
            return Err(ChartError::format(value, "degrees out of range"));
        }

        Ok(DmsCoordinate {
            degrees,
            minutes: minutes as u8,
            seconds: seconds as u8,
            hemisphere,
        })
    }

    pub fn to_decimal(&self) -> f64 {
        let value = f64::from(self.degrees)
            + f64::from(self.minutes) / 60_f64
            + f64::from(self.seconds) / 3600_f64;

        if self.hemisphere.is_negative() { -value } else { value }
    }
}

fn parse_unsigned(input: &str, segment: &str) -> ChartResult<u16> {
    // `str::parse` accepts a leading '+', the tables never carry one
    if !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ChartError::format(input, "segment is not an unsigned integer"));
    }
    segment.parse().map_err(|_| ChartError::format(input, "segment is not an unsigned integer"))
}
