//! Degree/decimal-minute position conversions.
//!
//! The buoy reports positions in three shapes depending on the source:
//! `"48 39.71N"` from the controller, NMEA `"4839.7541"` plus a hemisphere
//! field from the GPS, and `"48°38.459'N"` from the Metis logger. All three
//! reduce to hemisphere-signed decimal degrees rounded to 4 places.

use std::sync::LazyLock;

use regex::Regex;

use super::error::FieldError;
use super::value::round_places;

static DEGREE_MINUTE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)°(\d+\.\d+)'(\S)$").expect("Invalid position regex"));

/// Hemisphere sign: N/E positive, S/W negative.
fn hemisphere_sign(hemisphere: &str) -> Result<f64, FieldError> {
    match hemisphere {
        "N" | "E" => Ok(1.0),
        "S" | "W" => Ok(-1.0),
        _ => Err(FieldError::BadHemisphere(hemisphere.to_string())),
    }
}

fn signed_degrees(degrees: f64, minutes: f64, hemisphere: &str) -> Result<f64, FieldError> {
    let sign = hemisphere_sign(hemisphere)?;
    Ok(round_places(sign * (degrees + minutes / 60.0), 4))
}

/// Decode a `"DD MM.mmH"` position such as `"48 39.71N"` or `"068 34.90W"`.
pub fn decode_position(field: &str) -> Result<f64, FieldError> {
    let bad = || FieldError::BadPosition(field.to_string());
    let (degrees, rest) = field.trim().split_once(' ').ok_or_else(bad)?;
    let rest = rest.trim();
    if rest.len() < 2 {
        return Err(bad());
    }
    let (minutes, hemisphere) = rest.split_at(rest.len() - 1);
    let degrees: f64 = degrees.parse().map_err(|_| bad())?;
    let minutes: f64 = minutes.parse().map_err(|_| bad())?;
    signed_degrees(degrees, minutes, hemisphere)
}

/// Decode an NMEA `"DDMM.mmmm"` position with its separate hemisphere field,
/// such as `"4839.7541"` + `"N"`.
pub fn decode_nmea_position(field: &str, hemisphere: &str) -> Result<f64, FieldError> {
    let field = field.trim();
    // The minutes part is always 7 characters: "MM.mmmm".
    if field.len() <= 7 {
        return Err(FieldError::BadPosition(field.to_string()));
    }
    let (degrees, minutes) = field.split_at(field.len() - 7);
    let degrees: f64 = degrees
        .parse()
        .map_err(|_| FieldError::BadPosition(field.to_string()))?;
    let minutes: f64 = minutes
        .parse()
        .map_err(|_| FieldError::BadPosition(field.to_string()))?;
    signed_degrees(degrees, minutes, hemisphere)
}

/// Decode a Metis `"DD°MM.mmm'H"` position such as `"48°38.459'N"`.
pub fn decode_degree_symbol_position(field: &str) -> Result<f64, FieldError> {
    let captures = DEGREE_MINUTE_REGEX
        .captures(field.trim())
        .ok_or_else(|| FieldError::BadPosition(field.to_string()))?;
    let degrees: f64 = captures[1]
        .parse()
        .map_err(|_| FieldError::BadPosition(field.to_string()))?;
    let minutes: f64 = captures[2]
        .parse()
        .map_err(|_| FieldError::BadPosition(field.to_string()))?;
    signed_degrees(degrees, minutes, &captures[3])
}
