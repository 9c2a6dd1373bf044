use serde_json::{Map, Value};

use crate::error::{EnrichError, Location, Result};

// number of decimals kept when comparing coordinates
pub const KEY_PRECISION: usize = 6;

/// Builds the lookup key for a coordinate, e.g. `1.000000,2.000000`.
///
/// Points match when their keys are equal, which is equality after rounding
/// to `KEY_PRECISION` decimals rather than a distance tolerance.
pub fn coordinate_key(lat: f64, lng: f64) -> String {
  format!("{:.prec$},{:.prec$}", lat, lng, prec = KEY_PRECISION)
}

pub fn point_key(point: &Map<String, Value>, location: Location) -> Result<String> {
  let lat = read_coordinate(point, "lat", location)?;
  let lng = read_coordinate(point, "lng", location)?;
  Ok(coordinate_key(lat, lng))
}

fn read_coordinate(point: &Map<String, Value>, field: &str, location: Location) -> Result<f64> {
  match point.get(field) {
    Some(value) => value.as_f64().ok_or_else(|| {
      EnrichError::malformed(location, format!("`{}` is not a number: {}", field, value))
    }),
    None => Err(EnrichError::malformed(location, format!("missing `{}`", field))),
  }
}
