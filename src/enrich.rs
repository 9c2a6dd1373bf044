use log::debug;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::coord::point_key;
use crate::error::{EnrichError, Location, Result};

pub const LABEL_FIELD: &str = "label";
const POINTS_FIELD: &str = "points";
const PATHS_FIELD: &str = "paths";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnrichStats {
  pub reference_points: usize,
  pub path_points: usize,
  pub labeled: usize,
}

/// Coordinate key to label, built from the document's reference points.
#[derive(Debug, Default)]
pub struct LabelLookup {
  labels: HashMap<String, Value>,
}

impl LabelLookup {
  /// Later points overwrite earlier ones that share a key. A point without a
  /// label is recorded with an empty one, so it can still shadow an earlier
  /// labeled point.
  pub fn from_points(points: &[Value]) -> Result<Self> {
    let mut labels = HashMap::with_capacity(points.len());
    for (i, point) in points.iter().enumerate() {
      let location = Location::ReferencePoint(i);
      let point = as_object(point, location)?;
      let key = point_key(point, location)?;
      let label = point
        .get(LABEL_FIELD)
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()));
      labels.insert(key, label);
    }
    Ok(LabelLookup { labels })
  }

  /// Returns the label for `key`, skipping empty ones.
  pub fn get(&self, key: &str) -> Option<&Value> {
    self.labels.get(key).filter(|label| has_text(label))
  }

  pub fn key_count(&self) -> usize {
    self.labels.len()
  }
}

// null, false, zero and empty strings or containers never label a point
fn has_text(label: &Value) -> bool {
  match label {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(items) => !items.is_empty(),
    Value::Object(fields) => !fields.is_empty(),
  }
}

/// Copies reference labels onto unlabeled path points with the same
/// coordinate key. Only `label` fields are ever added; everything else in the
/// document is left as it was.
pub fn enrich(document: &mut Value) -> Result<EnrichStats> {
  let root = document
    .as_object_mut()
    .ok_or_else(|| EnrichError::malformed(Location::Document, "expected a JSON object"))?;

  let mut stats = EnrichStats::default();
  let lookup = match root.get(POINTS_FIELD) {
    Some(points) => {
      let points = as_array(points, Location::ReferencePoints)?;
      stats.reference_points = points.len();
      LabelLookup::from_points(points)?
    }
    None => LabelLookup::default(),
  };
  debug!(
    "indexed {} reference points under {} coordinate keys",
    stats.reference_points,
    lookup.key_count()
  );

  let paths = match root.get_mut(PATHS_FIELD) {
    Some(paths) => as_array_mut(paths, Location::Paths)?,
    None => return Ok(stats),
  };

  for (i, path) in paths.iter_mut().enumerate() {
    let path = as_object_mut(path, Location::Path(i))?;
    let points = match path.get_mut(POINTS_FIELD) {
      Some(points) => as_array_mut(points, Location::PathPoints(i))?,
      None => continue,
    };

    for (j, point) in points.iter_mut().enumerate() {
      let location = Location::PathPoint(i, j);
      let point = as_object_mut(point, location)?;
      stats.path_points += 1;

      // every point must carry coordinates, labeled or not
      let key = point_key(point, location)?;
      if point.contains_key(LABEL_FIELD) {
        continue;
      }
      if let Some(label) = lookup.get(&key) {
        point.insert(LABEL_FIELD.to_string(), label.clone());
        stats.labeled += 1;
      }
    }
  }

  Ok(stats)
}

fn as_object(value: &Value, location: Location) -> Result<&Map<String, Value>> {
  value
    .as_object()
    .ok_or_else(|| EnrichError::malformed(location, "expected a JSON object"))
}

fn as_object_mut(value: &mut Value, location: Location) -> Result<&mut Map<String, Value>> {
  value
    .as_object_mut()
    .ok_or_else(|| EnrichError::malformed(location, "expected a JSON object"))
}

fn as_array(value: &Value, location: Location) -> Result<&Vec<Value>> {
  value
    .as_array()
    .ok_or_else(|| EnrichError::malformed(location, "expected an array"))
}

fn as_array_mut(value: &mut Value, location: Location) -> Result<&mut Vec<Value>> {
  value
    .as_array_mut()
    .ok_or_else(|| EnrichError::malformed(location, "expected an array"))
}
