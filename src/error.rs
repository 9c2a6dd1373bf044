use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EnrichError>;

/// Where in the document a record sits, for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
  Document,
  ReferencePoints,
  ReferencePoint(usize),
  Paths,
  Path(usize),
  PathPoints(usize),
  PathPoint(usize, usize),
}

impl fmt::Display for Location {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Location::Document => write!(f, "document"),
      Location::ReferencePoints => write!(f, "points"),
      Location::ReferencePoint(i) => write!(f, "points[{}]", i),
      Location::Paths => write!(f, "paths"),
      Location::Path(i) => write!(f, "paths[{}]", i),
      Location::PathPoints(i) => write!(f, "paths[{}].points", i),
      Location::PathPoint(i, j) => write!(f, "paths[{}].points[{}]", i, j),
    }
  }
}

#[derive(Error, Debug)]
pub enum EnrichError {
  #[error("cannot access {}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid JSON in {}", path.display())]
  Json {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("malformed input at {location}: {reason}")]
  Malformed { location: Location, reason: String },
}

impl EnrichError {
  pub fn malformed(location: Location, reason: impl Into<String>) -> Self {
    EnrichError::Malformed {
      location,
      reason: reason.into(),
    }
  }
}
