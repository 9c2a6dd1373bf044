use serde_json::Value;
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::{EnrichError, Result};

pub fn read_document(path: &Path) -> Result<Value> {
  let file = File::open(path).map_err(|source| EnrichError::Io {
    path: path.to_path_buf(),
    source,
  })?;
  serde_json::from_reader(BufReader::new(file)).map_err(|source| {
    if source.is_io() {
      EnrichError::Io {
        path: path.to_path_buf(),
        source: source.into(),
      }
    } else {
      EnrichError::Json {
        path: path.to_path_buf(),
        source,
      }
    }
  })
}

/// Writes `document` pretty-printed with 2-space indentation. The target is
/// only replaced once the whole document is on disk.
pub fn write_document(path: &Path, document: &Value) -> Result<()> {
  let mut bytes = serde_json::to_vec_pretty(document).map_err(|source| EnrichError::Json {
    path: path.to_path_buf(),
    source,
  })?;
  bytes.push(b'\n');
  replace_file(path, |file| file.write_all(&bytes)).map_err(|source| EnrichError::Io {
    path: path.to_path_buf(),
    source,
  })
}

// writes into a temp file beside `path`, then renames it over `path`
fn replace_file<F>(path: &Path, write: F) -> io::Result<()>
where
  F: FnOnce(&mut File) -> io::Result<()>,
{
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };
  let mut temp = NamedTempFile::new_in(dir)?;
  write(temp.as_file_mut())?;
  temp.as_file().sync_all()?;
  if let Ok(metadata) = fs::metadata(path) {
    temp.as_file().set_permissions(metadata.permissions())?;
  }
  temp.persist(path).map_err(|err| err.error)?;
  Ok(())
}
