//! Reading RON configuration from disk or from the copies compiled into the
//! binary.

use crate::errors::{DataError, DataResult};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Parses RON text. `source_name` only labels the error.
pub fn parse_ron<T: DeserializeOwned>(source_name: &str, content: &str) -> DataResult<T> {
    ron::from_str(content).map_err(|err| DataError::Parse {
        source_name: source_name.to_string(),
        message: err.to_string(),
    })
}

/// Reads and parses a RON file.
pub fn load_ron<T: DeserializeOwned>(path: &Path) -> DataResult<T> {
    let content = fs::read_to_string(path).map_err(|err| DataError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "loaded data file");
    parse_ron(&path.display().to_string(), &content)
}
