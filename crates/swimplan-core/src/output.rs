//! Writing the output document

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::model::OutputDocument;

/// UTC timestamp in the form `2026-02-09T18:04:05.123456Z`
pub fn utc_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Serialize `document` as indented JSON and write it to `path`, creating
/// parent directories. An existing file is replaced.
pub fn write_output<T: Serialize>(path: &Path, document: &OutputDocument<T>) -> Result<()> {
    let json = serde_json::to_string_pretty(document)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| IngestError::OutputWrite {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, json).map_err(|source| IngestError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), templates = document.templates.len(), "wrote output");
    Ok(())
}
