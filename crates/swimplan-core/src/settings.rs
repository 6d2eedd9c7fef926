//! Run settings
//!
//! Defaults reproduce the standard layout: category folders under
//! `swim_templates/source` and output in `data/`. A `swimplan.toml` at the
//! project root may override them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{
    PipelineVersion, PlanCatalog, PlanTypeConfig, DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE_ROOT,
};
use crate::error::{IngestError, Result};

/// Settings file looked up at the project root
pub const SETTINGS_FILE_NAME: &str = "swimplan.toml";

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding one folder per plan type, relative to the project root
    pub source_root: PathBuf,
    /// Directory receiving `templates.vN.json`, relative to the project root
    pub output_dir: PathBuf,
    /// Replaces the built-in catalog when non-empty
    pub plan_types: Vec<PlanTypeConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from(DEFAULT_SOURCE_ROOT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            plan_types: Vec::new(),
        }
    }
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load settings for a project.
    ///
    /// An explicit path must exist. Without one, `swimplan.toml` in
    /// `project_root` is used when present, otherwise the defaults.
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(IngestError::Config {
                        path: path.to_path_buf(),
                        message: "file not found".to_string(),
                    });
                }
                path.to_path_buf()
            }
            None => {
                let candidate = project_root.join(SETTINGS_FILE_NAME);
                if !candidate.exists() {
                    debug!(root = %project_root.display(), "no settings file, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let content = fs::read_to_string(&path).map_err(|e| IngestError::Config {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let settings = Self::from_toml_str(&content).map_err(|e| IngestError::Config {
            path: path.clone(),
            message: e.to_string(),
        })?;

        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Catalog for a run: the configured plan types, or the built-in ones
    pub fn catalog(&self, version: PipelineVersion) -> PlanCatalog {
        if self.plan_types.is_empty() {
            PlanCatalog::standard(version, &self.source_root)
        } else {
            PlanCatalog::new(self.plan_types.clone())
        }
    }

    /// Output file for a run, relative to the project root
    pub fn output_path(&self, version: PipelineVersion) -> PathBuf {
        self.output_dir.join(version.output_file_name())
    }
}
