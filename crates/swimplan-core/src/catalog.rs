//! Plan-type catalog
//!
//! The catalog is the fixed list of workout categories a run ingests. It is
//! built once, never mutated, and handed to the ingestion driver explicitly.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use swimplan_ooxml::{PlainTextExtractor, DEFAULT_CELL_SEPARATOR};

/// Source folders live under this directory, relative to the project root
pub const DEFAULT_SOURCE_ROOT: &str = "swim_templates/source";

/// Output files are written into this directory, relative to the project root
pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// Keys and labels of the built-in plan types: (key, v1 label, v2 label)
const STANDARD_PLAN_TYPES: [(&str, &str, &str); 4] = [
    ("mileage", "Mileage Mondays", "Mileage (Distance)"),
    ("im", "IM Sessions", "IM (Strokes)"),
    ("fast", "Fast Sessions", "Fast (Speed)"),
    ("kitchen_sink", "Kitchen Sink Sessions", "Kitchen Sink (Mixed)"),
];

/// Pipeline generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineVersion {
    /// First file per category, raw text only
    V1,
    /// Every file per category, normalized text and derived metadata
    V2,
}

impl PipelineVersion {
    /// Value of the `version` field in the output document
    pub fn label(self) -> &'static str {
        match self {
            PipelineVersion::V1 => "1.0",
            PipelineVersion::V2 => "2.0",
        }
    }

    /// File name of the output document inside the output directory
    pub fn output_file_name(self) -> &'static str {
        match self {
            PipelineVersion::V1 => "templates.v1.json",
            PipelineVersion::V2 => "templates.v2.json",
        }
    }

    /// Separator between table cells in extracted text
    pub fn cell_separator(self) -> &'static str {
        match self {
            PipelineVersion::V1 => DEFAULT_CELL_SEPARATOR,
            PipelineVersion::V2 => "\t",
        }
    }

    /// Text extractor configured for this generation
    pub fn extractor(self) -> PlainTextExtractor {
        PlainTextExtractor::new()
            .with_cell_separator(self.cell_separator())
            .with_normalization(self == PipelineVersion::V2)
    }
}

impl fmt::Display for PipelineVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineVersion::V1 => write!(f, "v1"),
            PipelineVersion::V2 => write!(f, "v2"),
        }
    }
}

/// One workout category bound to its source folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTypeConfig {
    /// Stable identifier, e.g. `mileage`
    pub plan_type_key: String,
    /// Human-readable label
    pub plan_type_label: String,
    /// Folder holding the category's documents, relative to the project root
    pub source_folder: PathBuf,
}

impl PlanTypeConfig {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        source_folder: impl Into<PathBuf>,
    ) -> Self {
        Self {
            plan_type_key: key.into(),
            plan_type_label: label.into(),
            source_folder: source_folder.into(),
        }
    }
}

/// Immutable, ordered list of plan types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanCatalog {
    entries: Vec<PlanTypeConfig>,
}

impl PlanCatalog {
    pub fn new(entries: Vec<PlanTypeConfig>) -> Self {
        Self { entries }
    }

    /// The four built-in plan types, with labels for `version`, each reading
    /// from `source_root/<key>`
    pub fn standard(version: PipelineVersion, source_root: &Path) -> Self {
        let entries = STANDARD_PLAN_TYPES
            .iter()
            .map(|(key, v1_label, v2_label)| {
                let label = match version {
                    PipelineVersion::V1 => v1_label,
                    PipelineVersion::V2 => v2_label,
                };
                PlanTypeConfig::new(*key, *label, source_root.join(key))
            })
            .collect();
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlanTypeConfig> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a plan type by key
    #[cfg(test)]
    pub(crate) fn get(&self, key: &str) -> Option<&PlanTypeConfig> {
        self.entries.iter().find(|e| e.plan_type_key == key)
    }
}

impl<'a> IntoIterator for &'a PlanCatalog {
    type Item = &'a PlanTypeConfig;
    type IntoIter = std::slice::Iter<'a, PlanTypeConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
