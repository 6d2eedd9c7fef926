//! swimplan-core - Swim plan template ingestion
//!
//! Turns a tree of workout documents (one folder per plan type) into a single
//! JSON artifact of template records.
//!
//! Two pipeline generations exist:
//! - **v1**: the first document of each category, raw text with ` | ` between
//!   table cells
//! - **v2**: every document of each category, normalized text, derived
//!   metadata (date, distance, pool type, difficulty, focus, equipment,
//!   duration) and run statistics
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use swimplan_core::{Ingestor, PipelineVersion, Settings};
//!
//! let root = Path::new(".");
//! let settings = Settings::load(root, None)?;
//! let version = PipelineVersion::V2;
//! let ingestor = Ingestor::new(settings.catalog(version), root, settings.output_path(version));
//! let summary = ingestor.run(version, &mut std::io::stdout())?;
//! std::process::exit(summary.exit_code().into());
//! ```

pub mod catalog;
pub mod discover;
pub mod error;
pub mod heuristics;
pub mod ingest;
pub mod model;
pub mod output;
pub mod processor;
pub mod settings;

pub use catalog::{PipelineVersion, PlanCatalog, PlanTypeConfig};
pub use error::{IngestError, Result};
pub use ingest::{IngestSummary, Ingestor};
pub use model::{
    Difficulty, Equipment, FocusArea, Intensity, OutputDocument, PlanMetadata, PoolType,
    RawTemplateRecord, RunStats, TemplateRecord, TypeCounts,
};
pub use processor::TemplateProcessor;
pub use settings::Settings;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
