//! Template processor: one source document in, one record out
//!
//! Extraction errors are returned to the caller as values; the driver counts
//! them as failed files and moves on.

use std::path::Path;

use swimplan_ooxml::PlainTextExtractor;
use tracing::debug;

use crate::catalog::{PipelineVersion, PlanTypeConfig};
use crate::error::{IngestError, Result};
use crate::heuristics::{
    classify_difficulty, estimate_duration_minutes, extract_distance_from_content,
    extract_equipment_mentioned, extract_focus_areas, extract_metadata_from_filename,
    generate_plan_id,
};
use crate::model::{Intensity, PlanMetadata, RawTemplateRecord, TemplateRecord};

/// Turns source documents into template records
#[derive(Debug, Clone)]
pub struct TemplateProcessor {
    extractor: PlainTextExtractor,
}

impl TemplateProcessor {
    /// Processor whose text extraction matches the given pipeline generation
    pub fn new(version: PipelineVersion) -> Self {
        Self {
            extractor: version.extractor(),
        }
    }

    /// Extract the plain text of one document
    pub fn extract_text(&self, path: &Path) -> Result<String> {
        self.extractor
            .extract_file(path)
            .map_err(|source| IngestError::Extraction {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Raw-text record (v1)
    pub fn process_raw(&self, path: &Path, plan_type: &PlanTypeConfig) -> Result<RawTemplateRecord> {
        let raw_text = self.extract_text(path)?;
        Ok(RawTemplateRecord {
            plan_type_key: plan_type.plan_type_key.clone(),
            plan_type_label: plan_type.plan_type_label.clone(),
            source_file: source_file_name(path),
            raw_text,
        })
    }

    /// Enriched record (v2)
    pub fn process(&self, path: &Path, plan_type: &PlanTypeConfig) -> Result<TemplateRecord> {
        let raw_text = self.extract_text(path)?;
        Ok(build_record(plan_type, &source_file_name(path), raw_text))
    }
}

/// Assemble an enriched record from already extracted text.
///
/// The filename distance wins; the text is only searched when the filename
/// carries none.
pub fn build_record(plan_type: &PlanTypeConfig, source_file: &str, raw_text: String) -> TemplateRecord {
    let key = plan_type.plan_type_key.as_str();
    let from_name = extract_metadata_from_filename(source_file);
    let distance_meters = from_name
        .distance_meters
        .or_else(|| extract_distance_from_content(&raw_text));

    debug!(
        source_file,
        ?distance_meters,
        date = ?from_name.date,
        "derived template metadata"
    );

    let metadata = PlanMetadata {
        date: from_name.date,
        distance_meters,
        pool_type: from_name.pool_type.unwrap_or_default(),
        difficulty: classify_difficulty(distance_meters),
        focus_areas: extract_focus_areas(&raw_text, key),
        equipment_required: extract_equipment_mentioned(&raw_text),
        estimated_duration_minutes: estimate_duration_minutes(distance_meters),
        intensity: Intensity::default(),
    };

    TemplateRecord {
        plan_id: generate_plan_id(key, source_file),
        plan_type_key: plan_type.plan_type_key.clone(),
        plan_type_label: plan_type.plan_type_label.clone(),
        source_file: source_file.to_string(),
        raw_text,
        metadata,
    }
}

/// Final path component as a display string
pub fn source_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
