//! Ingestion driver
//!
//! Walks the catalog in order, feeds discovered documents through the
//! [`TemplateProcessor`] and writes one output document per run. Progress is
//! written to a caller-supplied sink; diagnostics go through `tracing`.
//!
//! Per-file failures are counted and reported, never propagated. A broken
//! progress sink is logged and ignored. Only writing the output aborts a run.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::catalog::{PipelineVersion, PlanCatalog, PlanTypeConfig};
use crate::discover::{find_all_docx, find_first_docx};
use crate::error::Result;
use crate::model::{OutputDocument, RawTemplateRecord, RunStats, TemplateRecord, TypeCounts};
use crate::output::{utc_timestamp, write_output};
use crate::processor::{source_file_name, TemplateProcessor};

const V1_RULE_WIDTH: usize = 50;
const V2_RULE_WIDTH: usize = 60;

/// Progress writer that never fails the run: the first write error is logged
/// and later output is dropped
struct Progress<'a> {
    sink: &'a mut dyn Write,
    broken: bool,
}

impl<'a> Progress<'a> {
    fn new(sink: &'a mut dyn Write) -> Self {
        Self {
            sink,
            broken: false,
        }
    }

    /// Target of `write!`/`writeln!`
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) {
        if self.broken {
            return;
        }
        if let Err(err) = self.sink.write_fmt(args).and_then(|()| self.sink.flush()) {
            warn!(error = %err, "progress output failed, continuing without it");
            self.broken = true;
        }
    }
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSummary {
    pub version: PipelineVersion,
    /// Where the output document was written
    pub output_path: PathBuf,
    /// Number of records in the output document
    pub templates: usize,
    /// Keys of categories that produced no record
    pub missing: Vec<String>,
    /// Run statistics (v2 only)
    pub stats: Option<RunStats>,
    /// Plan ids shared by more than one record (v2 only); all records are kept
    pub duplicate_plan_ids: Vec<String>,
}

impl IngestSummary {
    /// A run succeeds when it produced at least one template
    pub fn is_success(&self) -> bool {
        self.templates > 0
    }

    /// Process exit status: 0 on success, 1 otherwise
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// Runs the ingestion pipelines over a catalog
#[derive(Debug, Clone)]
pub struct Ingestor {
    catalog: PlanCatalog,
    project_root: PathBuf,
    output_path: PathBuf,
}

impl Ingestor {
    /// Relative source folders and `output_path` are resolved against
    /// `project_root`.
    pub fn new(
        catalog: PlanCatalog,
        project_root: impl Into<PathBuf>,
        output_path: impl AsRef<Path>,
    ) -> Self {
        let project_root = project_root.into();
        let output_path = project_root.join(output_path);
        Self {
            catalog,
            project_root,
            output_path,
        }
    }

    pub fn catalog(&self) -> &PlanCatalog {
        &self.catalog
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn source_folder(&self, plan_type: &PlanTypeConfig) -> PathBuf {
        self.project_root.join(&plan_type.source_folder)
    }

    /// Run the pipeline of the given generation
    pub fn run(&self, version: PipelineVersion, progress: &mut dyn Write) -> Result<IngestSummary> {
        match version {
            PipelineVersion::V1 => self.run_v1(progress),
            PipelineVersion::V2 => self.run_v2(progress),
        }
    }

    /// v1: the first document of each category, raw text only
    pub fn run_v1(&self, sink: &mut dyn Write) -> Result<IngestSummary> {
        let mut progress = Progress::new(sink);
        let processor = TemplateProcessor::new(PipelineVersion::V1);
        let mut templates: Vec<RawTemplateRecord> = Vec::new();
        let mut missing: Vec<String> = Vec::new();

        writeln!(progress, "Swim Template Ingestion v1");
        writeln!(progress, "{}", "=".repeat(V1_RULE_WIDTH));

        for plan_type in &self.catalog {
            let key = &plan_type.plan_type_key;
            writeln!(progress);
            writeln!(progress, "Processing {} ({})...", plan_type.plan_type_label, key);

            let folder = self.source_folder(plan_type);
            let Some(path) = find_first_docx(&folder) else {
                writeln!(
                    progress,
                    "   WARNING: No .docx file found in {}/",
                    plan_type.source_folder.display()
                );
                missing.push(key.clone());
                continue;
            };

            writeln!(progress, "   Found: {}", source_file_name(&path));

            match processor.process_raw(&path, plan_type) {
                Ok(record) => {
                    writeln!(
                        progress,
                        "   ✓ Extracted {} characters, {} lines",
                        record.raw_text.chars().count(),
                        record.raw_text.split('\n').count()
                    );
                    templates.push(record);
                }
                Err(err) => {
                    warn!(plan_type = %key, error = %err, "extraction failed");
                    writeln!(progress, "   ✗ Error extracting text: {}", err);
                    missing.push(key.clone());
                }
            }
        }

        writeln!(progress);
        writeln!(progress, "Writing output to {}...", self.output_path.display());

        let count = templates.len();
        let document = OutputDocument {
            templates,
            version: PipelineVersion::V1.label().to_string(),
            generated_at: None,
            stats: None,
        };
        write_output(&self.output_path, &document)?;

        writeln!(
            progress,
            "✓ Successfully wrote {} templates to {}",
            count,
            self.output_path.display()
        );

        if !missing.is_empty() {
            writeln!(progress);
            writeln!(progress, "WARNING: Missing templates for: {}", missing.join(", "));
            writeln!(progress, "   Downstream consumers will work with partial templates.");
        }

        writeln!(progress);
        writeln!(progress, "Ingestion complete!");
        writeln!(progress, "   Total templates: {}/{}", count, self.catalog.len());

        info!(templates = count, missing = missing.len(), "v1 ingestion finished");

        Ok(IngestSummary {
            version: PipelineVersion::V1,
            output_path: self.output_path.clone(),
            templates: count,
            missing,
            stats: None,
            duplicate_plan_ids: Vec::new(),
        })
    }

    /// v2: every document of each category, enriched with metadata
    pub fn run_v2(&self, sink: &mut dyn Write) -> Result<IngestSummary> {
        let mut progress = Progress::new(sink);
        let processor = TemplateProcessor::new(PipelineVersion::V2);
        let mut templates: Vec<TemplateRecord> = Vec::new();
        let mut stats = RunStats {
            by_type: TypeCounts::new(),
            ..RunStats::default()
        };
        let mut missing: Vec<String> = Vec::new();
        let mut seen_ids: HashSet<String> = HashSet::new();
        let mut duplicate_plan_ids: Vec<String> = Vec::new();

        writeln!(progress, "Swim Template Ingestion v2 (Bulk Processing)");
        writeln!(progress, "{}", "=".repeat(V2_RULE_WIDTH));

        for plan_type in &self.catalog {
            let key = &plan_type.plan_type_key;
            writeln!(progress);
            writeln!(
                progress,
                "[{}] Processing {}...",
                key.to_uppercase(),
                plan_type.plan_type_label
            );
            writeln!(progress, "   Folder: {}", plan_type.source_folder.display());

            let files = find_all_docx(&self.source_folder(plan_type));
            if files.is_empty() {
                writeln!(progress, "   WARNING: No .docx files found");
                stats.by_type.set(key, 0);
                missing.push(key.clone());
                continue;
            }

            writeln!(progress, "   Found {} files", files.len());

            let mut type_count = 0;
            for path in &files {
                stats.total_files += 1;
                write!(progress, "      • {} ... ", source_file_name(path));

                match processor.process(path, plan_type) {
                    Ok(record) => {
                        let distance = record
                            .metadata
                            .distance_meters
                            .map_or_else(|| "unknown".to_string(), |d| format!("{}m", d));
                        writeln!(progress, "OK ({}, {})", distance, record.metadata.difficulty);

                        if !seen_ids.insert(record.plan_id.clone()) {
                            warn!(plan_id = %record.plan_id, "duplicate plan_id, keeping both records");
                            duplicate_plan_ids.push(record.plan_id.clone());
                        }
                        templates.push(record);
                        stats.successful += 1;
                        type_count += 1;
                    }
                    Err(err) => {
                        warn!(file = %path.display(), error = %err, "template processing failed");
                        writeln!(progress, "FAILED");
                        writeln!(progress, "         {}", err);
                        stats.failed += 1;
                    }
                }
            }

            stats.by_type.set(key, type_count);
            if type_count == 0 {
                missing.push(key.clone());
            }
            writeln!(progress, "   Processed: {} templates", type_count);
        }

        let rule = "=".repeat(V2_RULE_WIDTH);
        writeln!(progress);
        writeln!(progress, "{}", rule);
        writeln!(progress, "Writing output to {}...", self.output_path.display());

        let difficulty_counts = templates.iter().fold(BTreeMap::new(), |mut acc, t| {
            *acc.entry(t.metadata.difficulty.as_str()).or_insert(0usize) += 1;
            acc
        });

        let count = templates.len();
        let document = OutputDocument {
            templates,
            version: PipelineVersion::V2.label().to_string(),
            generated_at: Some(utc_timestamp()),
            stats: Some(stats.clone()),
        };
        write_output(&self.output_path, &document)?;

        writeln!(progress, "✓ Successfully wrote {} templates", count);
        writeln!(progress);
        writeln!(progress, "Statistics:");
        writeln!(progress, "   Total files processed: {}", stats.total_files);
        writeln!(progress, "   Successful: {}", stats.successful);
        writeln!(progress, "   Failed: {}", stats.failed);
        writeln!(progress);
        writeln!(progress, "By type:");
        for (key, n) in stats.by_type.iter() {
            writeln!(progress, "   {}: {} templates", key, n);
        }
        writeln!(progress);
        writeln!(progress, "Difficulty distribution:");
        for (difficulty, n) in &difficulty_counts {
            writeln!(progress, "   {}: {}", difficulty, n);
        }
        writeln!(progress);
        writeln!(progress, "{}", rule);
        writeln!(progress, "Ingestion complete!");

        info!(
            total = stats.total_files,
            successful = stats.successful,
            failed = stats.failed,
            "v2 ingestion finished"
        );

        Ok(IngestSummary {
            version: PipelineVersion::V2,
            output_path: self.output_path.clone(),
            templates: count,
            missing,
            stats: Some(stats),
            duplicate_plan_ids,
        })
    }
}
