//! swimplan-ingest-v1 binary entry point

use std::process::ExitCode;

use anyhow::Result;
use swimplan_cli::run_cli;
use swimplan_core::PipelineVersion;

fn main() -> Result<ExitCode> {
    run_cli(PipelineVersion::V1)
}
