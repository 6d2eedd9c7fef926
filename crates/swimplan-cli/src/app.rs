//! CLI application logic

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use swimplan_core::{IngestSummary, Ingestor, PipelineVersion, Settings};

/// Arguments shared by both ingestion binaries
#[derive(Debug, Parser)]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Project root holding the source tree and receiving the output
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Settings file (defaults to swimplan.toml in the project root, if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

fn command(version: PipelineVersion) -> clap::Command {
    let (name, about) = match version {
        PipelineVersion::V1 => (
            "swimplan-ingest-v1",
            "Extract the first workout template of each plan type as raw text",
        ),
        PipelineVersion::V2 => (
            "swimplan-ingest-v2",
            "Extract every workout template with derived metadata and statistics",
        ),
    };
    Cli::command().name(name).about(about)
}

/// Parse command-line arguments for the given pipeline's binary
pub fn parse_args<I, T>(version: PipelineVersion, args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command(version).try_get_matches_from(args)?;
    Cli::from_arg_matches(&matches)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Load settings, run the pipeline and print progress to stdout
pub fn ingest_command(
    version: PipelineVersion,
    root: &Path,
    config: Option<&Path>,
) -> Result<IngestSummary> {
    let settings = Settings::load(root, config).context("Failed to load settings")?;
    debug!(?settings, %version, "starting ingestion");

    let ingestor = Ingestor::new(settings.catalog(version), root, settings.output_path(version));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    ingestor
        .run(version, &mut out)
        .with_context(|| format!("{} ingestion aborted", version))
}

/// Entry point of both binaries
pub fn run_cli(version: PipelineVersion) -> Result<ExitCode> {
    let cli = match parse_args(version, std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };
    init_tracing();

    let summary = ingest_command(version, &cli.root, cli.config.as_deref())?;
    Ok(ExitCode::from(summary.exit_code()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = parse_args(PipelineVersion::V2, ["swimplan-ingest-v2"]).unwrap();
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_root_and_config() {
        let cli = parse_args(
            PipelineVersion::V1,
            ["swimplan-ingest-v1", "--root", "/srv/swim", "-c", "custom.toml"],
        )
        .unwrap();
        assert_eq!(cli.root, PathBuf::from("/srv/swim"));
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_rejects_positional_arguments() {
        let err = parse_args(PipelineVersion::V2, ["swimplan-ingest-v2", "extra"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_command_names() {
        assert_eq!(command(PipelineVersion::V1).get_name(), "swimplan-ingest-v1");
        assert_eq!(command(PipelineVersion::V2).get_name(), "swimplan-ingest-v2");
        Cli::command().debug_assert();
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = ingest_command(PipelineVersion::V2, dir.path(), Some(&missing)).unwrap_err();
        assert!(format!("{:#}", err).contains("nope.toml"));
    }
}
