//! swimplan CLI - Command-line entry points for template ingestion
//!
//! Two binaries share this library:
//!
//! ```bash
//! # First document per category, raw text
//! swimplan-ingest-v1 --root path/to/project
//!
//! # Every document per category, with metadata and statistics
//! swimplan-ingest-v2 --root path/to/project --config swimplan.toml
//! ```
//!
//! Both exit with status 0 when at least one template was written and 1
//! otherwise. Set `RUST_LOG` to see diagnostics on stderr.

pub mod app;

pub use app::{ingest_command, parse_args, run_cli, Cli};
