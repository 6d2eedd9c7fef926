//! Error types for template ingestion

use std::path::PathBuf;

use swimplan_ooxml::OoxmlError;
use thiserror::Error;

/// Result type for ingestion operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Errors that can occur while ingesting templates
#[derive(Debug, Error)]
pub enum IngestError {
    /// A source document could not be opened or parsed
    #[error("Failed to extract text from {path}: {source}")]
    Extraction {
        path: PathBuf,
        #[source]
        source: OoxmlError,
    },

    /// The output directory or file could not be written
    #[error("Failed to write output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output document could not be serialized
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The settings file is missing or invalid
    #[error("Invalid configuration {path}: {message}")]
    Config { path: PathBuf, message: String },
}
