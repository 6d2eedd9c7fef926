//! Error types for DOCX reading

use thiserror::Error;

/// Errors that can occur while reading a DOCX file
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// The file is not a readable ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing XML content
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Required part not found in archive
    #[error("Required file not found: {0}")]
    MissingFile(String),

    /// Invalid document structure
    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),
}

/// Result type for DOCX operations
pub type Result<T> = std::result::Result<T, OoxmlError>;
