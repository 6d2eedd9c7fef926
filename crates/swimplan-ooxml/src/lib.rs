//! # swimplan-ooxml
//!
//! Plain-text extraction from DOCX files for swimplan.
//!
//! This crate provides functionality to:
//! - Unpack DOCX archives
//! - Parse body-level paragraphs and tables from `word/document.xml`
//! - Flatten a document into newline-separated plain text
//!
//! ## Example
//!
//! ```no_run
//! use swimplan_ooxml::PlainTextExtractor;
//!
//! let text = PlainTextExtractor::new()
//!     .with_cell_separator("\t")
//!     .with_normalization(true)
//!     .extract_file("2026.02.09 - 3200 - SCY.docx")?;
//! println!("{}", text);
//! # Ok::<(), swimplan_ooxml::OoxmlError>(())
//! ```

pub mod archive;
pub mod document;
pub mod error;
pub mod text;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use archive::OoxmlArchive;
pub use document::{Block, Document, Paragraph, Table, TableCell, TableRow, VerticalMerge};
pub use error::{OoxmlError, Result};
pub use text::{normalize_text, PlainTextExtractor, DEFAULT_CELL_SEPARATOR};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
