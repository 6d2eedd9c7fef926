//! Plain-text flattening of DOCX documents
//!
//! Paragraph lines come first, then one line per table row, all joined with
//! newlines. Optionally the result is normalized to plain ASCII punctuation.

use std::path::Path;

use crate::archive::OoxmlArchive;
use crate::document::Document;
use crate::error::Result;

/// Separator placed between the non-empty cells of a table row by default
pub const DEFAULT_CELL_SEPARATOR: &str = " | ";

/// Typographic characters and their plain-ASCII replacements
pub const TYPOGRAPHIC_REPLACEMENTS: &[(char, &str)] = &[
    ('\u{2192}', "->"),
    ('\u{2013}', "-"),
    ('\u{2014}', "-"),
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{00A0}', " "),
];

/// Extracts plain text from DOCX documents
#[derive(Debug, Clone)]
pub struct PlainTextExtractor {
    cell_separator: String,
    normalize: bool,
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self {
            cell_separator: DEFAULT_CELL_SEPARATOR.to_string(),
            normalize: false,
        }
    }
}

impl PlainTextExtractor {
    /// Create an extractor with the default cell separator and no normalization
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the separator used between cells of a table row
    pub fn with_cell_separator(mut self, separator: impl Into<String>) -> Self {
        self.cell_separator = separator.into();
        self
    }

    /// Enable or disable [`normalize_text`] on the extracted result
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Open a DOCX file and extract its text
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        let archive = OoxmlArchive::open(path)?;
        self.extract_archive(&archive)
    }

    /// Extract text from an already opened archive
    pub fn extract_archive(&self, archive: &OoxmlArchive) -> Result<String> {
        let document = Document::parse(archive.document_xml()?)?;
        Ok(self.extract_document(&document))
    }

    /// Flatten a parsed document into text
    pub fn extract_document(&self, document: &Document) -> String {
        let mut lines: Vec<String> = document
            .paragraphs()
            .map(|p| p.text.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        for table in document.tables() {
            for row in table.grid_rows() {
                let cells: Vec<&str> = row
                    .iter()
                    .map(|c| c.trim())
                    .filter(|c| !c.is_empty())
                    .collect();
                if !cells.is_empty() {
                    lines.push(cells.join(&self.cell_separator));
                }
            }
        }

        let text = lines.join("\n");
        if self.normalize {
            normalize_text(&text)
        } else {
            text
        }
    }
}

/// Unify line endings, replace typographic punctuation and trim the result
pub fn normalize_text(text: &str) -> String {
    let mut normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    for (from, to) in TYPOGRAPHIC_REPLACEMENTS {
        normalized = normalized.replace(*from, to);
    }
    normalized.trim().to_string()
}
