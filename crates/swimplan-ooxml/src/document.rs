//! Document content parsing (word/document.xml)
//!
//! This module parses the main document body into body-level paragraphs
//! and tables. Only the text-bearing structure is kept: formatting, images
//! and numbering are dropped while parsing.
//!
//! Only direct children count. Paragraphs wrapped in content controls
//! (`w:sdt`), `w:customXml` or text boxes are not body paragraphs, and runs
//! wrapped in `w:ins`, `w:sdt` or `w:smartTag` are not paragraph text.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};

/// A parsed Word document
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Body-level blocks in document order
    pub blocks: Vec<Block>,
}

/// Block-level elements
#[derive(Debug, Clone)]
pub enum Block {
    /// A paragraph
    Paragraph(Paragraph),
    /// A table
    Table(Table),
}

/// A paragraph reduced to its visible text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    /// Concatenated run text; tabs and line breaks are kept as `\t` and `\n`
    pub text: String,
}

/// A table
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Table rows
    pub rows: Vec<TableRow>,
}

/// A table row
#[derive(Debug, Clone, Default)]
pub struct TableRow {
    /// Cells in this row, as written in the XML (merges not expanded)
    pub cells: Vec<TableCell>,
}

/// A table cell
#[derive(Debug, Clone)]
pub struct TableCell {
    /// Paragraphs in this cell
    pub paragraphs: Vec<Paragraph>,
    /// Number of grid columns this cell spans (`w:gridSpan`)
    pub grid_span: usize,
    /// Vertical merge state (`w:vMerge`)
    pub v_merge: Option<VerticalMerge>,
}

/// Vertical merge marker on a table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalMerge {
    /// First cell of a vertically merged range
    Restart,
    /// Continuation of the cell above
    Continue,
}

impl Default for TableCell {
    fn default() -> Self {
        Self {
            paragraphs: Vec::new(),
            grid_span: 1,
            v_merge: None,
        }
    }
}

impl Document {
    /// Parse a document from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        // Whitespace inside <w:t> is significant
        reader.config_mut().trim_text(false);

        let mut parser = BodyParser::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => parser.start(e),
                Ok(Event::Empty(ref e)) => parser.empty(e),
                Ok(Event::End(_)) => parser.end(),
                Ok(Event::Text(ref e)) => {
                    if parser.capturing_text() {
                        let text = e
                            .unescape()
                            .map_err(|err| OoxmlError::InvalidStructure(err.to_string()))?;
                        parser.push_text(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        parser.finish()
    }

    /// Body-level paragraphs in document order (table content excluded)
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        })
    }

    /// Body-level tables in document order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        })
    }
}

impl Table {
    /// Cell texts per row with merges expanded onto the column grid.
    ///
    /// A cell spanning N columns appears N times; a vertical-merge
    /// continuation repeats the text of the cell above it.
    pub fn grid_rows(&self) -> Vec<Vec<String>> {
        let mut resolved: Vec<Vec<String>> = Vec::with_capacity(self.rows.len());

        for row in &self.rows {
            let mut line = Vec::new();
            for cell in &row.cells {
                let text = match cell.v_merge {
                    Some(VerticalMerge::Continue) => resolved
                        .last()
                        .and_then(|above| above.get(line.len()))
                        .cloned()
                        .unwrap_or_else(|| cell.text()),
                    _ => cell.text(),
                };
                for _ in 0..cell.grid_span.max(1) {
                    line.push(text.clone());
                }
            }
            resolved.push(line);
        }

        resolved
    }
}

impl TableCell {
    /// Text of the cell: its paragraphs joined by newlines
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Open element while walking the document.
///
/// Every start tag pushes exactly one scope, so the top of the stack is always
/// the direct parent of the next element. Text-bearing scopes are only opened
/// for direct children: paragraphs and tables of the body, paragraphs of a
/// cell, runs of a paragraph or hyperlink, text of a run.
enum Scope {
    Body,
    Paragraph(String),
    Hyperlink,
    Run,
    Text,
    Table(Table),
    Row(TableRow),
    Cell(TableCell),
    CellProperties,
    /// Anything else: content controls, text boxes, nested tables, properties
    Other,
}

#[derive(Default)]
struct BodyParser {
    blocks: Vec<Block>,
    scopes: Vec<Scope>,
}

impl BodyParser {
    fn start(&mut self, e: &BytesStart) {
        let parent = self.scopes.last();
        let scope = match (e.local_name().as_ref(), parent) {
            (b"body", _) => Scope::Body,
            (b"p", Some(Scope::Body | Scope::Cell(_))) => Scope::Paragraph(String::new()),
            (b"tbl", Some(Scope::Body)) => Scope::Table(Table::default()),
            (b"tr", Some(Scope::Table(_))) => Scope::Row(TableRow::default()),
            (b"tc", Some(Scope::Row(_))) => Scope::Cell(TableCell::default()),
            (b"tcPr", Some(Scope::Cell(_))) => Scope::CellProperties,
            (b"hyperlink", Some(Scope::Paragraph(_))) => Scope::Hyperlink,
            (b"r", Some(Scope::Paragraph(_) | Scope::Hyperlink)) => Scope::Run,
            (b"t", Some(Scope::Run)) => Scope::Text,
            _ => Scope::Other,
        };
        self.scopes.push(scope);
    }

    fn empty(&mut self, e: &BytesStart) {
        let name = e.local_name();
        match (name.as_ref(), self.scopes.last_mut()) {
            (b"p", Some(Scope::Body | Scope::Cell(_))) => {
                self.attach(Scope::Paragraph(String::new()));
            }
            (b"tc", Some(Scope::Row(row))) => row.cells.push(TableCell::default()),
            (b"gridSpan" | b"vMerge", Some(Scope::CellProperties)) => self.cell_property(e),
            (b"tab" | b"ptab" | b"cr", Some(Scope::Run)) => {
                let text = if name.as_ref() == b"cr" { "\n" } else { "\t" };
                self.push_text(text);
            }
            (b"br", Some(Scope::Run)) => {
                // Page and column breaks carry no text
                let kind = attr_local(e, b"type");
                if kind.is_none() || kind.as_deref() == Some("textWrapping") {
                    self.push_text("\n");
                }
            }
            (b"noBreakHyphen", Some(Scope::Run)) => self.push_text("-"),
            _ => {}
        }
    }

    fn end(&mut self) {
        if let Some(scope) = self.scopes.pop() {
            self.attach(scope);
        }
    }

    /// `w:gridSpan` / `w:vMerge` inside the `w:tcPr` of the enclosing cell
    fn cell_property(&mut self, e: &BytesStart) {
        let Some(idx) = self.scopes.len().checked_sub(2) else {
            return;
        };
        let Some(Scope::Cell(cell)) = self.scopes.get_mut(idx) else {
            return;
        };
        match e.local_name().as_ref() {
            b"gridSpan" => {
                if let Some(span) = attr_val(e).and_then(|v| v.parse::<usize>().ok()) {
                    cell.grid_span = span.max(1);
                }
            }
            _ => {
                cell.v_merge = Some(match attr_val(e).as_deref() {
                    Some("restart") => VerticalMerge::Restart,
                    _ => VerticalMerge::Continue,
                });
            }
        }
    }

    /// Hand a closed scope to its parent
    fn attach(&mut self, scope: Scope) {
        match (scope, self.scopes.last_mut()) {
            (Scope::Paragraph(text), Some(Scope::Body)) => {
                self.blocks.push(Block::Paragraph(Paragraph { text }));
            }
            (Scope::Paragraph(text), Some(Scope::Cell(cell))) => {
                cell.paragraphs.push(Paragraph { text });
            }
            (Scope::Table(table), _) => self.blocks.push(Block::Table(table)),
            (Scope::Row(row), Some(Scope::Table(table))) => table.rows.push(row),
            (Scope::Cell(cell), Some(Scope::Row(row))) => row.cells.push(cell),
            _ => {}
        }
    }

    fn capturing_text(&self) -> bool {
        matches!(self.scopes.last(), Some(Scope::Text))
    }

    /// Append to the paragraph owning the current run
    fn push_text(&mut self, text: &str) {
        let paragraph = self.scopes.iter_mut().rev().find_map(|scope| match scope {
            Scope::Paragraph(buf) => Some(buf),
            _ => None,
        });
        if let Some(buf) = paragraph {
            buf.push_str(text);
        }
    }

    fn finish(self) -> Result<Document> {
        if !self.scopes.is_empty() {
            return Err(OoxmlError::InvalidStructure(
                "document ended inside an open element".to_string(),
            ));
        }
        Ok(Document {
            blocks: self.blocks,
        })
    }
}

/// Value of the `w:val` attribute, whatever the namespace prefix
fn attr_val(e: &BytesStart) -> Option<String> {
    attr_local(e, b"val")
}

fn attr_local(e: &BytesStart, local: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.local_name().as_ref() == local)
        .and_then(|a| String::from_utf8(a.value.to_vec()).ok())
}
