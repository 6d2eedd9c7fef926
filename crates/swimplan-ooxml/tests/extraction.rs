//! Integration tests for DOCX text extraction from files on disk

use std::fs;
use std::io::{Cursor, Write};

use swimplan_ooxml::{OoxmlError, PlainTextExtractor};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Package a document body as a minimal DOCX
fn docx(body: &str) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="xml" ContentType="application/xml"/>
</Types>"#)
        .unwrap();

    zip.start_file("word/document.xml", options).unwrap();
    write!(
        zip,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>{}</w:body>
</w:document>"#,
        body
    )
    .unwrap();

    zip.finish().unwrap();
    buffer.into_inner()
}

const WORKOUT: &str = r#"
    <w:p><w:r><w:t>Warm Up</w:t></w:r></w:p>
    <w:p><w:r><w:t>400 swim, 200 kick with fins</w:t></w:r></w:p>
    <w:tbl>
        <w:tr>
            <w:tc><w:p><w:r><w:t>Main Set</w:t></w:r></w:p></w:tc>
            <w:tc><w:p><w:r><w:t>8 x 200 @ 3:00 </w:t></w:r></w:p></w:tc>
        </w:tr>
        <w:tr>
            <w:tc><w:p><w:r><w:t>Cool Down</w:t></w:r></w:p></w:tc>
            <w:tc><w:p><w:r><w:t>3,200</w:t></w:r></w:p></w:tc>
        </w:tr>
    </w:tbl>
"#;

#[test]
fn test_extract_file_with_pipe_separator() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("workout.docx");
    fs::write(&path, docx(WORKOUT)).unwrap();

    let text = PlainTextExtractor::new().extract_file(&path).unwrap();

    assert_eq!(
        text,
        "Warm Up\n400 swim, 200 kick with fins\nMain Set | 8 x 200 @ 3:00\nCool Down | 3,200"
    );
}

#[test]
fn test_extract_file_with_tab_separator_and_normalization() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("workout.docx");
    fs::write(
        &path,
        docx("<w:p><w:r><w:t>Pull \u{2013} buoy\u{00A0}</w:t></w:r></w:p>"),
    )
    .unwrap();

    let text = PlainTextExtractor::new()
        .with_cell_separator("\t")
        .with_normalization(true)
        .extract_file(&path)
        .unwrap();

    assert_eq!(text, "Pull - buoy");
}

#[test]
fn test_extraction_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("workout.docx");
    fs::write(&path, docx(WORKOUT)).unwrap();

    let extractor = PlainTextExtractor::new().with_cell_separator("\t");
    let first = extractor.extract_file(&path).unwrap();
    let second = extractor.extract_file(&path).unwrap();

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_corrupt_file_is_archive_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.docx");
    fs::write(&path, b"this is not a zip archive").unwrap();

    let err = PlainTextExtractor::new().extract_file(&path).unwrap_err();
    assert!(matches!(err, OoxmlError::Archive(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = PlainTextExtractor::new()
        .extract_file(dir.path().join("absent.docx"))
        .unwrap_err();
    assert!(matches!(err, OoxmlError::Io(_)));
}
