//! Discovery of candidate documents in a category folder

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Extension of candidate documents, compared without regard to case
pub const DOCUMENT_EXTENSION: &str = "docx";

/// Prefix of the lock files a word processor leaves next to open documents
const LOCK_FILE_PREFIX: char = '~';

fn has_document_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
}

/// Folder entries with the document extension, in directory order.
/// A missing or unreadable folder yields nothing.
fn document_entries(folder: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(err) => {
            if folder.exists() {
                warn!(folder = %folder.display(), error = %err, "cannot read source folder");
            } else {
                debug!(folder = %folder.display(), "source folder does not exist");
            }
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(err) => {
                warn!(folder = %folder.display(), error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|path| has_document_extension(path))
        .collect()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// First document in directory iteration order, skipping lock files
pub fn find_first_docx(folder: &Path) -> Option<PathBuf> {
    document_entries(folder)
        .into_iter()
        .find(|path| !file_name(path).starts_with(LOCK_FILE_PREFIX))
}

/// Every document in the folder, skipping lock files and hidden files,
/// sorted by filename
pub fn find_all_docx(folder: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = document_entries(folder)
        .into_iter()
        .filter(|path| {
            let name = file_name(path);
            !name.starts_with(LOCK_FILE_PREFIX) && !name.starts_with('.')
        })
        .collect();

    found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!(folder = %folder.display(), count = found.len(), "discovered documents");
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths.iter().map(|p| file_name(p)).collect()
    }

    #[test]
    fn test_find_all_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "2026.02.09 - 3200 - SCY.docx",
            "2026.01.12 - 2800 - SCY.DOCX",
            "~$2026.02.09 - 3200 - SCY.docx",
            ".hidden.docx",
            "notes.txt",
            "plan.doc",
        ] {
            touch(dir.path(), name);
        }

        let found = find_all_docx(dir.path());
        assert_eq!(
            names(&found),
            vec!["2026.01.12 - 2800 - SCY.DOCX", "2026.02.09 - 3200 - SCY.docx"]
        );
    }

    #[test]
    fn test_find_first_skips_lock_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "~$lock.docx");
        touch(dir.path(), "readme.md");

        assert_eq!(find_first_docx(dir.path()), None);

        touch(dir.path(), "plan.docx");
        let first = find_first_docx(dir.path()).unwrap();
        assert_eq!(file_name(&first), "plan.docx");
    }

    #[test]
    fn test_missing_folder_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        assert!(find_all_docx(&missing).is_empty());
        assert_eq!(find_first_docx(&missing), None);
    }

    #[test]
    fn test_extension_check() {
        assert!(has_document_extension(Path::new("a.docx")));
        assert!(has_document_extension(Path::new("a.DocX")));
        assert!(!has_document_extension(Path::new("a.docx.bak")));
        assert!(!has_document_extension(Path::new(".docx")));
    }
}
