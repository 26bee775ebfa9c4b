//! Source file discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};
use crate::source::SourceFormat;

/// True for README-style files that sit next to tables but carry no rows.
#[must_use]
pub fn is_readme(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.to_uppercase().contains("README"))
}

/// Lists source files in a directory.
///
/// Only files whose extension is one of `formats` are returned, README files
/// are skipped, and the result is sorted by file name.
pub fn list_source_files(dir: &Path, formats: &[SourceFormat]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        // Skip directories
        if !path.is_file() || is_readme(&path) {
            continue;
        }

        if SourceFormat::from_path(&path).is_some_and(|format| formats.contains(&format)) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_matching_files_sorted_without_readme() {
        let dir = tempfile::tempdir().expect("tempdir");
        for name in ["b.csv", "a.json", "README.csv", "notes.txt", "C.CSV"] {
            std::fs::write(dir.path().join(name), "x").expect("write fixture");
        }
        std::fs::create_dir(dir.path().join("nested.csv")).expect("mkdir");

        let files = list_source_files(dir.path(), &[SourceFormat::Csv, SourceFormat::Json])
            .expect("list files");
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["C.CSV", "a.json", "b.csv"]);

        let csv_only = list_source_files(dir.path(), &[SourceFormat::Csv]).expect("list files");
        assert_eq!(csv_only.len(), 2);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let err = list_source_files(Path::new("/definitely/not/here"), &[SourceFormat::Csv])
            .unwrap_err();
        assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
    }
}
