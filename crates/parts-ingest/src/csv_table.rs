//! Header-delimited CSV tables.

use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};
use crate::source::{RawRecord, SourceTable};

/// Maximum size of a local source file (64 MB).
pub const MAX_SOURCE_FILE_SIZE: u64 = 64 * 1024 * 1024;

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn read_rows(text: &str, origin: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            origin: origin.to_string(),
            source,
        })?;
        rows.push(record.iter().map(normalize_cell).collect());
    }
    Ok(rows)
}

/// Parses CSV text whose first row is the header.
///
/// Blank rows are skipped, short rows are padded with empty values and cells
/// beyond the header width are dropped. Columns with an empty header are
/// ignored.
pub fn parse_csv_text(text: &str, origin: &str) -> Result<SourceTable> {
    let mut table = SourceTable::new("", origin);
    let mut rows = read_rows(text, origin)?.into_iter();
    let Some(header_row) = rows.next() else {
        return Ok(table);
    };
    table.headers = header_row.iter().map(|value| normalize_header(value)).collect();
    for row in rows {
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        let mut record = RawRecord::new();
        for (idx, header) in table.headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let value = row.get(idx).map(String::as_str).unwrap_or("");
            record.push(header.clone(), value);
        }
        table.records.push(record);
    }
    table.headers.retain(|header| !header.is_empty());
    Ok(table)
}

/// Reads a CSV source file.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn read_csv_table(path: &Path) -> Result<SourceTable> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::file_read(path, e))?;
    if metadata.len() > MAX_SOURCE_FILE_SIZE {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: MAX_SOURCE_FILE_SIZE,
        });
    }
    let bytes = std::fs::read(path).map_err(|e| IngestError::file_read(path, e))?;
    let text = String::from_utf8_lossy(&bytes);
    parse_csv_text(&text, &path.display().to_string())
}

/// Size of a CSV table, used to rank candidate remote tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableShape {
    /// Rows after the header with at least one non-empty cell.
    pub data_rows: usize,
    /// Width of the header row.
    pub columns: usize,
    pub header: Vec<String>,
}

impl TableShape {
    /// Number of header cells with a name.
    #[must_use]
    pub fn named_columns(&self) -> usize {
        self.header.iter().filter(|h| !h.is_empty()).count()
    }
}

/// Measures CSV text without building records. Returns `None` when the text
/// is not parseable CSV or is empty.
#[must_use]
pub fn table_shape(text: &str) -> Option<TableShape> {
    let rows = read_rows(text, "").ok()?;
    let mut rows = rows.into_iter();
    let header: Vec<String> = rows.next()?.iter().map(|h| normalize_header(h)).collect();
    let data_rows = rows
        .filter(|row| row.iter().any(|value| !value.is_empty()))
        .count();
    Some(TableShape {
        data_rows,
        columns: header.len(),
        header,
    })
}
