//! JSON documents carrying a list of row objects.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::csv_table::MAX_SOURCE_FILE_SIZE;
use crate::error::{IngestError, Result};
use crate::source::{RawRecord, SourceTable};

/// Keys under which a document may nest its row list.
const ROW_LIST_KEYS: [&str; 4] = ["rows", "data", "items", "parts"];

/// Cell text of a JSON value. Integral floats such as `13.0` read as `13`.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => match number.as_f64() {
            Some(float) if number.is_f64() && float.fract() == 0.0 && float.abs() < 9.0e15 => {
                format!("{float:.0}")
            }
            _ => number.to_string(),
        },
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn row_list(document: Value) -> Option<Vec<Value>> {
    match document {
        Value::Array(rows) => Some(rows),
        Value::Object(mut map) => ROW_LIST_KEYS.iter().find_map(|key| match map.remove(*key) {
            Some(Value::Array(rows)) => Some(rows),
            _ => None,
        }),
        _ => None,
    }
}

/// Builds a table from an already parsed JSON document.
///
/// Entries of the row list that are not objects are ignored. A document
/// without a row list yields an empty table.
#[must_use]
pub fn json_document_table(document: Value, origin: &str) -> SourceTable {
    let mut table = SourceTable::new("", origin);
    let Some(rows) = row_list(document) else {
        debug!(origin = %origin, "JSON source has no row list");
        return table;
    };
    for row in rows {
        let Value::Object(map) = row else {
            continue;
        };
        let mut record = RawRecord::new();
        for (key, value) in map {
            let name = key.trim().to_string();
            if name.is_empty() {
                continue;
            }
            if !table.headers.contains(&name) {
                table.headers.push(name.clone());
            }
            record.push(name, scalar_text(&value));
        }
        table.records.push(record);
    }
    table
}

/// Reads and parses a JSON document, whatever its shape.
pub fn read_json_document(path: &Path) -> Result<Value> {
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
    serde_json::from_str(&text).map_err(|source| IngestError::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a JSON row document from disk.
pub fn read_json_rows(path: &Path) -> Result<SourceTable> {
    let document = read_json_document(path)?;
    Ok(json_document_table(document, &path.display().to_string()))
}
