//! Source loading for the universal parts database.
//!
//! Sources come in two shapes: header-delimited CSV tables and JSON
//! documents carrying a list of row objects. Each loaded source becomes a
//! [`SourceTable`] of ordered raw records; a source that cannot be read or
//! parsed is reported and skipped, never fatal to the batch.

#![deny(unsafe_code)]

pub mod csv_table;
pub mod discovery;
pub mod error;
pub mod json_rows;
pub mod source;

pub use csv_table::{TableShape, parse_csv_text, read_csv_table, table_shape};
pub use discovery::{is_readme, list_source_files};
pub use error::{IngestError, Result};
pub use json_rows::{json_document_table, read_json_document, read_json_rows};
pub use source::{LoadOutcome, RawRecord, SourceFormat, SourceTable, load_source, load_sources};
