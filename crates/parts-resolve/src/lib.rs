//! Part-token parsing and resolution.
//!
//! A decoded item reads `header|| body |`. [`grammar`] pulls the part
//! tokens out of the body and expands them into [`parts_model::PartReference`]s;
//! [`edit`] reorders or drops references and writes the text back. The
//! [`Resolver`] looks references up in a [`PartsIndex`] built from a
//! snapshot, and [`aggregate`] folds the results into counted display rows.
//!
//! Parsing and resolution never fail: malformed input yields fewer tokens,
//! and a reference with no match resolves to an `Unknown` result.

#![deny(unsafe_code)]

pub mod aggregate;
pub mod edit;
pub mod grammar;
pub mod index;
pub mod resolver;
pub mod sections;
pub mod tables;
pub mod type_table;

pub use aggregate::{AggregateRow, aggregate, render_lines};
pub use edit::{apply_skin, delete_reference, move_down, move_up, rebuild_decoded};
pub use grammar::{ParsedItem, header_type_id, parse_decoded, parse_references, parse_tokens};
pub use index::PartsIndex;
pub use resolver::{ResolvedPart, Resolver};
pub use sections::SectionPrefixes;
pub use tables::{ElementalTable, SkinNames};
pub use type_table::{TYPE_TABLE, item_kind};
