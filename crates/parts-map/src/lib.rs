//! Schema normalization for the universal parts database.
//!
//! Source tables name the same information in many ways (`Part_ID`,
//! `Part ID`, `ID`; `Stat`, `Description`, ...). The alias tables in
//! [`aliases`] describe those spellings as data; [`normalizer`] applies them
//! to turn a raw record into a [`parts_model::CanonicalRow`] and synthesizes
//! the row's canonical `code`.

#![deny(unsafe_code)]

pub mod aliases;
pub mod code;
pub mod normalizer;

pub use aliases::{COLUMN_ALIASES, KEYWORD_FALLBACKS, PART_ID_FIELDS, PREFIX_FIELDS};
pub use code::{format_code, synthesize_code};
pub use normalizer::{
    HeaderTarget, NormalizedSource, lookup_field, normalize_record, normalize_table,
    resolve_header,
};
