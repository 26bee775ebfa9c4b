//! Shared data model for the parts vault.
//!
//! Everything in here is plain data: the canonical column set, the merged
//! database row, the part tokens produced by the grammar parser and the
//! snapshot document persisted by the builder.

pub mod column;
pub mod report;
pub mod row;
pub mod snapshot;
pub mod token;

pub use column::CanonicalColumn;
pub use report::{DiffSummary, RefreshReport, SourceFailure};
pub use row::CanonicalRow;
pub use snapshot::{Snapshot, SourceOrigin, TIMESTAMP_FORMAT};
pub use token::{
    COSMETIC_TYPE_ID, ELEMENTAL_TYPE_ID, PartCategory, PartId, PartReference, PartToken,
};
