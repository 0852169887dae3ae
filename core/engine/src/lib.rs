//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the Fabula database engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod bounds;
pub mod cases;
pub mod cell;
pub mod error;
pub mod events;
pub mod grid;
pub mod row;

// Re-export commonly used types at the crate root
pub use cases::{
    ArgCaseDescriptor, ArgCaseSource, ArgCaseSourceKind, CaseDescriptor, CaseList, CaseSource,
    CaseSourceKind, DatabaseKind, ValueCase, ADDITIONAL_CASE_NUMBERS, MAX_CASES,
};
pub use cell::{CellKind, CellValue};
pub use error::DbError;
pub use events::{
    CasesChange, CasesChangeKind, RowsChange, RowsChangeKind, SchemaChange, SchemaChangeKind,
};
pub use grid::{Grid, MAX_COLUMNS, MAX_ROWS, MIN_ROWS};
pub use row::Row;
