//! FILENAME: core/persistence/src/lib.rs
//! Fabula Persistence Module
//!
//! Converts in-game databases to and from the tool's proprietary binary
//! file layouts. The codec itself works on in-memory byte buffers; the thin
//! `save_database_file` / `load_database_file` helpers are the filesystem
//! convenience on top.

mod error;
mod format;
mod reader;
mod writer;

pub use error::PersistenceError;
pub use format::{
    CASES_LOAD_FILE, CASES_MANUAL, CASES_PLAIN, CASES_REFER, DATA_MAGIC, DB_CHANGEABLE,
    DB_SYSTEM, DB_USER, FILE_FOOTER, FORMAT_VERSION, KIND_INT, KIND_TEXT, MAX_TYPES,
    MERGED_MAGIC, PROJECT_MAGIC,
};
pub use reader::{decode_data, decode_merged, decode_project};
pub use writer::{encode_data, encode_merged, encode_project};

use engine::{CaseDescriptor, CaseList, CaseSource, CellKind, CellValue, DatabaseKind, Grid, ValueCase};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// FILE KINDS
// ============================================================================

/// Which proprietary layout to read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DbFileKind {
    /// Type/schema settings (the database half of the editor project).
    Project,
    /// Row data only, self-describing via inline kind tags.
    Data,
    /// Project half and data half in one file.
    Merged,
}

// ============================================================================
// DATABASE
// ============================================================================

/// A complete database ready for encoding: which in-game database it is,
/// plus its types in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    pub kind: DatabaseKind,
    pub types: Vec<TypeData>,
}

impl Database {
    pub fn new(kind: DatabaseKind) -> Self {
        Database {
            kind,
            types: Vec::new(),
        }
    }
}

// ============================================================================
// TYPE DATA
// ============================================================================

/// One database type: its identity, column settings and row data.
/// Mirrors the runtime `Grid` + descriptors; see `from_grid` / `to_grid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeData {
    pub name: String,
    pub memo: String,
    pub columns: Vec<ColumnData>,
    pub rows: Vec<Vec<SavedValue>>,
}

impl TypeData {
    pub fn new(name: impl Into<String>) -> Self {
        TypeData {
            name: name.into(),
            memo: String::new(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Captures a grid and its per-column descriptors. `descriptors` must
    /// hold exactly one entry per column. Column names start empty; the
    /// editor assigns them through the public field.
    pub fn from_grid(
        name: impl Into<String>,
        memo: impl Into<String>,
        grid: &Grid,
        descriptors: &[CaseDescriptor],
    ) -> Result<Self, PersistenceError> {
        if descriptors.len() != grid.column_count() {
            return Err(PersistenceError::ShapeMismatch(format!(
                "{} descriptors for {} columns",
                descriptors.len(),
                grid.column_count()
            )));
        }
        let columns = grid
            .schema()
            .iter()
            .zip(descriptors)
            .map(|(kind, desc)| ColumnData {
                name: String::new(),
                kind: *kind,
                cases: SavedCaseSource::from_source(desc.source()),
            })
            .collect();
        let rows = grid
            .rows()
            .iter()
            .map(|row| row.cells().iter().map(SavedValue::from_value).collect())
            .collect();
        Ok(TypeData {
            name: name.into(),
            memo: memo.into(),
            columns,
            rows,
        })
    }

    /// Rebuilds the runtime grid and descriptors. A type with no stored
    /// rows (a decoded project file) yields the grid's seed row.
    pub fn to_grid(&self) -> Result<(Grid, Vec<CaseDescriptor>), PersistenceError> {
        let kinds: Vec<CellKind> = self.columns.iter().map(|c| c.kind).collect();
        let mut grid = Grid::with_schema(&kinds).map_err(PersistenceError::Engine)?;
        for (i, saved) in self.rows.iter().enumerate() {
            let values: Vec<CellValue> = saved.iter().map(SavedValue::to_value).collect();
            let row = grid.new_row_with(values).map_err(PersistenceError::Engine)?;
            if i == 0 {
                grid.set_row(0, row).map_err(PersistenceError::Engine)?;
            } else {
                grid.add_row_values(row).map_err(PersistenceError::Engine)?;
            }
        }
        let descriptors = self
            .columns
            .iter()
            .map(|c| c.cases.to_source().map(CaseDescriptor::from))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((grid, descriptors))
    }
}

// ============================================================================
// COLUMN DATA
// ============================================================================

/// One column setting: display name, cell kind, and case sourcing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnData {
    pub name: String,
    pub kind: CellKind,
    pub cases: SavedCaseSource,
}

// ============================================================================
// SAVED VALUE
// ============================================================================

/// A serializable cell value. `from_grid` guarantees every stored value
/// agrees with its column's kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SavedValue {
    Int(i32),
    Text(String),
}

impl SavedValue {
    pub fn from_value(value: &CellValue) -> Self {
        match value {
            CellValue::Int(n) => SavedValue::Int(*n),
            CellValue::Text(s) => SavedValue::Text(s.clone()),
        }
    }

    pub fn to_value(&self) -> CellValue {
        match self {
            SavedValue::Int(n) => CellValue::Int(*n),
            SavedValue::Text(s) => CellValue::Text(s.clone()),
        }
    }

    pub fn kind(&self) -> CellKind {
        match self {
            SavedValue::Int(_) => CellKind::Int,
            SavedValue::Text(_) => CellKind::Text,
        }
    }
}

// ============================================================================
// SAVED CASE SOURCE
// ============================================================================

/// Serializable mirror of the runtime `CaseSource`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SavedCaseSource {
    Plain,
    Manual(Vec<ValueCase>),
    ReferDatabase {
        kind: DatabaseKind,
        type_id: u32,
        use_additional: bool,
        additional: [String; 3],
    },
    LoadFile {
        folder: String,
        omit_folder_name: bool,
    },
}

impl SavedCaseSource {
    pub fn from_source(source: &CaseSource) -> Self {
        match source {
            CaseSource::Plain => SavedCaseSource::Plain,
            CaseSource::Manual(list) => SavedCaseSource::Manual(list.cases().to_vec()),
            CaseSource::ReferDatabase {
                kind,
                type_id,
                use_additional,
                additional,
            } => SavedCaseSource::ReferDatabase {
                kind: *kind,
                type_id: *type_id,
                use_additional: *use_additional,
                additional: additional.clone(),
            },
            CaseSource::LoadFile {
                folder,
                omit_folder_name,
            } => SavedCaseSource::LoadFile {
                folder: folder.clone(),
                omit_folder_name: *omit_folder_name,
            },
        }
    }

    /// Rebuilds the runtime source, re-validating the manual list bound.
    pub fn to_source(&self) -> Result<CaseSource, PersistenceError> {
        Ok(match self {
            SavedCaseSource::Plain => CaseSource::Plain,
            SavedCaseSource::Manual(cases) => {
                CaseSource::Manual(CaseList::from_cases(cases.clone())?)
            }
            SavedCaseSource::ReferDatabase {
                kind,
                type_id,
                use_additional,
                additional,
            } => CaseSource::ReferDatabase {
                kind: *kind,
                type_id: *type_id,
                use_additional: *use_additional,
                additional: additional.clone(),
            },
            SavedCaseSource::LoadFile {
                folder,
                omit_folder_name,
            } => CaseSource::LoadFile {
                folder: folder.clone(),
                omit_folder_name: *omit_folder_name,
            },
        })
    }
}

// ============================================================================
// FILESYSTEM HELPERS
// ============================================================================

/// Encodes `db` in the given layout and writes it to `path`.
pub fn save_database_file(
    db: &Database,
    kind: DbFileKind,
    path: &Path,
) -> Result<(), PersistenceError> {
    let bytes = match kind {
        DbFileKind::Project => encode_project(db),
        DbFileKind::Data => encode_data(db),
        DbFileKind::Merged => encode_merged(db),
    };
    log::debug!("writing {:?} file ({} bytes) to {:?}", kind, bytes.len(), path);
    fs::write(path, bytes)?;
    Ok(())
}

/// Reads `path` and decodes it as the given layout.
pub fn load_database_file(kind: DbFileKind, path: &Path) -> Result<Database, PersistenceError> {
    let bytes = fs::read(path)?;
    log::debug!("read {:?} file ({} bytes) from {:?}", kind, bytes.len(), path);
    match kind {
        DbFileKind::Project => decode_project(&bytes),
        DbFileKind::Data => decode_data(&bytes),
        DbFileKind::Merged => decode_merged(&bytes),
    }
}
