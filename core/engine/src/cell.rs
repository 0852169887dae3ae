//! FILENAME: core/engine/src/cell.rs
//! PURPOSE: Defines the typed leaf value stored in database rows.
//! CONTEXT: Fabula database fields come in exactly two kinds: 32-bit signed
//! integers and text. A `CellValue` is an immutable value object compared by
//! tag + value; `CellKind` is the schema-side tag and supplies the default
//! used whenever a row or column is created.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The type tag of one database column (and of every cell in it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Int,
    Text,
}

impl CellKind {
    /// The value a freshly created cell of this kind holds.
    pub fn default_value(self) -> CellValue {
        match self {
            CellKind::Int => CellValue::Int(0),
            CellKind::Text => CellValue::Text(String::new()),
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellKind::Int => write!(f, "int"),
            CellKind::Text => write!(f, "text"),
        }
    }
}

/// One stored field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Int(i32),
    Text(String),
}

impl CellValue {
    pub fn int(value: i32) -> Self {
        CellValue::Int(value)
    }

    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// The default value for `kind` (0 for int, empty for text).
    pub fn default_of(kind: CellKind) -> Self {
        kind.default_value()
    }

    pub fn kind(&self) -> CellKind {
        match self {
            CellValue::Int(_) => CellKind::Int,
            CellValue::Text(_) => CellKind::Text,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            CellValue::Int(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Int(_) => None,
            CellValue::Text(s) => Some(s),
        }
    }

    /// Returns the display string of the value, used by editor frontends
    /// and log messages.
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Int(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }
}
