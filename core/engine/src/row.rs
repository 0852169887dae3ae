//! FILENAME: core/engine/src/row.rs
//! PURPOSE: One database record, an ordered sequence of cell values.
//! CONTEXT: A `Row` held by the caller is detached and freely mutable,
//! structurally and value-wise. Handing it to a `Grid` transfers ownership:
//! attached rows are only reachable as `&Row` (or through grid-mediated cell
//! writes), so the grid alone can keep every row in lock-step with the shared
//! column schema. `remove_row`/`set_row` transfer ownership back out.

use serde::{Deserialize, Serialize};

use crate::bounds::{check_index, check_insert_index};
use crate::cell::{CellKind, CellValue};
use crate::error::DbError;

/// One record of a database grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<CellValue>,
}

impl Row {
    /// Creates an empty row (no cells).
    pub fn new() -> Self {
        Row { cells: Vec::new() }
    }

    /// Creates a row from existing values.
    pub fn from_values(cells: Vec<CellValue>) -> Self {
        Row { cells }
    }

    /// Creates a row with one default cell per kind.
    pub fn with_defaults(kinds: &[CellKind]) -> Self {
        Row {
            cells: kinds.iter().map(|k| k.default_value()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn kind(&self, index: usize) -> Option<CellKind> {
        self.cells.get(index).map(|c| c.kind())
    }

    /// The kind of every cell, in order.
    pub fn kinds(&self) -> Vec<CellKind> {
        self.cells.iter().map(|c| c.kind()).collect()
    }

    /// Overwrites the cell at `index`, returning the previous value.
    /// A detached row is free to change a cell's kind this way; attached
    /// rows only see this call through the grid, which type-checks first.
    pub fn set_cell(&mut self, index: usize, value: CellValue) -> Result<CellValue, DbError> {
        check_index(index, self.cells.len())?;
        Ok(std::mem::replace(&mut self.cells[index], value))
    }

    /// Appends a cell.
    pub fn push_cell(&mut self, value: CellValue) {
        self.cells.push(value);
    }

    /// Inserts a cell at `index` (up to and including the end).
    pub fn insert_cell(&mut self, index: usize, value: CellValue) -> Result<(), DbError> {
        check_insert_index(index, self.cells.len())?;
        self.cells.insert(index, value);
        Ok(())
    }

    /// Removes and returns the cell at `index`.
    pub fn remove_cell(&mut self, index: usize) -> Result<CellValue, DbError> {
        check_index(index, self.cells.len())?;
        Ok(self.cells.remove(index))
    }

    // Schema-shaped mutation used by the owning grid. Bounds are the grid's
    // responsibility; these run after validation has already passed.

    pub(crate) fn insert_default(&mut self, index: usize, kind: CellKind) {
        self.cells.insert(index, kind.default_value());
    }

    pub(crate) fn remove_span(&mut self, index: usize, count: usize) {
        self.cells.drain(index..index + count);
    }

    /// Resets the cell at `index` to the default of `kind`, preserving the
    /// current value when it already has that kind.
    pub(crate) fn retype(&mut self, index: usize, kind: CellKind) {
        if self.cells[index].kind() != kind {
            self.cells[index] = kind.default_value();
        }
    }
}
