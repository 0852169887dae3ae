//! FILENAME: core/engine/src/grid.rs
//! PURPOSE: The tabular value store, a row collection sharing one schema.
//! CONTEXT: This file defines the `Grid` struct, the heart of a Fabula
//! database type. Every row holds one cell per column, and every column
//! operation fans out to every attached row in lock-step, so the invariant
//! "row length == column count, cell kind == schema kind" holds after every
//! successful mutation. All operations validate fully before touching any
//! state; a failed call leaves the grid untouched and emits nothing.

use std::collections::VecDeque;

use crate::bounds::{check_capacity, check_index, check_insert_index, check_range};
use crate::cell::{CellKind, CellValue};
use crate::error::DbError;
use crate::events::{RowsChange, RowsChangeKind, SchemaChange, SchemaChangeKind};
use crate::row::Row;

/// Minimum number of rows a grid holds. A grid is never row-empty; a fresh
/// grid seeds itself with one default row.
pub const MIN_ROWS: usize = 1;
/// Maximum number of rows a grid may hold.
pub const MAX_ROWS: usize = 10_000;
/// Maximum number of columns a grid may hold.
pub const MAX_COLUMNS: usize = 100;

/// The Grid struct holds the rows and the shared column schema of one
/// database type. Rows are owned by the grid; see `row.rs` for the
/// attachment model.
#[derive(Debug, Clone)]
pub struct Grid {
    schema: Vec<CellKind>,
    rows: Vec<Row>,
    rows_changes: VecDeque<RowsChange>,
    schema_changes: VecDeque<SchemaChange>,
}

impl Grid {
    /// Creates a grid with no columns and the single seed row. This
    /// 1-row/0-column state doubles as the "no schema yet" seed.
    pub fn new() -> Self {
        Grid {
            schema: Vec::new(),
            rows: vec![Row::new()],
            rows_changes: VecDeque::new(),
            schema_changes: VecDeque::new(),
        }
    }

    /// Creates a grid with the given column schema and one default row.
    pub fn with_schema(kinds: &[CellKind]) -> Result<Self, DbError> {
        check_capacity("columns", kinds.len(), 0, MAX_COLUMNS)?;
        Ok(Grid {
            schema: kinds.to_vec(),
            rows: vec![Row::with_defaults(kinds)],
            rows_changes: VecDeque::new(),
            schema_changes: VecDeque::new(),
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    pub fn schema(&self) -> &[CellKind] {
        &self.schema
    }

    pub fn column_kind(&self, index: usize) -> Option<CellKind> {
        self.schema.get(index).copied()
    }

    /// Shared access to an attached row. There is deliberately no `&mut`
    /// counterpart: schema-shaped mutation of attached rows goes through the
    /// grid's column operations only.
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.cell(col))
    }

    // ========================================================================
    // ROW FACTORY
    // ========================================================================

    /// Produces a detached row matching the current schema, default-filled.
    /// Attaching it happens only through `add_row_values` / `insert_row_values`
    /// / `set_row`.
    pub fn new_row(&self) -> Row {
        Row::with_defaults(&self.schema)
    }

    /// Produces a detached row from `values`, validated against the current
    /// schema (count and per-index kind must match exactly).
    pub fn new_row_with(&self, values: Vec<CellValue>) -> Result<Row, DbError> {
        let row = Row::from_values(values);
        self.check_row_shape(&row)?;
        Ok(row)
    }

    // ========================================================================
    // ROW OPERATIONS
    // ========================================================================

    /// Appends one default-filled row.
    pub fn add_row(&mut self) -> Result<(), DbError> {
        self.insert_rows(self.rows.len(), 1)
    }

    /// Appends `count` default-filled rows.
    pub fn add_rows(&mut self, count: usize) -> Result<(), DbError> {
        self.insert_rows(self.rows.len(), count)
    }

    /// Inserts one default-filled row at `index`.
    pub fn insert_row(&mut self, index: usize) -> Result<(), DbError> {
        self.insert_rows(index, 1)
    }

    /// Inserts `count` default-filled rows starting at `index`.
    /// `count == 0` is a valid no-op and emits nothing.
    pub fn insert_rows(&mut self, index: usize, count: usize) -> Result<(), DbError> {
        check_insert_index(index, self.rows.len())?;
        check_capacity(
            "rows",
            self.rows.len().saturating_add(count),
            MIN_ROWS,
            MAX_ROWS,
        )?;
        if count == 0 {
            return Ok(());
        }
        let schema = self.schema.clone();
        self.rows
            .splice(index..index, (0..count).map(|_| Row::with_defaults(&schema)));
        self.emit_rows(RowsChangeKind::Insert, index, count);
        Ok(())
    }

    /// Appends a caller-built row, transferring ownership to the grid.
    pub fn add_row_values(&mut self, row: Row) -> Result<(), DbError> {
        self.insert_row_values(self.rows.len(), row)
    }

    /// Inserts a caller-built row at `index`, transferring ownership to the
    /// grid. Fails with `SchemaMismatch` unless the row matches the schema.
    pub fn insert_row_values(&mut self, index: usize, row: Row) -> Result<(), DbError> {
        check_insert_index(index, self.rows.len())?;
        check_capacity("rows", self.rows.len() + 1, MIN_ROWS, MAX_ROWS)?;
        self.check_row_shape(&row)?;
        self.rows.insert(index, row);
        self.emit_rows(RowsChangeKind::Insert, index, 1);
        Ok(())
    }

    /// Replaces the row at `index`, returning the previous row (detached).
    pub fn set_row(&mut self, index: usize, row: Row) -> Result<Row, DbError> {
        check_index(index, self.rows.len())?;
        self.check_row_shape(&row)?;
        let old = std::mem::replace(&mut self.rows[index], row);
        self.emit_rows(RowsChangeKind::Replace, index, 1);
        Ok(old)
    }

    /// Removes the row at `index` and hands it back, detached.
    pub fn remove_row(&mut self, index: usize) -> Result<Row, DbError> {
        check_index(index, self.rows.len())?;
        check_capacity("rows", self.rows.len() - 1, MIN_ROWS, MAX_ROWS)?;
        let row = self.rows.remove(index);
        self.emit_rows(RowsChangeKind::Remove, index, 1);
        Ok(row)
    }

    /// Removes `count` rows starting at `index` and hands them back.
    /// `count == 0` is a valid no-op and emits nothing.
    pub fn remove_rows(&mut self, index: usize, count: usize) -> Result<Vec<Row>, DbError> {
        check_range(index, count, self.rows.len())?;
        check_capacity("rows", self.rows.len() - count, MIN_ROWS, MAX_ROWS)?;
        if count == 0 {
            return Ok(Vec::new());
        }
        let removed: Vec<Row> = self.rows.drain(index..index + count).collect();
        self.emit_rows(RowsChangeKind::Remove, index, count);
        Ok(removed)
    }

    /// Drops every row and reseeds the single default row.
    pub fn clear_rows(&mut self) {
        self.rows.clear();
        self.rows.push(Row::with_defaults(&self.schema));
        self.emit_rows(RowsChangeKind::Reset, 0, 1);
    }

    /// Overwrites one cell, returning the previous value. The new value's
    /// kind must match the column schema.
    pub fn set_cell(
        &mut self,
        row: usize,
        col: usize,
        value: CellValue,
    ) -> Result<CellValue, DbError> {
        check_index(row, self.rows.len())?;
        check_index(col, self.schema.len())?;
        if value.kind() != self.schema[col] {
            return Err(DbError::SchemaMismatch(format!(
                "column {} holds {} values, got {}",
                col,
                self.schema[col],
                value.kind()
            )));
        }
        let prev = self.rows[row].set_cell(col, value)?;
        self.emit_rows(RowsChangeKind::Replace, row, 1);
        Ok(prev)
    }

    // ========================================================================
    // COLUMN OPERATIONS (fan out to every row, atomically)
    // ========================================================================

    /// Appends one column; every row gains a default cell.
    pub fn add_column(&mut self, kind: CellKind) -> Result<(), DbError> {
        self.insert_columns(self.schema.len(), &[kind])
    }

    /// Appends several columns at once.
    pub fn add_columns(&mut self, kinds: &[CellKind]) -> Result<(), DbError> {
        self.insert_columns(self.schema.len(), kinds)
    }

    /// Inserts one column at `index`.
    pub fn insert_column(&mut self, index: usize, kind: CellKind) -> Result<(), DbError> {
        self.insert_columns(index, &[kind])
    }

    /// Inserts columns starting at `index` (valid through `column_count`).
    /// An empty slice is a valid no-op and emits nothing.
    pub fn insert_columns(&mut self, index: usize, kinds: &[CellKind]) -> Result<(), DbError> {
        check_insert_index(index, self.schema.len())?;
        check_capacity(
            "columns",
            self.schema.len().saturating_add(kinds.len()),
            0,
            MAX_COLUMNS,
        )?;
        if kinds.is_empty() {
            return Ok(());
        }
        self.schema.splice(index..index, kinds.iter().copied());
        for row in &mut self.rows {
            for (offset, kind) in kinds.iter().enumerate() {
                row.insert_default(index + offset, *kind);
            }
        }
        self.emit_schema(SchemaChangeKind::Insert, index, kinds.len());
        Ok(())
    }

    /// Removes the column at `index`; every row loses that cell.
    pub fn remove_column(&mut self, index: usize) -> Result<(), DbError> {
        self.remove_columns(index, 1)
    }

    /// Removes `count` columns starting at `index`.
    pub fn remove_columns(&mut self, index: usize, count: usize) -> Result<(), DbError> {
        check_range(index, count, self.schema.len())?;
        if count == 0 {
            return Ok(());
        }
        self.schema.drain(index..index + count);
        for row in &mut self.rows {
            row.remove_span(index, count);
        }
        self.emit_schema(SchemaChangeKind::Remove, index, count);
        Ok(())
    }

    /// Retypes the column at `index`. Every row's cell there resets to the
    /// new kind's default unless it already has that kind, in which case the
    /// value is preserved.
    pub fn set_column_kind(&mut self, index: usize, kind: CellKind) -> Result<(), DbError> {
        self.set_column_kinds(index, &[kind])
    }

    /// Retypes `kinds.len()` columns starting at `index`.
    pub fn set_column_kinds(&mut self, index: usize, kinds: &[CellKind]) -> Result<(), DbError> {
        check_range(index, kinds.len(), self.schema.len())?;
        if kinds.is_empty() {
            return Ok(());
        }
        for (offset, kind) in kinds.iter().enumerate() {
            self.schema[index + offset] = *kind;
        }
        for row in &mut self.rows {
            for (offset, kind) in kinds.iter().enumerate() {
                row.retype(index + offset, *kind);
            }
        }
        self.emit_schema(SchemaChangeKind::Retype, index, kinds.len());
        Ok(())
    }

    // ========================================================================
    // CHANGE NOTIFICATION
    // ========================================================================

    /// Drains the pending row-collection changes, in emission order.
    pub fn take_rows_changes(&mut self) -> Vec<RowsChange> {
        self.rows_changes.drain(..).collect()
    }

    /// Drains the pending schema changes, in emission order.
    pub fn take_schema_changes(&mut self) -> Vec<SchemaChange> {
        self.schema_changes.drain(..).collect()
    }

    fn emit_rows(&mut self, kind: RowsChangeKind, index: usize, count: usize) {
        self.rows_changes.push_back(RowsChange { kind, index, count });
    }

    fn emit_schema(&mut self, kind: SchemaChangeKind, index: usize, count: usize) {
        self.schema_changes
            .push_back(SchemaChange { kind, index, count });
    }

    fn check_row_shape(&self, row: &Row) -> Result<(), DbError> {
        if row.len() != self.schema.len() {
            return Err(DbError::SchemaMismatch(format!(
                "row has {} cells, schema has {} columns",
                row.len(),
                self.schema.len()
            )));
        }
        for (i, kind) in self.schema.iter().enumerate() {
            if row.kind(i) != Some(*kind) {
                return Err(DbError::SchemaMismatch(format!(
                    "cell {} has kind {}, column requires {}",
                    i,
                    row.kind(i).map(|k| k.to_string()).unwrap_or_default(),
                    kind
                )));
            }
        }
        Ok(())
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

/// Equality covers the stored data (schema + rows); pending, undrained
/// events are transient and excluded.
impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.schema == other.schema && self.rows == other.rows
    }
}
