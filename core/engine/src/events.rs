//! FILENAME: core/engine/src/events.rs
//! PURPOSE: Change-notification values emitted by grids and case descriptors.
//! CONTEXT: Every successful mutation pushes exactly one event, strictly
//! after the state change; failed calls push nothing. Callers drain the
//! queues in emission order. The row-collection channel and the shared-column
//! (schema) channel are independent and never cross-fire.

/// What happened to a grid's row collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowsChangeKind {
    /// Rows were inserted (or appended) starting at `index`.
    Insert,
    /// Rows were removed starting at `index`.
    Remove,
    /// The row at `index` was replaced, or one of its cells was rewritten.
    Replace,
    /// The row collection was reseeded wholesale.
    Reset,
}

/// One row-collection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowsChange {
    pub kind: RowsChangeKind,
    pub index: usize,
    pub count: usize,
}

/// What happened to the shared column schema (and, in lock-step, to every
/// row's cell vector).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaChangeKind {
    Insert,
    Remove,
    Retype,
}

/// One schema change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaChange {
    pub kind: SchemaChangeKind,
    pub index: usize,
    pub count: usize,
}

/// What happened to a descriptor's visible case set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasesChangeKind {
    Insert,
    Remove,
    Replace,
    /// The whole set changed at once (mode change, source-field rewrite,
    /// or a cleared manual list).
    Reset,
}

/// One case-set change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CasesChange {
    pub kind: CasesChangeKind,
    pub index: usize,
    pub count: usize,
}
