//! FILENAME: core/engine/src/error.rs

use thiserror::Error;

/// Errors raised by the value store and the case descriptors.
///
/// Every failure is synchronous and local; a failed call leaves the
/// structure exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DbError {
    #[error("index {index} out of range (length {len})")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("invalid range: start {start} + count {count} exceeds length {len}")]
    InvalidRange {
        start: usize,
        count: usize,
        len: usize,
    },

    #[error("{collection} count {requested} outside allowed range [{min}, {max}]")]
    CapacityExceeded {
        collection: &'static str,
        requested: usize,
        min: usize,
        max: usize,
    },

    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("operation requires {required} mode but descriptor is in {actual} mode")]
    InvalidModeOperation {
        required: &'static str,
        actual: &'static str,
    },

    #[error("cannot initialize {mode} mode: {reason}")]
    InvalidModeInit { mode: &'static str, reason: String },
}
