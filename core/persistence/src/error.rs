//! FILENAME: core/persistence/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid file format: {0}")]
    InvalidFormat(String),

    #[error("unexpected end of file: needed {expected} more bytes, {remaining} left")]
    UnexpectedEof { expected: usize, remaining: usize },

    #[error("unsupported format version: {0}")]
    UnsupportedVersion(u32),

    #[error("engine error: {0}")]
    Engine(#[from] engine::DbError),

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
}
