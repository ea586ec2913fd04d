//! Store error types.
//!
//! Corruption of the state file is never ignored: a checksum mismatch is an
//! explicit error, not an empty store.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::EntityKind;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("state file {path} is corrupted: {detail}")]
    Corruption { path: PathBuf, detail: String },

    #[error("state file is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("duplicate {kind} key: {key}")]
    DuplicateKey { kind: EntityKind, key: String },

    #[error("unknown {kind} id: {id}")]
    UnknownId { kind: EntityKind, id: uuid::Uuid },

    #[error("{kind} refers to a missing {target}: {id}")]
    BrokenReference {
        kind: EntityKind,
        target: EntityKind,
        id: uuid::Uuid,
    },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn corruption(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        StoreError::Corruption {
            path: path.into(),
            detail: detail.into(),
        }
    }
}
