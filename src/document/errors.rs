//! Document codec error types.
//!
//! Only whole-document problems surface here. Malformed scalar fields decode
//! to absent values, and records missing their natural key are dropped with
//! a warning during read; neither fails the parse.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type DocumentResult<T> = Result<T, DocumentError>;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read document {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write document {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("document is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}
