//! Exchange error types.
//!
//! Whole-batch problems only: an unreadable document, or a store-level
//! failure that rolled the import back. Per-record skips are not errors;
//! they live in the `ImportReport`.

use thiserror::Error;

use crate::document::DocumentError;
use crate::store::StoreError;

pub type ExchangeResult<T> = Result<T, ExchangeError>;

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("import failed and was rolled back: {0}")]
    Store(#[from] StoreError),
}
