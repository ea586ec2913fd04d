//! Registry error types.

use thiserror::Error;

use crate::model::EntityKind;
use crate::store::StoreError;
use crate::validate::ValidationError;

pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// Every rule the candidate violated, collected for one report.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("no {kind} with key {key}")]
    NotFound { kind: EntityKind, key: String },
}

impl RegistryError {
    pub fn not_found(kind: EntityKind, key: impl Into<String>) -> Self {
        RegistryError::NotFound {
            kind,
            key: key.into(),
        }
    }
}
