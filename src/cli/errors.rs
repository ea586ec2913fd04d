//! CLI-specific error types

use std::path::PathBuf;

use thiserror::Error;

use crate::exchange::ExchangeError;
use crate::registry::RegistryError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read config {path}: {detail}")]
    Config { path: PathBuf, detail: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),
}

impl CliError {
    pub fn config(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            detail: detail.into(),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
