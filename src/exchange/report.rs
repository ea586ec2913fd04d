//! Import outcome reporting.
//!
//! A skipped record is an expected outcome of best-effort import, distinct
//! from a batch failure: skips are collected here and the batch continues,
//! while a store-level error aborts and rolls back the whole import.

use std::fmt;

use crate::model::EntityKind;
use crate::validate::ValidationError;

/// Why one record did not make it into the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A natural-key reference matched nothing in the store or the batch.
    UnresolvedReference { field: &'static str, key: String },
    /// The record failed the same validation rules interactive editing runs.
    Invalid(ValidationError),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnresolvedReference { field, key } => {
                write!(f, "unresolved reference {} = {}", field, key)
            }
            SkipReason::Invalid(err) => write!(f, "{}", err),
        }
    }
}

/// One record set aside during import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub kind: EntityKind,
    pub key: String,
    pub reason: SkipReason,
}

/// Summary of one import invocation.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub inserted: usize,
    pub updated: usize,
    /// Records whose natural key already existed, left untouched (AddOnly).
    pub skipped_existing: usize,
    pub skipped: Vec<SkippedRecord>,
}

impl ImportReport {
    pub fn skip(&mut self, kind: EntityKind, key: impl Into<String>, reason: SkipReason) {
        self.skipped.push(SkippedRecord {
            kind,
            key: key.into(),
            reason,
        });
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} inserted, {} updated, {} unchanged, {} skipped",
            self.inserted,
            self.updated,
            self.skipped_existing,
            self.skipped.len()
        )
    }
}
