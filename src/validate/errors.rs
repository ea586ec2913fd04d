//! Validation error type
//!
//! One `ValidationError` carries every violated rule for a candidate record,
//! so interactive callers can show them all at once and the import path can
//! log a complete reason for a skipped record.

use std::fmt;

use thiserror::Error;

/// All rules violated by one candidate record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError {
    pub reasons: Vec<String>,
}

impl ValidationError {
    pub fn new(reasons: Vec<String>) -> Self {
        Self { reasons }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reasons.join(" "))
    }
}
