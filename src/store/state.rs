//! In-memory image of the record store.
//!
//! `BTreeMap` keeps iteration deterministic across runs, so exports and
//! listings come out in a stable order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Car, Driver, RecordId, Violation, ViolationArticle, ViolationType};

/// All five tables. Cloned wholesale by the transaction guard; the dataset
/// is small (an agency office, not a national registry).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreState {
    #[serde(default)]
    pub drivers: BTreeMap<RecordId, Driver>,
    #[serde(default)]
    pub cars: BTreeMap<RecordId, Car>,
    #[serde(default)]
    pub violations: BTreeMap<RecordId, Violation>,
    #[serde(default)]
    pub violation_articles: BTreeMap<RecordId, ViolationArticle>,
    #[serde(default)]
    pub violation_types: BTreeMap<RecordId, ViolationType>,
}

impl StoreState {
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
            && self.cars.is_empty()
            && self.violations.is_empty()
            && self.violation_articles.is_empty()
            && self.violation_types.is_empty()
    }
}
