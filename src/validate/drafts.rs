//! Candidate records, as collected from a form or a parsed document.
//!
//! Every field that a user or a document could leave out or mangle is an
//! `Option`; the entity validators turn a draft into a fully-typed record
//! or report every missing/invalid field at once. References to other
//! records are structured `RecordId`s resolved by the caller, never strings.

use chrono::NaiveDate;

use crate::model::RecordId;

#[derive(Debug, Clone, Default)]
pub struct DriverDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub license_number: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CarDraft {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub vin_number: Option<String>,
    pub license_plate: Option<String>,
    pub owner: Option<RecordId>,
    pub last_inspection: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct ArticleDraft {
    pub code: Option<String>,
    pub description: Option<String>,
    pub fine: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct TypeDraft {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ViolationDraft {
    pub resolution: Option<String>,
    pub car: Option<RecordId>,
    pub article: Option<RecordId>,
    pub violation_type: Option<RecordId>,
    pub date: Option<NaiveDate>,
    pub paid: bool,
}
