//! Record types held by the store.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store-assigned surrogate identifier.
///
/// Ids are meaningful only within one store instance; interchange documents
/// carry them for traceability but imports match records by natural key.
pub type RecordId = Uuid;

/// The five record kinds, in no particular order.
///
/// Dependency order between kinds is owned by the import resolver and the
/// store's cascade logic, not encoded here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Driver,
    Car,
    Violation,
    ViolationArticle,
    ViolationType,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Driver => "driver",
            EntityKind::Car => "car",
            EntityKind::Violation => "violation",
            EntityKind::ViolationArticle => "violation article",
            EntityKind::ViolationType => "violation type",
        };
        write!(f, "{}", name)
    }
}

/// A licensed driver. Natural key: `license_number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub license_number: String,
    pub birth_date: NaiveDate,
    pub city: String,
}

/// A registered car. Natural keys: `vin_number` and `license_plate`.
///
/// `owner` always refers to an existing `Driver`; deleting the driver
/// cascades to the car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: RecordId,
    pub brand: String,
    pub model: String,
    pub vin_number: String,
    pub license_plate: String,
    pub owner: RecordId,
    pub last_inspection: NaiveDate,
}

/// An article of the traffic code. Natural key: `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationArticle {
    pub id: RecordId,
    pub code: String,
    pub description: String,
    pub fine: i64,
}

/// A violation category. Natural key: `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationType {
    pub id: RecordId,
    pub name: String,
}

/// A recorded violation. Natural key: `resolution` (citation number).
///
/// References exactly one car, one article and one type; deleting any of
/// them cascades to the violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub id: RecordId,
    pub resolution: String,
    pub car: RecordId,
    pub article: RecordId,
    pub violation_type: RecordId,
    pub date: NaiveDate,
    pub paid: bool,
}
