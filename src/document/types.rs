//! Interchange document wire types.
//!
//! The shape mirrors FORMAT.md: a root with an export timestamp and one
//! named section per record kind. Cross-references carry natural keys
//! (owner license number, license plate, article code, type name) so a
//! document stays portable across store instances whose surrogate ids
//! differ. The `id` fields are the exporting store's surrogate ids, written
//! for traceability and ignored on import.
//!
//! Parsing is tolerant by construction: every section defaults to empty,
//! every field is optional, and the `lenient` deserializers turn a
//! malformed date, integer, boolean or id into an absent value instead of
//! an error. Whether an absent field matters is the import resolver's call.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::RecordId;

use super::lenient;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeDocument {
    #[serde(default, deserialize_with = "lenient::string")]
    pub export_date_time: Option<String>,
    #[serde(default)]
    pub drivers: Vec<DriverRecord>,
    #[serde(default)]
    pub cars: Vec<CarRecord>,
    #[serde(default)]
    pub violations: Vec<ViolationRecord>,
    #[serde(default)]
    pub violation_articles: Vec<ArticleRecord>,
    #[serde(default)]
    pub violation_types: Vec<TypeRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverRecord {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub middle_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub license_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarRecord {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub vin_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub license_plate: Option<String>,
    /// Owner's license number (natural-key reference).
    #[serde(default, deserialize_with = "lenient::string")]
    pub owner_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub last_vehicle_inspection: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationRecord {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub violation_resolution: Option<String>,
    /// Article code (natural-key reference).
    #[serde(default, deserialize_with = "lenient::string")]
    pub violation_article_v: Option<String>,
    /// License plate of the car (natural-key reference).
    #[serde(default, deserialize_with = "lenient::string")]
    pub violation_car: Option<String>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub violation_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub violation_paid: Option<bool>,
    /// Type name (natural-key reference).
    #[serde(default, deserialize_with = "lenient::string")]
    pub violation_type_v: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub violation_article_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub violation_article_description: Option<String>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub violation_article_fine: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRecord {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub violation_type_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_sections_default_to_empty() {
        let doc: ExchangeDocument = serde_json::from_value(json!({})).unwrap();
        assert!(doc.drivers.is_empty());
        assert!(doc.violation_types.is_empty());
    }

    #[test]
    fn malformed_date_decodes_to_absent() {
        let doc: ExchangeDocument = serde_json::from_value(json!({
            "drivers": [{
                "licenseNumber": "1234567890",
                "birthDate": "not-a-date"
            }]
        }))
        .unwrap();
        assert_eq!(doc.drivers[0].license_number.as_deref(), Some("1234567890"));
        assert_eq!(doc.drivers[0].birth_date, None);
    }

    #[test]
    fn malformed_fine_decodes_to_absent() {
        let doc: ExchangeDocument = serde_json::from_value(json!({
            "violationArticles": [{
                "violationArticleCode": "12.9",
                "violationArticleFine": "five hundred"
            }]
        }))
        .unwrap();
        assert_eq!(doc.violation_articles[0].violation_article_fine, None);
    }

    #[test]
    fn stringly_typed_scalars_are_accepted() {
        let doc: ExchangeDocument = serde_json::from_value(json!({
            "violationArticles": [{
                "violationArticleCode": "12.9",
                "violationArticleFine": "500"
            }],
            "violations": [{
                "violationResolution": "18810177170123456789",
                "violationPaid": "true"
            }]
        }))
        .unwrap();
        assert_eq!(doc.violation_articles[0].violation_article_fine, Some(500));
        assert_eq!(doc.violations[0].violation_paid, Some(true));
    }

    #[test]
    fn empty_strings_decode_to_absent() {
        let doc: ExchangeDocument = serde_json::from_value(json!({
            "drivers": [{ "licenseNumber": "  " }]
        }))
        .unwrap();
        assert_eq!(doc.drivers[0].license_number, None);
    }

    #[test]
    fn field_names_round_trip() {
        let doc = ExchangeDocument {
            cars: vec![CarRecord {
                owner_id: Some("1234567890".into()),
                last_vehicle_inspection: NaiveDate::from_ymd_opt(2024, 3, 1),
                ..CarRecord::default()
            }],
            ..ExchangeDocument::default()
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["cars"][0]["ownerId"], "1234567890");
        assert_eq!(value["cars"][0]["lastVehicleInspection"], "2024-03-01");
    }
}
