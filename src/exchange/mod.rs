//! Bulk data interchange
//!
//! The two entry points of the subsystem:
//!
//! - `export(store, path)`: read-only full-store serialization to one
//!   interchange document; a failure aborts the write and cannot leave the
//!   store inconsistent
//! - `import(store, path, mode)`: parse, then apply the whole batch inside
//!   one transaction; per-record problems are skipped and reported, any
//!   store-level failure rolls everything back and the store is left
//!   exactly as it was
//!
//! The caller sees a binary outcome - `Ok(report)` or one error - never a
//! partially applied import.

mod errors;
mod report;
mod resolver;

pub use errors::{ExchangeError, ExchangeResult};
pub use report::{ImportReport, SkipReason, SkippedRecord};

use std::path::Path;

use chrono::Utc;
use tracing::info;

use crate::document::{
    self, ArticleRecord, CarRecord, DriverRecord, ExchangeDocument, TypeRecord, ViolationRecord,
};
use crate::store::Store;

/// Conflict-resolution policy for an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Delete every existing record, then insert the document's records.
    Replace,
    /// Insert only natural keys the store does not have; skip the rest.
    AddOnly,
    /// Overwrite existing records field-by-field; insert the rest.
    Upsert,
}

/// Exports the whole store to `path`.
pub fn export(store: &Store, path: &Path) -> ExchangeResult<()> {
    let doc = build_document(store);
    document::write_document(path, &doc)?;
    info!(path = %path.display(), "export completed");
    Ok(())
}

/// Imports the document at `path` under `mode`, all-or-nothing.
pub fn import(store: &mut Store, path: &Path, mode: ImportMode) -> ExchangeResult<ImportReport> {
    let doc = document::read_document(path)?;

    let mut txn = store.begin();
    let report = resolver::apply(&mut txn, &doc, mode)?;
    txn.commit()?;

    info!(%report, "import committed");
    Ok(report)
}

fn build_document(store: &Store) -> ExchangeDocument {
    let drivers = store
        .drivers()
        .map(|d| DriverRecord {
            id: Some(d.id),
            first_name: Some(d.first_name.clone()),
            last_name: Some(d.last_name.clone()),
            middle_name: d.middle_name.clone(),
            license_number: Some(d.license_number.clone()),
            birth_date: Some(d.birth_date),
            city: Some(d.city.clone()),
        })
        .collect();

    // Owners always resolve while the ownership invariant holds; a car whose
    // owner is gone would be unusable on re-import anyway, so it is dropped.
    let cars = store
        .cars()
        .filter_map(|c| {
            let owner = store.driver(c.owner)?;
            Some(CarRecord {
                id: Some(c.id),
                brand: Some(c.brand.clone()),
                model: Some(c.model.clone()),
                vin_number: Some(c.vin_number.clone()),
                license_plate: Some(c.license_plate.clone()),
                owner_id: Some(owner.license_number.clone()),
                last_vehicle_inspection: Some(c.last_inspection),
            })
        })
        .collect();

    let violations = store
        .violations()
        .filter_map(|v| {
            let car = store.car(v.car)?;
            let article = store.article(v.article)?;
            let violation_type = store.violation_type(v.violation_type)?;
            Some(ViolationRecord {
                id: Some(v.id),
                violation_resolution: Some(v.resolution.clone()),
                violation_article_v: Some(article.code.clone()),
                violation_car: Some(car.license_plate.clone()),
                violation_date: Some(v.date),
                violation_paid: Some(v.paid),
                violation_type_v: Some(violation_type.name.clone()),
            })
        })
        .collect();

    let violation_articles = store
        .articles()
        .map(|a| ArticleRecord {
            id: Some(a.id),
            violation_article_code: Some(a.code.clone()),
            violation_article_description: Some(a.description.clone()),
            violation_article_fine: Some(a.fine),
        })
        .collect();

    let violation_types = store
        .types()
        .map(|t| TypeRecord {
            id: Some(t.id),
            violation_type_name: Some(t.name.clone()),
        })
        .collect();

    ExchangeDocument {
        export_date_time: Some(Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()),
        drivers,
        cars,
        violations,
        violation_articles,
        violation_types,
    }
}
