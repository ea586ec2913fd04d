//! Import resolver.
//!
//! Applies parsed wire records to the store under one of three modes,
//! always in dependency order across kinds - articles and types first,
//! then drivers, then cars, then violations - so natural-key references
//! resolve against records materialized earlier in the same batch or
//! already present in the store, regardless of how the document orders
//! its sections.
//!
//! Per record:
//! 1. match by natural key: AddOnly skips an existing key unmodified;
//!    Upsert overwrites the existing record's fields keeping its surrogate
//!    id; a missing key means insert
//! 2. resolve every natural-key reference; an unresolvable reference
//!    skips the record with a warning and the batch continues
//! 3. run the entity validator - the same rules as interactive editing,
//!    with the matched record's own key as the exclusion key; an invalid
//!    record is skipped, never fatal
//!
//! Only store-level failures (which the transaction coordinator turns into
//! a full rollback) abort the batch.

use tracing::warn;
use uuid::Uuid;

use crate::document::{
    ArticleRecord, CarRecord, DriverRecord, ExchangeDocument, TypeRecord, ViolationRecord,
};
use crate::model::{EntityKind, RecordId};
use crate::store::{Store, StoreResult};
use crate::validate::{
    self, ArticleDraft, CarDraft, DriverDraft, TypeDraft, ViolationDraft,
};

use super::report::{ImportReport, SkipReason};
use super::ImportMode;

pub fn apply(
    store: &mut Store,
    doc: &ExchangeDocument,
    mode: ImportMode,
) -> StoreResult<ImportReport> {
    let mut report = ImportReport::default();

    if mode == ImportMode::Replace {
        store.clear();
    }

    apply_articles(store, &doc.violation_articles, mode, &mut report)?;
    apply_types(store, &doc.violation_types, mode, &mut report)?;
    apply_drivers(store, &doc.drivers, mode, &mut report)?;
    apply_cars(store, &doc.cars, mode, &mut report)?;
    apply_violations(store, &doc.violations, mode, &mut report)?;

    Ok(report)
}

fn apply_articles(
    store: &mut Store,
    records: &[ArticleRecord],
    mode: ImportMode,
    report: &mut ImportReport,
) -> StoreResult<()> {
    for record in records {
        let Some(code) = record.violation_article_code.as_deref() else {
            continue; // keyless records were dropped by the reader
        };
        let existing = store.find_article_by_code(code).cloned();
        if mode == ImportMode::AddOnly && existing.is_some() {
            report.skipped_existing += 1;
            continue;
        }

        let draft = ArticleDraft {
            code: record.violation_article_code.clone(),
            description: record.violation_article_description.clone(),
            fine: record.violation_article_fine,
        };
        let (id, prior) = identity(existing.as_ref().map(|a| (a.id, a.code.as_str())));

        match validate::validate_article(id, &draft, &*store, prior) {
            Ok(article) => {
                if existing.is_some() {
                    store.update_article(article)?;
                    report.updated += 1;
                } else {
                    store.insert_article(article)?;
                    report.inserted += 1;
                }
            }
            Err(err) => {
                warn!(code, %err, "skipping invalid violation article record");
                report.skip(EntityKind::ViolationArticle, code, SkipReason::Invalid(err));
            }
        }
    }
    Ok(())
}

fn apply_types(
    store: &mut Store,
    records: &[TypeRecord],
    mode: ImportMode,
    report: &mut ImportReport,
) -> StoreResult<()> {
    for record in records {
        let Some(name) = record.violation_type_name.as_deref() else {
            continue;
        };
        let existing = store.find_type_by_name(name).cloned();
        if mode == ImportMode::AddOnly && existing.is_some() {
            report.skipped_existing += 1;
            continue;
        }

        let draft = TypeDraft {
            name: record.violation_type_name.clone(),
        };
        let (id, prior) = identity(existing.as_ref().map(|t| (t.id, t.name.as_str())));

        match validate::validate_type(id, &draft, &*store, prior) {
            Ok(violation_type) => {
                if existing.is_some() {
                    store.update_type(violation_type)?;
                    report.updated += 1;
                } else {
                    store.insert_type(violation_type)?;
                    report.inserted += 1;
                }
            }
            Err(err) => {
                warn!(name, %err, "skipping invalid violation type record");
                report.skip(EntityKind::ViolationType, name, SkipReason::Invalid(err));
            }
        }
    }
    Ok(())
}

fn apply_drivers(
    store: &mut Store,
    records: &[DriverRecord],
    mode: ImportMode,
    report: &mut ImportReport,
) -> StoreResult<()> {
    for record in records {
        let Some(license) = record.license_number.as_deref() else {
            continue;
        };
        let existing = store.find_driver_by_license(license).cloned();
        if mode == ImportMode::AddOnly && existing.is_some() {
            report.skipped_existing += 1;
            continue;
        }

        let draft = DriverDraft {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            middle_name: record.middle_name.clone(),
            license_number: record.license_number.clone(),
            birth_date: record.birth_date,
            city: record.city.clone(),
        };
        let (id, prior) = identity(existing.as_ref().map(|d| (d.id, d.license_number.as_str())));

        match validate::validate_driver(id, &draft, &*store, prior) {
            Ok(driver) => {
                if existing.is_some() {
                    store.update_driver(driver)?;
                    report.updated += 1;
                } else {
                    store.insert_driver(driver)?;
                    report.inserted += 1;
                }
            }
            Err(err) => {
                warn!(license, %err, "skipping invalid driver record");
                report.skip(EntityKind::Driver, license, SkipReason::Invalid(err));
            }
        }
    }
    Ok(())
}

fn apply_cars(
    store: &mut Store,
    records: &[CarRecord],
    mode: ImportMode,
    report: &mut ImportReport,
) -> StoreResult<()> {
    for record in records {
        let Some(vin) = record.vin_number.as_deref() else {
            continue;
        };
        let existing = store.find_car_by_vin(vin).cloned();
        if mode == ImportMode::AddOnly && existing.is_some() {
            report.skipped_existing += 1;
            continue;
        }

        // Owner resolves by license number, against the batch and the store.
        let owner = match record.owner_id.as_deref() {
            Some(license) => match store.find_driver_by_license(license) {
                Some(driver) => Some(driver.id),
                None => {
                    warn!(vin, owner = license, "car owner not found; skipping record");
                    report.skip(
                        EntityKind::Car,
                        vin,
                        SkipReason::UnresolvedReference {
                            field: "ownerId",
                            key: license.to_string(),
                        },
                    );
                    continue;
                }
            },
            None => None, // validator reports the missing owner
        };

        let draft = CarDraft {
            brand: record.brand.clone(),
            model: record.model.clone(),
            vin_number: record.vin_number.clone(),
            license_plate: record.license_plate.clone(),
            owner,
            last_inspection: record.last_vehicle_inspection,
        };
        let (id, prior_vin, prior_plate) = match &existing {
            Some(car) => (
                car.id,
                Some(car.vin_number.as_str()),
                Some(car.license_plate.as_str()),
            ),
            None => (Uuid::new_v4(), None, None),
        };

        match validate::validate_car(id, &draft, &*store, prior_vin, prior_plate) {
            Ok(car) => {
                if existing.is_some() {
                    store.update_car(car)?;
                    report.updated += 1;
                } else {
                    store.insert_car(car)?;
                    report.inserted += 1;
                }
            }
            Err(err) => {
                warn!(vin, %err, "skipping invalid car record");
                report.skip(EntityKind::Car, vin, SkipReason::Invalid(err));
            }
        }
    }
    Ok(())
}

fn apply_violations(
    store: &mut Store,
    records: &[ViolationRecord],
    mode: ImportMode,
    report: &mut ImportReport,
) -> StoreResult<()> {
    for record in records {
        let Some(resolution) = record.violation_resolution.as_deref() else {
            continue;
        };
        let existing = store.find_violation_by_resolution(resolution).cloned();
        if mode == ImportMode::AddOnly && existing.is_some() {
            report.skipped_existing += 1;
            continue;
        }

        let car = match resolve_reference(
            record.violation_car.as_deref(),
            |key| store.find_car_by_plate(key).map(|c| c.id),
            "violationCar",
            EntityKind::Violation,
            resolution,
            report,
        ) {
            Resolved::Missing => continue,
            Resolved::Value(v) => v,
        };
        let article = match resolve_reference(
            record.violation_article_v.as_deref(),
            |key| store.find_article_by_code(key).map(|a| a.id),
            "violationArticleV",
            EntityKind::Violation,
            resolution,
            report,
        ) {
            Resolved::Missing => continue,
            Resolved::Value(v) => v,
        };
        let violation_type = match resolve_reference(
            record.violation_type_v.as_deref(),
            |key| store.find_type_by_name(key).map(|t| t.id),
            "violationTypeV",
            EntityKind::Violation,
            resolution,
            report,
        ) {
            Resolved::Missing => continue,
            Resolved::Value(v) => v,
        };

        let draft = ViolationDraft {
            resolution: record.violation_resolution.clone(),
            car,
            article,
            violation_type,
            date: record.violation_date,
            paid: record.violation_paid.unwrap_or(false),
        };
        let (id, prior) = identity(existing.as_ref().map(|v| (v.id, v.resolution.as_str())));

        match validate::validate_violation(id, &draft, &*store, prior) {
            Ok(violation) => {
                if existing.is_some() {
                    store.update_violation(violation)?;
                    report.updated += 1;
                } else {
                    store.insert_violation(violation)?;
                    report.inserted += 1;
                }
            }
            Err(err) => {
                warn!(resolution, %err, "skipping invalid violation record");
                report.skip(EntityKind::Violation, resolution, SkipReason::Invalid(err));
            }
        }
    }
    Ok(())
}

enum Resolved {
    /// Reference named a key that matched nothing; record already skipped.
    Missing,
    /// Resolved id, or `None` when the field was absent (left for the
    /// validator to report).
    Value(Option<RecordId>),
}

fn resolve_reference(
    key: Option<&str>,
    find: impl Fn(&str) -> Option<RecordId>,
    field: &'static str,
    kind: EntityKind,
    record_key: &str,
    report: &mut ImportReport,
) -> Resolved {
    match key {
        None => Resolved::Value(None),
        Some(key) => match find(key) {
            Some(id) => Resolved::Value(Some(id)),
            None => {
                warn!(field, key, "reference not found; skipping record");
                report.skip(
                    kind,
                    record_key,
                    SkipReason::UnresolvedReference {
                        field,
                        key: key.to_string(),
                    },
                );
                Resolved::Missing
            }
        },
    }
}

/// Existing record's (id, natural key), or a fresh id for an insert.
fn identity(existing: Option<(RecordId, &str)>) -> (RecordId, Option<&str>) {
    match existing {
        Some((id, key)) => (id, Some(key)),
        None => (Uuid::new_v4(), None),
    }
}
