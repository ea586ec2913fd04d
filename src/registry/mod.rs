//! Validated record operations
//!
//! The interactive write path: every add and update runs the entity
//! validator (all violated rules reported together), deletes cascade, and
//! each operation persists the store on success. Callers address records by
//! natural key and pass references as resolved `RecordId`s inside drafts.
//!
//! The import path (`exchange`) shares the validators but owns its own
//! transaction scope, so it does not go through this module.

mod errors;

pub use errors::{RegistryError, RegistryResult};

use uuid::Uuid;

use crate::model::{EntityKind, RecordId};
use crate::store::Store;
use crate::validate::{
    self, ArticleDraft, CarDraft, DriverDraft, TypeDraft, ViolationDraft,
};

// ---- drivers ----

pub fn add_driver(store: &mut Store, draft: &DriverDraft) -> RegistryResult<RecordId> {
    let driver = validate::validate_driver(Uuid::new_v4(), draft, &*store, None)?;
    let id = driver.id;
    store.insert_driver(driver)?;
    store.persist()?;
    Ok(id)
}

pub fn update_driver(
    store: &mut Store,
    license: &str,
    draft: &DriverDraft,
) -> RegistryResult<()> {
    let existing = store
        .find_driver_by_license(license)
        .ok_or_else(|| RegistryError::not_found(EntityKind::Driver, license))?
        .clone();
    let driver =
        validate::validate_driver(existing.id, draft, &*store, Some(&existing.license_number))?;
    store.update_driver(driver)?;
    store.persist()?;
    Ok(())
}

pub fn delete_driver(store: &mut Store, license: &str) -> RegistryResult<()> {
    let id = store
        .find_driver_by_license(license)
        .map(|d| d.id)
        .ok_or_else(|| RegistryError::not_found(EntityKind::Driver, license))?;
    store.remove_driver(id)?;
    store.persist()?;
    Ok(())
}

// ---- cars ----

pub fn add_car(store: &mut Store, draft: &CarDraft) -> RegistryResult<RecordId> {
    let car = validate::validate_car(Uuid::new_v4(), draft, &*store, None, None)?;
    let id = car.id;
    store.insert_car(car)?;
    store.persist()?;
    Ok(id)
}

pub fn update_car(store: &mut Store, plate: &str, draft: &CarDraft) -> RegistryResult<()> {
    let existing = store
        .find_car_by_plate(plate)
        .ok_or_else(|| RegistryError::not_found(EntityKind::Car, plate))?
        .clone();
    let car = validate::validate_car(
        existing.id,
        draft,
        &*store,
        Some(&existing.vin_number),
        Some(&existing.license_plate),
    )?;
    store.update_car(car)?;
    store.persist()?;
    Ok(())
}

pub fn delete_car(store: &mut Store, plate: &str) -> RegistryResult<()> {
    let id = store
        .find_car_by_plate(plate)
        .map(|c| c.id)
        .ok_or_else(|| RegistryError::not_found(EntityKind::Car, plate))?;
    store.remove_car(id)?;
    store.persist()?;
    Ok(())
}

// ---- violation articles ----

pub fn add_article(store: &mut Store, draft: &ArticleDraft) -> RegistryResult<RecordId> {
    let article = validate::validate_article(Uuid::new_v4(), draft, &*store, None)?;
    let id = article.id;
    store.insert_article(article)?;
    store.persist()?;
    Ok(id)
}

pub fn update_article(store: &mut Store, code: &str, draft: &ArticleDraft) -> RegistryResult<()> {
    let existing = store
        .find_article_by_code(code)
        .ok_or_else(|| RegistryError::not_found(EntityKind::ViolationArticle, code))?
        .clone();
    let article = validate::validate_article(existing.id, draft, &*store, Some(&existing.code))?;
    store.update_article(article)?;
    store.persist()?;
    Ok(())
}

pub fn delete_article(store: &mut Store, code: &str) -> RegistryResult<()> {
    let id = store
        .find_article_by_code(code)
        .map(|a| a.id)
        .ok_or_else(|| RegistryError::not_found(EntityKind::ViolationArticle, code))?;
    store.remove_article(id)?;
    store.persist()?;
    Ok(())
}

// ---- violation types ----

pub fn add_type(store: &mut Store, draft: &TypeDraft) -> RegistryResult<RecordId> {
    let violation_type = validate::validate_type(Uuid::new_v4(), draft, &*store, None)?;
    let id = violation_type.id;
    store.insert_type(violation_type)?;
    store.persist()?;
    Ok(id)
}

pub fn update_type(store: &mut Store, name: &str, draft: &TypeDraft) -> RegistryResult<()> {
    let existing = store
        .find_type_by_name(name)
        .ok_or_else(|| RegistryError::not_found(EntityKind::ViolationType, name))?
        .clone();
    let violation_type = validate::validate_type(existing.id, draft, &*store, Some(&existing.name))?;
    store.update_type(violation_type)?;
    store.persist()?;
    Ok(())
}

pub fn delete_type(store: &mut Store, name: &str) -> RegistryResult<()> {
    let id = store
        .find_type_by_name(name)
        .map(|t| t.id)
        .ok_or_else(|| RegistryError::not_found(EntityKind::ViolationType, name))?;
    store.remove_type(id)?;
    store.persist()?;
    Ok(())
}

// ---- violations ----

pub fn add_violation(store: &mut Store, draft: &ViolationDraft) -> RegistryResult<RecordId> {
    let violation = validate::validate_violation(Uuid::new_v4(), draft, &*store, None)?;
    let id = violation.id;
    store.insert_violation(violation)?;
    store.persist()?;
    Ok(id)
}

pub fn update_violation(
    store: &mut Store,
    resolution: &str,
    draft: &ViolationDraft,
) -> RegistryResult<()> {
    let existing = store
        .find_violation_by_resolution(resolution)
        .ok_or_else(|| RegistryError::not_found(EntityKind::Violation, resolution))?
        .clone();
    let violation =
        validate::validate_violation(existing.id, draft, &*store, Some(&existing.resolution))?;
    store.update_violation(violation)?;
    store.persist()?;
    Ok(())
}

pub fn delete_violation(store: &mut Store, resolution: &str) -> RegistryResult<()> {
    let id = store
        .find_violation_by_resolution(resolution)
        .map(|v| v.id)
        .ok_or_else(|| RegistryError::not_found(EntityKind::Violation, resolution))?;
    store.remove_violation(id)?;
    store.persist()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn driver_draft(license: &str) -> DriverDraft {
        DriverDraft {
            first_name: Some("Иван".into()),
            last_name: Some("Иванов".into()),
            middle_name: None,
            license_number: Some(license.into()),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 14),
            city: Some("Киров".into()),
        }
    }

    #[test]
    fn add_and_update_driver() {
        let mut store = Store::in_memory();
        add_driver(&mut store, &driver_draft("1234567890")).unwrap();

        let mut changed = driver_draft("1234567890");
        changed.city = Some("Москва".into());
        update_driver(&mut store, "1234567890", &changed).unwrap();

        let driver = store.find_driver_by_license("1234567890").unwrap();
        assert_eq!(driver.city, "Москва");
    }

    #[test]
    fn add_driver_reports_all_reasons() {
        let mut store = Store::in_memory();
        let err = add_driver(&mut store, &DriverDraft::default()).unwrap_err();
        match err {
            RegistryError::Validation(v) => assert_eq!(v.reasons.len(), 5),
            other => panic!("expected validation error, got {}", other),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn duplicate_license_is_a_validation_reason() {
        let mut store = Store::in_memory();
        add_driver(&mut store, &driver_draft("1234567890")).unwrap();
        let err = add_driver(&mut store, &driver_draft("1234567890")).unwrap_err();
        match err {
            RegistryError::Validation(v) => {
                assert_eq!(v.reasons, vec!["License number already exists."])
            }
            other => panic!("expected validation error, got {}", other),
        }
    }

    #[test]
    fn delete_driver_cascades() {
        let mut store = Store::in_memory();
        let owner = add_driver(&mut store, &driver_draft("1234567890")).unwrap();
        add_car(
            &mut store,
            &CarDraft {
                brand: Some("Лада".into()),
                model: Some("Веста".into()),
                vin_number: Some("1HGBH41JXMN109186".into()),
                license_plate: Some("Е123ЕЕ78".into()),
                owner: Some(owner),
                last_inspection: NaiveDate::from_ymd_opt(2024, 3, 1),
            },
        )
        .unwrap();

        delete_driver(&mut store, "1234567890").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn update_unknown_car_is_not_found() {
        let mut store = Store::in_memory();
        let err = update_car(&mut store, "Е123ЕЕ78", &CarDraft::default()).unwrap_err();
        assert!(matches!(err, RegistryError::NotFound { .. }));
    }
}
