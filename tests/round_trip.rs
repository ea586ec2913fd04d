//! Export/import round-trip tests
//!
//! A full export followed by a replace-mode import into an empty store must
//! reproduce every record and every cross-reference.

use chrono::NaiveDate;
use tempfile::TempDir;

use roadbase::exchange::{self, ImportMode};
use roadbase::registry;
use roadbase::store::Store;
use roadbase::validate::{ArticleDraft, CarDraft, DriverDraft, TypeDraft, ViolationDraft};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn populated_store() -> Store {
    let mut store = Store::in_memory();

    let driver = registry::add_driver(
        &mut store,
        &DriverDraft {
            first_name: Some("Иван".into()),
            last_name: Some("Иванов".into()),
            middle_name: Some("Иванович".into()),
            license_number: Some("1234567890".into()),
            birth_date: Some(date(1990, 5, 10)),
            city: Some("Санкт-Петербург".into()),
        },
    )
    .unwrap();

    let car = registry::add_car(
        &mut store,
        &CarDraft {
            brand: Some("Toyota".into()),
            model: Some("Corolla".into()),
            vin_number: Some("1HGBH41JXMN109186".into()),
            license_plate: Some("Е123ЕЕ78".into()),
            owner: Some(driver),
            last_inspection: Some(date(2024, 1, 15)),
        },
    )
    .unwrap();

    let article = registry::add_article(
        &mut store,
        &ArticleDraft {
            code: Some("12.9 p.2".into()),
            description: Some("Превышение установленной скорости".into()),
            fine: Some(500),
        },
    )
    .unwrap();

    let violation_type = registry::add_type(
        &mut store,
        &TypeDraft {
            name: Some("Превышение скорости".into()),
        },
    )
    .unwrap();

    registry::add_violation(
        &mut store,
        &ViolationDraft {
            resolution: Some("18810177170123456789".into()),
            car: Some(car),
            article: Some(article),
            violation_type: Some(violation_type),
            date: Some(date(2024, 6, 1)),
            paid: false,
        },
    )
    .unwrap();

    store
}

#[test]
fn export_then_replace_import_reproduces_all_records() {
    let source = populated_store();

    let dir = TempDir::new().unwrap();
    let doc_path = dir.path().join("export.json");
    exchange::export(&source, &doc_path).unwrap();

    let mut target = Store::in_memory();
    let report = exchange::import(&mut target, &doc_path, ImportMode::Replace).unwrap();

    assert_eq!(report.inserted, 5);
    assert_eq!(report.updated, 0);
    assert!(report.skipped.is_empty());

    let driver = target.find_driver_by_license("1234567890").unwrap();
    assert_eq!(driver.first_name, "Иван");
    assert_eq!(driver.city, "Санкт-Петербург");

    let car = target.find_car_by_plate("Е123ЕЕ78").unwrap();
    assert_eq!(car.vin_number, "1HGBH41JXMN109186");
    assert_eq!(car.owner, driver.id);

    let article = target.find_article_by_code("12.9 p.2").unwrap();
    assert_eq!(article.fine, 500);

    let violation_type = target.find_type_by_name("Превышение скорости").unwrap();

    let violation = target
        .find_violation_by_resolution("18810177170123456789")
        .unwrap();
    assert_eq!(violation.car, car.id);
    assert_eq!(violation.article, article.id);
    assert_eq!(violation.violation_type, violation_type.id);
    assert!(!violation.paid);
}

#[test]
fn round_trip_is_stable_across_two_cycles() {
    let source = populated_store();

    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    exchange::export(&source, &first).unwrap();

    let mut intermediate = Store::in_memory();
    exchange::import(&mut intermediate, &first, ImportMode::Replace).unwrap();
    exchange::export(&intermediate, &second).unwrap();

    let mut target = Store::in_memory();
    let report = exchange::import(&mut target, &second, ImportMode::Replace).unwrap();

    assert_eq!(report.inserted, 5);
    assert!(report.skipped.is_empty());
    assert_eq!(target.drivers().count(), 1);
    assert_eq!(target.cars().count(), 1);
    assert_eq!(target.violations().count(), 1);
    assert_eq!(target.articles().count(), 1);
    assert_eq!(target.types().count(), 1);
}

#[test]
fn export_document_carries_natural_key_references() {
    let source = populated_store();

    let dir = TempDir::new().unwrap();
    let doc_path = dir.path().join("export.json");
    exchange::export(&source, &doc_path).unwrap();

    let raw = std::fs::read_to_string(&doc_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(value["cars"][0]["ownerId"], "1234567890");
    assert_eq!(value["violations"][0]["violationCar"], "Е123ЕЕ78");
    assert_eq!(value["violations"][0]["violationArticleV"], "12.9 p.2");
    assert_eq!(value["violations"][0]["violationTypeV"], "Превышение скорости");
    assert!(value["exportDateTime"].is_string());
}
