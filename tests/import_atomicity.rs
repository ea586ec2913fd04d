//! Import atomicity tests
//!
//! An import is all-or-nothing: when the batch cannot be committed, the
//! in-memory store must be left exactly as it was before the import began.

use chrono::NaiveDate;
use serde_json::json;
use tempfile::TempDir;

use roadbase::exchange::{self, ExchangeError, ImportMode};
use roadbase::registry;
use roadbase::store::Store;
use roadbase::validate::DriverDraft;

#[test]
fn failed_commit_rolls_back_the_whole_batch() {
    let data_dir = TempDir::new().unwrap();
    let state_dir = data_dir.path().join("state");
    std::fs::create_dir(&state_dir).unwrap();

    let mut store = Store::create(state_dir.join("roadbase.data")).unwrap();
    registry::add_driver(
        &mut store,
        &DriverDraft {
            first_name: Some("Петр".into()),
            last_name: Some("Петров".into()),
            middle_name: None,
            license_number: Some("1111111111".into()),
            birth_date: NaiveDate::from_ymd_opt(1985, 3, 2),
            city: Some("Москва".into()),
        },
    )
    .unwrap();

    let doc_dir = TempDir::new().unwrap();
    let doc_path = doc_dir.path().join("doc.json");
    std::fs::write(
        &doc_path,
        json!({
            "drivers": [{
                "firstName": "Иван",
                "lastName": "Иванов",
                "licenseNumber": "2222222222",
                "birthDate": "1990-05-10",
                "city": "Казань",
            }],
        })
        .to_string(),
    )
    .unwrap();

    // Commit cannot write its temp file once the state directory is gone.
    std::fs::remove_dir_all(&state_dir).unwrap();

    let result = exchange::import(&mut store, &doc_path, ImportMode::Upsert);
    assert!(matches!(result, Err(ExchangeError::Store(_))));

    // The batch had already been applied in memory; the failed commit must
    // have undone it.
    assert_eq!(store.drivers().count(), 1);
    assert!(store.find_driver_by_license("1111111111").is_some());
    assert!(store.find_driver_by_license("2222222222").is_none());
}

#[test]
fn successful_import_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let data_path = dir.path().join("roadbase.data");

    let mut store = Store::create(&data_path).unwrap();

    let doc_path = dir.path().join("doc.json");
    std::fs::write(
        &doc_path,
        json!({
            "drivers": [{
                "firstName": "Иван",
                "lastName": "Иванов",
                "licenseNumber": "1234567890",
                "birthDate": "1990-05-10",
                "city": "Москва",
            }],
        })
        .to_string(),
    )
    .unwrap();

    exchange::import(&mut store, &doc_path, ImportMode::Replace).unwrap();
    drop(store);

    let reopened = Store::open(&data_path).unwrap();
    assert!(reopened.find_driver_by_license("1234567890").is_some());
}

#[test]
fn unreadable_document_leaves_the_store_untouched() {
    let dir = TempDir::new().unwrap();
    let mut store = Store::in_memory();

    let result = exchange::import(
        &mut store,
        &dir.path().join("missing.json"),
        ImportMode::Replace,
    );

    assert!(matches!(result, Err(ExchangeError::Document(_))));
    assert!(store.is_empty());
}
