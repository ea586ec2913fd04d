//! Document reading.
//!
//! After the JSON parse, records lacking their required natural key are
//! dropped here with a warning: one bad record must not block the rest of
//! a large import, and downstream code can rely on every surviving record
//! carrying its key.

use std::fs;
use std::path::Path;

use tracing::warn;

use super::errors::{DocumentError, DocumentResult};
use super::types::ExchangeDocument;

pub fn read_document(path: &Path) -> DocumentResult<ExchangeDocument> {
    let content = fs::read_to_string(path).map_err(|e| DocumentError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut doc: ExchangeDocument = serde_json::from_str(&content)?;
    drop_keyless_records(&mut doc);
    Ok(doc)
}

fn drop_keyless_records(doc: &mut ExchangeDocument) {
    doc.drivers.retain(|r| {
        let keep = r.license_number.is_some();
        if !keep {
            warn!("driver record has no license number; skipping");
        }
        keep
    });
    doc.cars.retain(|r| {
        let keep = r.vin_number.is_some();
        if !keep {
            warn!("car record has no VIN; skipping");
        }
        keep
    });
    doc.violations.retain(|r| {
        let keep = r.violation_resolution.is_some();
        if !keep {
            warn!("violation record has no resolution number; skipping");
        }
        keep
    });
    doc.violation_articles.retain(|r| {
        let keep = r.violation_article_code.is_some();
        if !keep {
            warn!("violation article record has no code; skipping");
        }
        keep
    });
    doc.violation_types.retain(|r| {
        let keep = r.violation_type_name.is_some();
        if !keep {
            warn!("violation type record has no name; skipping");
        }
        keep
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn keyless_records_are_dropped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(
            &path,
            r#"{
                "drivers": [
                    { "firstName": "Иван" },
                    { "licenseNumber": "1234567890" }
                ],
                "violationTypes": [ { "id": "x" } ]
            }"#,
        )
        .unwrap();

        let doc = read_document(&path).unwrap();
        assert_eq!(doc.drivers.len(), 1);
        assert!(doc.violation_types.is_empty());
    }

    #[test]
    fn unreadable_json_is_a_document_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "<data/>").unwrap();

        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Malformed(_)));
    }

    #[test]
    fn missing_file_is_a_document_error() {
        let dir = TempDir::new().unwrap();
        let err = read_document(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }
}
