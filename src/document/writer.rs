//! Document writing.
//!
//! Same atomic discipline as the state file: write to a temp file beside
//! the target, fsync, rename. A failed export never leaves a truncated
//! document at the destination.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use super::errors::{DocumentError, DocumentResult};
use super::types::ExchangeDocument;

pub fn write_document(path: &Path, doc: &ExchangeDocument) -> DocumentResult<()> {
    let body = serde_json::to_string_pretty(doc)?;

    let tmp_path = path.with_extension("tmp");
    {
        let mut tmp = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_path)
            .map_err(|e| DocumentError::Write {
                path: tmp_path.clone(),
                source: e,
            })?;
        tmp.write_all(body.as_bytes())
            .map_err(|e| DocumentError::Write {
                path: tmp_path.clone(),
                source: e,
            })?;
        tmp.sync_all().map_err(|e| DocumentError::Write {
            path: tmp_path.clone(),
            source: e,
        })?;
    }

    fs::rename(&tmp_path, path).map_err(|e| DocumentError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::read_document;
    use tempfile::TempDir;

    #[test]
    fn written_document_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.json");

        let doc = ExchangeDocument {
            export_date_time: Some("2026-08-29T12:00:00Z".into()),
            ..ExchangeDocument::default()
        };
        write_document(&path, &doc).unwrap();

        let loaded = read_document(&path).unwrap();
        assert_eq!(
            loaded.export_date_time.as_deref(),
            Some("2026-08-29T12:00:00Z")
        );
    }
}
