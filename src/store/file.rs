//! State file reading and writing.
//!
//! On-disk layout:
//!
//! ```text
//! crc32 <8 hex digits>\n
//! <JSON body>
//! ```
//!
//! The checksum covers the JSON body byte-for-byte. A mismatch on load is an
//! explicit corruption error. Writes go to a temp file in the same directory,
//! are fsynced, then renamed over the target so a crash mid-write never
//! leaves a half-written state file behind.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use super::errors::{StoreError, StoreResult};
use super::state::StoreState;

const CHECKSUM_PREFIX: &str = "crc32 ";

/// Computes the CRC32 checksum of the JSON body.
fn compute_checksum(body: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(body);
    hasher.finalize()
}

pub fn load(path: &Path) -> StoreResult<StoreState> {
    let content = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;

    let (header, body) = content
        .split_once('\n')
        .ok_or_else(|| StoreError::corruption(path, "missing checksum header"))?;

    let stored = header
        .strip_prefix(CHECKSUM_PREFIX)
        .and_then(|hex| u32::from_str_radix(hex.trim(), 16).ok())
        .ok_or_else(|| StoreError::corruption(path, "malformed checksum header"))?;

    let actual = compute_checksum(body.as_bytes());
    if stored != actual {
        return Err(StoreError::corruption(
            path,
            format!("checksum mismatch: stored {:08x}, computed {:08x}", stored, actual),
        ));
    }

    Ok(serde_json::from_str(body)?)
}

pub fn save(path: &Path, state: &StoreState) -> StoreResult<()> {
    let body = serde_json::to_string_pretty(state)?;
    let checksum = compute_checksum(body.as_bytes());
    let content = format!("{}{:08x}\n{}", CHECKSUM_PREFIX, checksum, body);

    let tmp_path = path.with_extension("tmp");
    {
        let mut tmp = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_path)
            .map_err(|e| StoreError::io(&tmp_path, e))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| StoreError::io(&tmp_path, e))?;
        tmp.sync_all().map_err(|e| StoreError::io(&tmp_path, e))?;
    }

    fs::rename(&tmp_path, path).map_err(|e| StoreError::io(path, e))?;

    // fsync the directory so the rename itself is durable.
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            let dir = File::open(parent).map_err(|e| StoreError::io(parent, e))?;
            dir.sync_all().map_err(|e| StoreError::io(parent, e))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        let state = StoreState::default();
        save(&path, &state).unwrap();
        let loaded = load(&path).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn corrupted_body_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        save(&path, &StoreState::default()).unwrap();
        let mut content = fs::read_to_string(&path).unwrap();
        content.push_str(" tampered");
        fs::write(&path, content).unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Corruption { .. }));
    }

    #[test]
    fn missing_header_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{}").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Corruption { .. }));
    }
}
