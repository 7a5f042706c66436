// SPDX-License-Identifier: MIT
//! Plain-file helpers used by callers and the conformance tests
//!
//! Thin wrappers over `std::fs` that keep JSON handling and logging in one
//! place. None of these retry; a failed operation surfaces immediately.

use std::path::Path;

use tracing::{debug, warn};

use crate::codec::CodecError;
use crate::domain::Entry;

/// Write `entries` as pretty-printed JSON
pub fn write_json(entries: &[Entry], path: &Path) -> Result<(), CodecError> {
    let text = serde_json::to_string_pretty(entries)?;
    std::fs::write(path, text)?;
    debug!("wrote {} entries as JSON to {}", entries.len(), path.display());
    Ok(())
}

/// Read a JSON array of entries
pub fn read_json(path: &Path) -> Result<Vec<Entry>, CodecError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Copy `from` to `to`, replacing any existing file
pub fn copy(from: &Path, to: &Path) -> Result<u64, CodecError> {
    let bytes = std::fs::copy(from, to)?;
    debug!("copied {} bytes: {} -> {}", bytes, from.display(), to.display());
    Ok(bytes)
}

/// Delete `path` if present; returns whether a file was removed
pub fn delete(path: &Path) -> bool {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!("deleted {}", path.display());
            true
        }
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("could not delete {}: {}", path.display(), e);
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, Person};

    fn entries() -> Vec<Entry> {
        vec![Entry::new(
            1,
            Person::new(Some("Jo".to_string()), None, Some(40), None, None),
            Address::new(None, Some("Ada".to_string()), None, None, None, None),
            None,
        )]
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");
        write_json(&entries(), &path).unwrap();
        assert_eq!(read_json(&path).unwrap(), entries());
    }

    #[test]
    fn test_copy_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.json");
        let dst = dir.path().join("dst.json");
        write_json(&entries(), &src).unwrap();
        copy(&src, &dst).unwrap();
        assert_eq!(read_json(&dst).unwrap(), entries());
    }

    #[test]
    fn test_delete_reports_presence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.json");
        write_json(&entries(), &path).unwrap();
        assert!(delete(&path));
        assert!(!delete(&path));
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_json(&dir.path().join("nope.json")),
            Err(CodecError::Io(_))
        ));
    }
}
