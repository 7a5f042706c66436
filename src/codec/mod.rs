// SPDX-License-Identifier: MIT
//! The codec family: four interchangeable file formats for entry records
//!
//! Every codec implements [`EntryCodec`], so callers (and the conformance
//! tests) can treat them as one contract: `write_entries` serializes a list
//! to a path, `read_entries` restores it, and `write_string` parses a JSON
//! array before touching any file and then writes to the codec-default
//! output path.

pub mod cipher;
pub mod document;
pub mod gzip_json;
pub mod obfuscated;
pub mod schema;
pub mod schema_binary;

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::Entry;

/// Errors raised by the codec family
///
/// Low-level I/O and JSON failures keep their original cause attached; no
/// operation is retried.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Schema artifact missing or malformed; raised at codec construction
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Corrupt or unmappable data encountered while decoding
    #[error("Decode error: {0}")]
    Decode(String),

    /// A field the format requires was absent or null
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Shared contract for serializing and deserializing entry records
///
/// Implementations are synchronous, stateless across calls, and neither
/// retain nor mutate the records passed to `write_entries`. Concurrent calls
/// against different paths are independent; calls against the same path must
/// be serialized by the caller.
pub trait EntryCodec {
    /// Short format name used in log output
    fn name(&self) -> &'static str;

    /// File extension for this format, without the dot
    fn extension(&self) -> &'static str;

    /// Directory that codec-default output files are written to
    fn output_dir(&self) -> &Path;

    /// Serialize `entries` to `path`, replacing any existing file
    fn write_entries(&self, entries: &[Entry], path: &Path) -> Result<(), CodecError>;

    /// Read all records from `path`
    ///
    /// Fails with [`CodecError::Io`] if the path cannot be opened; an empty
    /// file yields an empty list.
    fn read_entries(&self, path: &Path) -> Result<Vec<Entry>, CodecError>;

    /// Default output path: `<output_dir>/output-data.<extension>`
    fn default_output_path(&self) -> PathBuf {
        self.output_dir()
            .join(format!("output-data.{}", self.extension()))
    }

    /// Default input path: `<output_dir>/input-data.<extension>`
    fn default_input_path(&self) -> PathBuf {
        self.output_dir()
            .join(format!("input-data.{}", self.extension()))
    }

    /// Parse `json` as an array of entries, then write to the default path
    ///
    /// Malformed JSON surfaces before any file I/O begins. Returns the path
    /// written.
    fn write_string(&self, json: &str) -> Result<PathBuf, CodecError> {
        debug!("writing JSON string to {} format", self.name());
        let entries: Vec<Entry> = serde_json::from_str(json)?;
        if entries.is_empty() {
            warn!("no entries found in JSON string");
        }
        let path = self.default_output_path();
        self.write_entries(&entries, &path)?;
        Ok(path)
    }
}
