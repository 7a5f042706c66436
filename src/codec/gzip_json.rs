// SPDX-License-Identifier: MIT
//! Compressed text codec (`.gz`): a gzip-wrapped JSON array
//!
//! The entire entry list is serialized as one JSON array and streamed
//! through gzip. Field names use camelCase and enum values their uppercase
//! names, so a decompressed file is ordinary readable JSON.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::{debug, info};

use crate::config::CodecConfig;
use crate::domain::Entry;

use super::{CodecError, EntryCodec};

/// The compressed JSON text codec
pub struct GzipJsonCodec {
    out_dir: PathBuf,
}

impl GzipJsonCodec {
    pub fn new(config: &CodecConfig) -> Self {
        Self {
            out_dir: config.data_dir.clone(),
        }
    }
}

impl EntryCodec for GzipJsonCodec {
    fn name(&self) -> &'static str {
        "gzip"
    }

    fn extension(&self) -> &'static str {
        "gz"
    }

    fn output_dir(&self) -> &Path {
        &self.out_dir
    }

    fn write_entries(&self, entries: &[Entry], path: &Path) -> Result<(), CodecError> {
        debug!("writing {} entries to {}", entries.len(), path.display());
        let file = File::create(path)?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        serde_json::to_writer(&mut encoder, entries)?;
        encoder.finish()?;
        info!(
            "wrote {} entries to gzip JSON file: {}",
            entries.len(),
            path.display()
        );
        Ok(())
    }

    fn read_entries(&self, path: &Path) -> Result<Vec<Entry>, CodecError> {
        let file = File::open(path)?;
        let mut text = String::new();
        GzDecoder::new(file).read_to_string(&mut text)?;

        // An empty stream or a JSON null both mean no entries
        let entries = if text.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str::<Option<Vec<Entry>>>(&text)?.unwrap_or_default()
        };
        info!(
            "read {} entries from gzip JSON file: {}",
            entries.len(),
            path.display()
        );
        Ok(entries)
    }
}
