// SPDX-License-Identifier: MIT
//! Obfuscated schema-driven binary codec (`.addr`)
//!
//! Identical wire shape to the plain schema binary codec, but every string
//! value, including enum names, is Base64-encoded and then run through the
//! character substitution before the length prefix is computed. Numbers and
//! union branch markers are untouched, so a plain reader given the same
//! schema still frames the stream correctly; it just sees scrambled text.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::{debug, info};

use crate::config::CodecConfig;
use crate::domain::Entry;

use super::cipher;
use super::schema::RecordSchema;
use super::schema_binary::{read_with_transform, write_with_transform, StringTransform};
use super::{CodecError, EntryCodec};

/// Base64 followed by the character substitution
///
/// The substitution stays inside the Base64 alphabet (plus the `=` pad, which
/// maps to `?`), so the obfuscated text is still plain ASCII on the wire.
pub(crate) struct ObfuscatingTransform;

impl StringTransform for ObfuscatingTransform {
    fn encode(&self, s: &str) -> String {
        cipher::obfuscate(&BASE64.encode(s))
    }

    fn decode(&self, s: &str) -> Result<String, CodecError> {
        let bytes = BASE64
            .decode(cipher::clarify(s))
            .map_err(|e| CodecError::Decode(format!("invalid Base64 payload: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| CodecError::Decode(format!("invalid UTF-8 after decoding: {}", e)))
    }
}

/// The obfuscated schema-driven binary codec
pub struct ObfuscatedCodec {
    schema: RecordSchema,
    out_dir: PathBuf,
}

impl ObfuscatedCodec {
    /// Load the schema artifact named by `config`; missing schema is fatal
    pub fn new(config: &CodecConfig) -> Result<Self, CodecError> {
        Ok(Self::with_schema(
            RecordSchema::load(&config.schema_path)?,
            config.data_dir.clone(),
        ))
    }

    /// Construct from an already-parsed schema
    pub fn with_schema(schema: RecordSchema, out_dir: PathBuf) -> Self {
        Self { schema, out_dir }
    }
}

impl EntryCodec for ObfuscatedCodec {
    fn name(&self) -> &'static str {
        "encoded"
    }

    fn extension(&self) -> &'static str {
        "addr"
    }

    fn output_dir(&self) -> &Path {
        &self.out_dir
    }

    fn write_entries(&self, entries: &[Entry], path: &Path) -> Result<(), CodecError> {
        debug!("writing {} entries to {}", entries.len(), path.display());
        write_with_transform(&self.schema, entries, path, &ObfuscatingTransform)?;
        info!(
            "wrote {} entries to encoded binary file: {}",
            entries.len(),
            path.display()
        );
        Ok(())
    }

    fn read_entries(&self, path: &Path) -> Result<Vec<Entry>, CodecError> {
        let entries = read_with_transform(&self.schema, path, &ObfuscatingTransform)?;
        info!(
            "read {} entries from encoded binary file: {}",
            entries.len(),
            path.display()
        );
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, Gender, MaritalStatus, Person};

    const ENTRY_SCHEMA: &str = include_str!("../../schemas/entry-schema.json");

    fn codec(dir: &Path) -> ObfuscatedCodec {
        ObfuscatedCodec::with_schema(
            RecordSchema::parse(ENTRY_SCHEMA).unwrap(),
            dir.to_path_buf(),
        )
    }

    fn entry() -> Entry {
        Entry::new(
            1,
            Person::new(
                Some("Jo".to_string()),
                Some("Lee".to_string()),
                Some(40),
                Some(Gender::Female),
                Some(MaritalStatus::Married),
            ),
            Address::new(
                Some("1 Elm".to_string()),
                Some("Ada".to_string()),
                Some("OH".to_string()),
                Some("45810".to_string()),
                Some("jo@x.com".to_string()),
                Some("5551234".to_string()),
            ),
            Some("likes=chess?".to_string()),
        )
    }

    #[test]
    fn test_transform_round_trip() {
        let tx = ObfuscatingTransform;
        for s in ["", "Jo", "jo@x.com", "key=value?", "ünïcödé 🙂"] {
            let encoded = tx.encode(s);
            assert_eq!(tx.decode(&encoded).unwrap(), s);
            if !s.is_empty() {
                assert_ne!(encoded, s);
            }
        }
    }

    #[test]
    fn test_transform_output_is_ascii() {
        let tx = ObfuscatingTransform;
        assert!(tx.encode("ünïcödé 日本語").is_ascii());
    }

    #[test]
    fn test_corrupt_payload_is_decode_error() {
        let tx = ObfuscatingTransform;
        assert!(matches!(
            tx.decode("!!!not-base64!!!"),
            Err(CodecError::Decode(_))
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let codec = codec(dir.path());
        let path = dir.path().join("entries.addr");
        let entries = vec![
            entry(),
            Entry::new(
                2,
                Person::new(None, None, None, None, None),
                Address::new(None, None, None, None, None, None),
                None,
            ),
        ];

        codec.write_entries(&entries, &path).unwrap();
        assert_eq!(codec.read_entries(&path).unwrap(), entries);
    }

    #[test]
    fn test_plaintext_absent_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let codec = codec(dir.path());
        let path = dir.path().join("scrambled.addr");

        codec.write_entries(&[entry()], &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        let haystack = String::from_utf8_lossy(&bytes);
        for plain in ["Jo", "Lee", "jo@x.com", "FEMALE", "MARRIED"] {
            assert!(!haystack.contains(plain), "found plaintext '{}'", plain);
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let codec = codec(dir.path());
        assert!(matches!(
            codec.read_entries(&dir.path().join("nope.addr")),
            Err(CodecError::Io(_))
        ));
    }
}
