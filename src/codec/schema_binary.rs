// SPDX-License-Identifier: MIT
//! Schema-driven binary codec (`.avro`-style)
//!
//! Records are written back-to-back with no separators or counts; the byte
//! stream is framed entirely by the shared [`RecordSchema`]. Integers are
//! zigzag varints, strings are varint length + UTF-8, nullable fields carry
//! a varint union branch (0 = null, 1 = value), and nested records are
//! inlined in schema field order.
//!
//! The reader decodes records sequentially until the buffer is exhausted. A
//! clean end at a record boundary terminates the scan; running out of bytes
//! mid-record is a decode error.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::config::CodecConfig;
use crate::domain::Entry;

use super::schema::{FieldType, RecordSchema};
use super::{CodecError, EntryCodec};

// ---------------------------------------------------------------------------
// Wire primitives
// ---------------------------------------------------------------------------

/// Append a zigzag varint
pub(crate) fn write_long(out: &mut Vec<u8>, value: i64) {
    let mut n = ((value << 1) ^ (value >> 63)) as u64;
    loop {
        if n & !0x7F == 0 {
            out.push(n as u8);
            return;
        }
        out.push(((n & 0x7F) | 0x80) as u8);
        n >>= 7;
    }
}

/// Sequential cursor over a fully-read byte buffer
pub(crate) struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// True when the cursor sits exactly at the end of the buffer
    pub(crate) fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn read_byte(&mut self) -> Result<u8, CodecError> {
        let byte = *self
            .buf
            .get(self.pos)
            .ok_or_else(|| CodecError::Decode("unexpected end of stream".to_string()))?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_exact(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| CodecError::Decode("unexpected end of stream".to_string()))?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    /// Read a zigzag varint
    pub(crate) fn read_long(&mut self) -> Result<i64, CodecError> {
        let mut n: u64 = 0;
        let mut shift: u32 = 0;
        loop {
            let byte = self.read_byte()?;
            n |= u64::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                break;
            }
            shift += 7;
            if shift >= 64 {
                return Err(CodecError::Decode("varint overflows 64 bits".to_string()));
            }
        }
        Ok(((n >> 1) as i64) ^ -((n & 1) as i64))
    }
}

// ---------------------------------------------------------------------------
// Schema walk
// ---------------------------------------------------------------------------

/// Per-string hook applied to every text value as it crosses the wire
///
/// The plain codec uses [`PlainText`]; the obfuscated codec substitutes the
/// cipher+Base64 transform without changing the wire shape.
pub(crate) trait StringTransform {
    fn encode(&self, s: &str) -> String;
    fn decode(&self, s: &str) -> Result<String, CodecError>;
}

/// Identity transform
pub(crate) struct PlainText;

impl StringTransform for PlainText {
    fn encode(&self, s: &str) -> String {
        s.to_string()
    }

    fn decode(&self, s: &str) -> Result<String, CodecError> {
        Ok(s.to_string())
    }
}

/// Encode one generic record against `schema`, appending to `out`
pub(crate) fn encode_record(
    schema: &RecordSchema,
    value: &Value,
    out: &mut Vec<u8>,
    tx: &dyn StringTransform,
) -> Result<(), CodecError> {
    let object = value.as_object().ok_or_else(|| {
        CodecError::Schema(format!("record '{}' requires an object value", schema.name))
    })?;
    for field in &schema.fields {
        let field_value = object.get(&field.name).unwrap_or(&Value::Null);
        encode_value(&field.ty, &field.name, field_value, out, tx)?;
    }
    Ok(())
}

fn encode_value(
    ty: &FieldType,
    name: &str,
    value: &Value,
    out: &mut Vec<u8>,
    tx: &dyn StringTransform,
) -> Result<(), CodecError> {
    match ty {
        FieldType::Nullable(inner) => {
            if value.is_null() {
                write_long(out, 0);
            } else {
                write_long(out, 1);
                encode_value(inner, name, value, out, tx)?;
            }
            Ok(())
        }
        FieldType::Int => {
            let n = value
                .as_i64()
                .filter(|n| i32::try_from(*n).is_ok())
                .ok_or_else(|| {
                    CodecError::Schema(format!("field '{}' requires a 32-bit integer", name))
                })?;
            write_long(out, n);
            Ok(())
        }
        FieldType::String => {
            let s = value.as_str().ok_or_else(|| {
                CodecError::Schema(format!("field '{}' requires a string", name))
            })?;
            let encoded = tx.encode(s);
            write_long(out, encoded.len() as i64);
            out.extend_from_slice(encoded.as_bytes());
            Ok(())
        }
        FieldType::Record(inner) => encode_record(inner, value, out, tx),
    }
}

/// Decode one generic record against `schema`
pub(crate) fn decode_record(
    schema: &RecordSchema,
    reader: &mut ByteReader<'_>,
    tx: &dyn StringTransform,
) -> Result<Value, CodecError> {
    let mut object = serde_json::Map::with_capacity(schema.fields.len());
    for field in &schema.fields {
        let value = decode_value(&field.ty, &field.name, reader, tx)?;
        object.insert(field.name.clone(), value);
    }
    Ok(Value::Object(object))
}

fn decode_value(
    ty: &FieldType,
    name: &str,
    reader: &mut ByteReader<'_>,
    tx: &dyn StringTransform,
) -> Result<Value, CodecError> {
    match ty {
        FieldType::Nullable(inner) => match reader.read_long()? {
            0 => Ok(Value::Null),
            1 => decode_value(inner, name, reader, tx),
            branch => Err(CodecError::Decode(format!(
                "field '{}': invalid union branch {}",
                name, branch
            ))),
        },
        FieldType::Int => {
            let n = reader.read_long()?;
            let n = i32::try_from(n).map_err(|_| {
                CodecError::Decode(format!("field '{}': value {} overflows i32", name, n))
            })?;
            Ok(Value::from(n))
        }
        FieldType::String => {
            let len = reader.read_long()?;
            let len = usize::try_from(len).map_err(|_| {
                CodecError::Decode(format!("field '{}': negative string length", name))
            })?;
            let bytes = reader.read_exact(len)?;
            let raw = std::str::from_utf8(bytes).map_err(|e| {
                CodecError::Decode(format!("field '{}': invalid UTF-8: {}", name, e))
            })?;
            Ok(Value::String(tx.decode(raw)?))
        }
        FieldType::Record(inner) => decode_record(inner, reader, tx),
    }
}

/// Serialize a full entry list through the schema walk, one record at a time
pub(crate) fn write_with_transform(
    schema: &RecordSchema,
    entries: &[Entry],
    path: &Path,
    tx: &dyn StringTransform,
) -> Result<(), CodecError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for entry in entries {
        let value = serde_json::to_value(entry)?;
        let mut buf = Vec::new();
        encode_record(schema, &value, &mut buf, tx)?;
        writer.write_all(&buf)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read records until the buffer is exhausted
pub(crate) fn read_with_transform(
    schema: &RecordSchema,
    path: &Path,
    tx: &dyn StringTransform,
) -> Result<Vec<Entry>, CodecError> {
    let data = std::fs::read(path)?;
    let mut reader = ByteReader::new(&data);
    let mut entries = Vec::new();
    while !reader.is_empty() {
        let value = decode_record(schema, &mut reader, tx)?;
        let entry: Entry = serde_json::from_value(value)
            .map_err(|e| CodecError::Decode(format!("cannot map record to entry: {}", e)))?;
        entries.push(entry);
    }
    Ok(entries)
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// The plain schema-driven binary codec
pub struct SchemaBinaryCodec {
    schema: RecordSchema,
    out_dir: PathBuf,
}

impl SchemaBinaryCodec {
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

impl EntryCodec for SchemaBinaryCodec {
    fn name(&self) -> &'static str {
        "avro"
    }

    fn extension(&self) -> &'static str {
        "avro"
    }

    fn output_dir(&self) -> &Path {
        &self.out_dir
    }

    fn write_entries(&self, entries: &[Entry], path: &Path) -> Result<(), CodecError> {
        debug!("writing {} entries to {}", entries.len(), path.display());
        write_with_transform(&self.schema, entries, path, &PlainText)?;
        info!(
            "wrote {} entries to avro binary file: {}",
            entries.len(),
            path.display()
        );
        Ok(())
    }

    fn read_entries(&self, path: &Path) -> Result<Vec<Entry>, CodecError> {
        let entries = read_with_transform(&self.schema, path, &PlainText)?;
        info!(
            "read {} entries from avro binary file: {}",
            entries.len(),
            path.display()
        );
        Ok(entries)
    }
}
