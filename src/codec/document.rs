// SPDX-License-Identifier: MIT
//! Self-describing document codec (`.bson`-style)
//!
//! Each record becomes one independent binary document carrying its own
//! total byte length, and a file is just the documents concatenated:
//!
//! ```text
//! document := [ total_size: u32 LE ] [ element... ] [ 0x00 ]
//! element  := [ tag: u8 ] [ key: cstring ] [ value ]
//! ```
//!
//! `total_size` counts the whole document including the 4-byte prefix and
//! the terminator. Tags: `0x02` string (u32 LE length + UTF-8), `0x03`
//! embedded document, `0x0A` explicit null, `0x10` int32 LE. Field names
//! travel with their values, so no external schema is needed, and a null
//! string is distinguishable from an absent key.
//!
//! The read scan tolerates trailing garbage: an invalid length prefix ends
//! the scan with a warning instead of failing, returning every document
//! decoded before that point.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, info, warn};

use crate::config::CodecConfig;
use crate::domain::{Address, Entry, Gender, MaritalStatus, Person};

use super::{CodecError, EntryCodec};

const TAG_STRING: u8 = 0x02;
const TAG_DOCUMENT: u8 = 0x03;
const TAG_NULL: u8 = 0x0A;
const TAG_INT32: u8 = 0x10;

/// Size prefix plus terminator: the smallest well-formed document
const MIN_DOCUMENT_SIZE: usize = 5;

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

fn write_key(buf: &mut Vec<u8>, tag: u8, key: &str) {
    buf.push(tag);
    buf.extend_from_slice(key.as_bytes());
    buf.push(0);
}

fn put_string(buf: &mut Vec<u8>, key: &str, value: Option<&str>) {
    match value {
        Some(s) => {
            write_key(buf, TAG_STRING, key);
            buf.extend_from_slice(&(s.len() as u32).to_le_bytes());
            buf.extend_from_slice(s.as_bytes());
        }
        None => write_key(buf, TAG_NULL, key),
    }
}

fn put_int32(buf: &mut Vec<u8>, key: &str, value: i32) {
    write_key(buf, TAG_INT32, key);
    buf.extend_from_slice(&value.to_le_bytes());
}

fn put_document(buf: &mut Vec<u8>, key: &str, document: &[u8]) {
    write_key(buf, TAG_DOCUMENT, key);
    buf.extend_from_slice(document);
}

/// Wrap raw elements with the size prefix and terminator
fn seal(elements: &[u8]) -> Vec<u8> {
    let size = elements.len() + MIN_DOCUMENT_SIZE;
    let mut doc = Vec::with_capacity(size);
    doc.extend_from_slice(&(size as u32).to_le_bytes());
    doc.extend_from_slice(elements);
    doc.push(0);
    doc
}

/// Encode one entry as a sealed document
///
/// `entry_id` and `age` are stored as required int32s in this format, so an
/// absent age is rejected here rather than producing a document no reader
/// can map back.
fn encode_document(entry: &Entry) -> Result<Vec<u8>, CodecError> {
    let age = entry
        .person
        .age
        .ok_or(CodecError::MissingField("person.age"))?;

    let mut person = Vec::new();
    put_string(&mut person, "firstName", entry.person.first_name.as_deref());
    put_string(&mut person, "lastName", entry.person.last_name.as_deref());
    put_int32(&mut person, "age", age);
    put_string(&mut person, "gender", entry.person.gender.map(|g| g.as_str()));
    put_string(
        &mut person,
        "maritalStatus",
        entry.person.marital_status.map(|m| m.as_str()),
    );

    let mut address = Vec::new();
    put_string(&mut address, "street", entry.address.street.as_deref());
    put_string(&mut address, "city", entry.address.city.as_deref());
    put_string(&mut address, "state", entry.address.state.as_deref());
    put_string(&mut address, "zip", entry.address.zip.as_deref());
    put_string(&mut address, "email", entry.address.email.as_deref());
    put_string(&mut address, "phone", entry.address.phone.as_deref());

    let mut root = Vec::new();
    put_int32(&mut root, "entryId", entry.entry_id);
    put_string(&mut root, "notes", entry.notes.as_deref());
    put_document(&mut root, "person", &seal(&person));
    put_document(&mut root, "address", &seal(&address));

    Ok(seal(&root))
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Element {
    Str(String),
    Null,
    Int32(i32),
    Doc(BTreeMap<String, Element>),
}

fn take<'a>(bytes: &'a [u8], pos: usize, len: usize) -> Result<&'a [u8], CodecError> {
    pos.checked_add(len)
        .filter(|&end| end <= bytes.len())
        .map(|end| &bytes[pos..end])
        .ok_or_else(|| CodecError::Decode("document truncated".to_string()))
}

/// Parse one sealed document occupying exactly `bytes`
fn parse_document(bytes: &[u8]) -> Result<BTreeMap<String, Element>, CodecError> {
    if bytes.len() < MIN_DOCUMENT_SIZE {
        return Err(CodecError::Decode("document too short".to_string()));
    }
    let size = u32::from_le_bytes(bytes[0..4].try_into().expect("4-byte slice")) as usize;
    if size != bytes.len() {
        return Err(CodecError::Decode(format!(
            "document size {} does not match slice length {}",
            size,
            bytes.len()
        )));
    }
    if bytes[bytes.len() - 1] != 0 {
        return Err(CodecError::Decode("document not terminated".to_string()));
    }

    let end = bytes.len() - 1;
    let mut pos = 4;
    let mut elements = BTreeMap::new();
    while pos < end {
        let tag = bytes[pos];
        pos += 1;

        let nul = bytes[pos..end]
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| CodecError::Decode("unterminated element key".to_string()))?;
        let key = std::str::from_utf8(&bytes[pos..pos + nul])
            .map_err(|e| CodecError::Decode(format!("invalid UTF-8 in key: {}", e)))?
            .to_string();
        pos += nul + 1;

        let element = match tag {
            TAG_STRING => {
                let len_bytes = take(bytes, pos, 4)?;
                let len = u32::from_le_bytes(len_bytes.try_into().expect("4-byte slice")) as usize;
                pos += 4;
                let data = take(bytes, pos, len)?;
                pos += len;
                let s = std::str::from_utf8(data).map_err(|e| {
                    CodecError::Decode(format!("field '{}': invalid UTF-8: {}", key, e))
                })?;
                Element::Str(s.to_string())
            }
            TAG_NULL => Element::Null,
            TAG_INT32 => {
                let data = take(bytes, pos, 4)?;
                pos += 4;
                Element::Int32(i32::from_le_bytes(data.try_into().expect("4-byte slice")))
            }
            TAG_DOCUMENT => {
                let size_bytes = take(bytes, pos, 4)?;
                let sub_size =
                    u32::from_le_bytes(size_bytes.try_into().expect("4-byte slice")) as usize;
                if sub_size < MIN_DOCUMENT_SIZE {
                    return Err(CodecError::Decode(format!(
                        "embedded document size {} too small",
                        sub_size
                    )));
                }
                let sub = take(bytes, pos, sub_size)?;
                pos += sub_size;
                Element::Doc(parse_document(sub)?)
            }
            other => {
                return Err(CodecError::Decode(format!(
                    "unknown element tag 0x{:02X} for field '{}'",
                    other, key
                )))
            }
        };
        elements.insert(key, element);
    }
    Ok(elements)
}

fn get_string(
    doc: &BTreeMap<String, Element>,
    key: &str,
) -> Result<Option<String>, CodecError> {
    match doc.get(key) {
        Some(Element::Str(s)) => Ok(Some(s.clone())),
        Some(Element::Null) | None => Ok(None),
        Some(_) => Err(CodecError::Decode(format!(
            "field '{}' has unexpected type",
            key
        ))),
    }
}

fn get_int32(
    doc: &BTreeMap<String, Element>,
    key: &str,
    label: &'static str,
) -> Result<i32, CodecError> {
    match doc.get(key) {
        Some(Element::Int32(v)) => Ok(*v),
        Some(Element::Null) | None => Err(CodecError::MissingField(label)),
        Some(_) => Err(CodecError::Decode(format!(
            "field '{}' has unexpected type",
            key
        ))),
    }
}

fn get_document<'a>(
    doc: &'a BTreeMap<String, Element>,
    key: &str,
    label: &'static str,
) -> Result<&'a BTreeMap<String, Element>, CodecError> {
    match doc.get(key) {
        Some(Element::Doc(d)) => Ok(d),
        _ => Err(CodecError::MissingField(label)),
    }
}

/// Map a parsed document to an entry
///
/// Unknown keys are ignored; the format is self-describing, so names are
/// authoritative. An empty enum string decodes as unset; a non-empty unknown
/// name is a decode error.
fn document_to_entry(doc: &BTreeMap<String, Element>) -> Result<Entry, CodecError> {
    let person_doc = get_document(doc, "person", "person")?;
    let gender = match get_string(person_doc, "gender")? {
        Some(s) if s.is_empty() => None,
        Some(s) => Some(Gender::from_str(&s).map_err(CodecError::Decode)?),
        None => None,
    };
    let marital_status = match get_string(person_doc, "maritalStatus")? {
        Some(s) if s.is_empty() => None,
        Some(s) => Some(MaritalStatus::from_str(&s).map_err(CodecError::Decode)?),
        None => None,
    };
    let person = Person::new(
        get_string(person_doc, "firstName")?,
        get_string(person_doc, "lastName")?,
        Some(get_int32(person_doc, "age", "person.age")?),
        gender,
        marital_status,
    );

    let address_doc = get_document(doc, "address", "address")?;
    let address = Address::new(
        get_string(address_doc, "street")?,
        get_string(address_doc, "city")?,
        get_string(address_doc, "state")?,
        get_string(address_doc, "zip")?,
        get_string(address_doc, "email")?,
        get_string(address_doc, "phone")?,
    );

    Ok(Entry::new(
        get_int32(doc, "entryId", "entryId")?,
        person,
        address,
        get_string(doc, "notes")?,
    ))
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// The self-describing document codec
pub struct DocumentCodec {
    out_dir: PathBuf,
}

impl DocumentCodec {
    pub fn new(config: &CodecConfig) -> Self {
        Self {
            out_dir: config.data_dir.clone(),
        }
    }
}

impl EntryCodec for DocumentCodec {
    fn name(&self) -> &'static str {
        "bson"
    }

    fn extension(&self) -> &'static str {
        "bson"
    }

    fn output_dir(&self) -> &Path {
        &self.out_dir
    }

    fn write_entries(&self, entries: &[Entry], path: &Path) -> Result<(), CodecError> {
        debug!("writing {} entries to {}", entries.len(), path.display());
        let mut file = File::create(path)?;
        for entry in entries {
            let document = encode_document(entry)?;
            file.write_all(&document)?;
        }
        info!(
            "wrote {} entries to bson binary file: {}",
            entries.len(),
            path.display()
        );
        Ok(())
    }

    fn read_entries(&self, path: &Path) -> Result<Vec<Entry>, CodecError> {
        let buffer = std::fs::read(path)?;
        let mut entries = Vec::new();
        let mut offset = 0usize;

        while buffer.len() - offset >= 4 {
            let size =
                u32::from_le_bytes(buffer[offset..offset + 4].try_into().expect("4-byte slice"))
                    as usize;
            if size == 0 || offset + size > buffer.len() {
                // Trailing garbage: stop scanning, keep what decoded cleanly
                warn!("invalid document size {} at offset {}", size, offset);
                break;
            }
            let document = parse_document(&buffer[offset..offset + size])?;
            entries.push(document_to_entry(&document)?);
            offset += size;
        }

        info!(
            "read {} entries from bson binary file: {}",
            entries.len(),
            path.display()
        );
        Ok(entries)
    }
}
