// SPDX-License-Identifier: MIT
//! # Address Codecs
//!
//! Serialization layer for address book entry records: one domain model,
//! four interchangeable file formats behind the [`EntryCodec`] trait.
//!
//! ## Formats
//!
//! | Codec | Extension | Encoding |
//! |-------|-----------|----------|
//! | [`SchemaBinaryCodec`] | `.avro` | Schema-driven binary, zigzag varints, no per-record framing |
//! | [`DocumentCodec`] | `.bson` | Self-describing length-prefixed documents |
//! | [`ObfuscatedCodec`] | `.addr` | Schema-driven binary with Base64 + character-substitution strings |
//! | [`GzipJsonCodec`] | `.gz` | gzip-compressed JSON array |
//!
//! The two schema-bound codecs share an external schema artifact
//! (`schemas/entry-schema.json`); its location and the default output
//! directory come from [`CodecConfig`].
//!
//! ## Example
//!
//! ```no_run
//! use address_codecs::{CodecConfig, EntryCodec, GzipJsonCodec};
//!
//! # fn example() -> Result<(), address_codecs::CodecError> {
//! let config = CodecConfig::from_env();
//! let codec = GzipJsonCodec::new(&config);
//! let entries = codec.read_entries(std::path::Path::new("input-data.gz"))?;
//! codec.write_entries(&entries, &codec.default_output_path())?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod config;
pub mod domain;
pub mod files;

pub use codec::document::DocumentCodec;
pub use codec::gzip_json::GzipJsonCodec;
pub use codec::obfuscated::ObfuscatedCodec;
pub use codec::schema_binary::SchemaBinaryCodec;
pub use codec::{CodecError, EntryCodec};
pub use config::CodecConfig;
pub use domain::{
    compare_by_id, compare_by_last_name, Address, Entry, Gender, MaritalStatus, Person,
};
