// SPDX-License-Identifier: MIT
//! External field schema for the schema-bound binary codecs
//!
//! The schema artifact is an Avro-style JSON record definition: ordered
//! fields, `["null", T]` unions for nullable fields, and nested records for
//! `person` and `address`. It is loaded and validated once when a codec is
//! constructed and read-only thereafter, so a parsed schema is safe to share
//! across codec instances without locking.

use std::path::Path;

use serde_json::Value;

use super::CodecError;

/// One field of a record: name plus wire type, in declared order
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: FieldType,
}

/// Wire types supported by the schema grammar
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// 32-bit integer, zigzag varint encoded
    Int,
    /// UTF-8 text, varint length prefixed
    String,
    /// Nested record, fields inline in declared order
    Record(RecordSchema),
    /// Union `["null", T]`: varint branch index then the value
    Nullable(Box<FieldType>),
}

/// A parsed record schema: the framing contract both writer and reader obey
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    pub name: String,
    pub fields: Vec<Field>,
}

impl RecordSchema {
    /// Load and parse the schema artifact at `path`
    ///
    /// A missing or malformed artifact is a fatal configuration error, not
    /// an I/O error: schema-bound codecs cannot operate without it.
    pub fn load(path: &Path) -> Result<Self, CodecError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CodecError::Schema(format!("Schema file not found: {}: {}", path.display(), e))
        })?;
        Self::parse(&text)
            .map_err(|e| CodecError::Schema(format!("{}: {}", path.display(), schema_cause(&e))))
    }

    /// Parse a schema definition from JSON text
    pub fn parse(text: &str) -> Result<Self, CodecError> {
        let root: Value = serde_json::from_str(text)
            .map_err(|e| CodecError::Schema(format!("invalid schema JSON: {}", e)))?;
        match parse_type(&root)? {
            FieldType::Record(schema) => {
                if schema.fields.is_empty() {
                    return Err(CodecError::Schema(format!(
                        "record '{}' declares no fields",
                        schema.name
                    )));
                }
                Ok(schema)
            }
            _ => Err(CodecError::Schema(
                "top-level schema must be a record".to_string(),
            )),
        }
    }
}

fn schema_cause(err: &CodecError) -> String {
    match err {
        CodecError::Schema(msg) => msg.clone(),
        other => other.to_string(),
    }
}

fn parse_type(value: &Value) -> Result<FieldType, CodecError> {
    match value {
        Value::String(name) => match name.as_str() {
            "int" => Ok(FieldType::Int),
            "string" => Ok(FieldType::String),
            other => Err(CodecError::Schema(format!("unsupported type '{}'", other))),
        },
        // A union is nullable iff it is exactly ["null", T]
        Value::Array(branches) => {
            if branches.len() == 2 && branches[0] == Value::String("null".to_string()) {
                Ok(FieldType::Nullable(Box::new(parse_type(&branches[1])?)))
            } else {
                Err(CodecError::Schema(
                    "only [\"null\", T] unions are supported".to_string(),
                ))
            }
        }
        Value::Object(obj) => {
            let kind = obj.get("type").and_then(Value::as_str).unwrap_or_default();
            if kind != "record" {
                return Err(CodecError::Schema(format!(
                    "unsupported complex type '{}'",
                    kind
                )));
            }
            let name = obj
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| CodecError::Schema("record is missing a name".to_string()))?
                .to_string();
            let raw_fields = obj
                .get("fields")
                .and_then(Value::as_array)
                .ok_or_else(|| CodecError::Schema(format!("record '{}' has no fields", name)))?;

            let mut fields = Vec::with_capacity(raw_fields.len());
            for raw in raw_fields {
                let field_name = raw
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or_else(|| CodecError::Schema("field is missing a name".to_string()))?
                    .to_string();
                let field_type = raw.get("type").ok_or_else(|| {
                    CodecError::Schema(format!("field '{}' is missing a type", field_name))
                })?;
                fields.push(Field {
                    name: field_name,
                    ty: parse_type(field_type)?,
                });
            }
            Ok(FieldType::Record(RecordSchema { name, fields }))
        }
        _ => Err(CodecError::Schema("unrecognized schema element".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY_SCHEMA: &str = include_str!("../../schemas/entry-schema.json");

    #[test]
    fn test_parse_entry_schema() {
        let schema = RecordSchema::parse(ENTRY_SCHEMA).unwrap();
        assert_eq!(schema.name, "Entry");
        let names: Vec<&str> = schema.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["entryId", "person", "address", "notes"]);

        assert_eq!(schema.fields[0].ty, FieldType::Int);
        match &schema.fields[1].ty {
            FieldType::Record(person) => {
                assert_eq!(person.fields.len(), 5);
                assert_eq!(
                    person.fields[2].ty,
                    FieldType::Nullable(Box::new(FieldType::Int))
                );
            }
            other => panic!("person should be a record, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file_is_schema_error() {
        let err = RecordSchema::load(Path::new("no-such-schema.json")).unwrap_err();
        assert!(matches!(err, CodecError::Schema(_)));
    }

    #[test]
    fn test_load_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entry-schema.json");
        std::fs::write(&path, ENTRY_SCHEMA).unwrap();
        let schema = RecordSchema::load(&path).unwrap();
        assert_eq!(schema.name, "Entry");
    }

    #[test]
    fn test_malformed_schema_rejected() {
        assert!(matches!(
            RecordSchema::parse("not json"),
            Err(CodecError::Schema(_))
        ));
        assert!(matches!(
            RecordSchema::parse("{\"type\":\"record\",\"name\":\"E\"}"),
            Err(CodecError::Schema(_))
        ));
        assert!(matches!(
            RecordSchema::parse("[\"null\",\"string\"]"),
            Err(CodecError::Schema(_))
        ));
        assert!(matches!(
            RecordSchema::parse("{\"type\":\"map\"}"),
            Err(CodecError::Schema(_))
        ));
    }

    #[test]
    fn test_unsupported_primitive_rejected() {
        let text = r#"{"type":"record","name":"R","fields":[{"name":"x","type":"double"}]}"#;
        assert!(matches!(
            RecordSchema::parse(text),
            Err(CodecError::Schema(_))
        ));
    }
}
