// SPDX-License-Identifier: MIT
//! Entry, Person and Address value aggregates
//!
//! All three are immutable value types: constructed once with all fields and
//! never mutated in place. Equality is structural. JSON field names are
//! camelCase (`entryId`, `firstName`, ...) to match the export format.

use serde::{Deserialize, Serialize};

use super::enums::{Gender, MaritalStatus};

/// Personal information for an address book entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub marital_status: Option<MaritalStatus>,
}

impl Person {
    pub fn new(
        first_name: Option<String>,
        last_name: Option<String>,
        age: Option<i32>,
        gender: Option<Gender>,
        marital_status: Option<MaritalStatus>,
    ) -> Self {
        Self {
            first_name,
            last_name,
            age,
            gender,
            marital_status,
        }
    }
}

/// Physical address and contact details for an address book entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Address {
    pub fn new(
        street: Option<String>,
        city: Option<String>,
        state: Option<String>,
        zip: Option<String>,
        email: Option<String>,
        phone: Option<String>,
    ) -> Self {
        Self {
            street,
            city,
            state,
            zip,
            email,
            phone,
        }
    }
}

/// A complete address book entry
///
/// `entry_id` is unique within a record set by convention; the codec layer
/// does not enforce uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub entry_id: i32,
    pub person: Person,
    pub address: Address,
    pub notes: Option<String>,
}

impl Entry {
    pub fn new(entry_id: i32, person: Person, address: Address, notes: Option<String>) -> Self {
        Self {
            entry_id,
            person,
            address,
            notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> Entry {
        Entry::new(
            1,
            Person::new(
                Some("Jo".to_string()),
                Some("Lee".to_string()),
                Some(40),
                Some(Gender::Male),
                Some(MaritalStatus::Single),
            ),
            Address::new(
                Some("1 Elm".to_string()),
                Some("Ada".to_string()),
                Some("OH".to_string()),
                Some("45810".to_string()),
                Some("jo@x.com".to_string()),
                Some("5551234".to_string()),
            ),
            Some("hi".to_string()),
        )
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(sample_entry(), sample_entry());

        let mut other = sample_entry();
        other.notes = None;
        assert_ne!(sample_entry(), other);
    }

    #[test]
    fn test_json_field_names_are_camel_case() {
        let json = serde_json::to_value(sample_entry()).unwrap();
        assert!(json.get("entryId").is_some());
        assert!(json["person"].get("firstName").is_some());
        assert!(json["person"].get("maritalStatus").is_some());
        assert!(json["address"].get("street").is_some());
    }

    #[test]
    fn test_null_fields_serialized_explicitly() {
        let mut entry = sample_entry();
        entry.notes = None;
        entry.person.gender = None;

        let json = serde_json::to_value(&entry).unwrap();
        assert!(json["notes"].is_null());
        assert!(json["person"]["gender"].is_null());

        let back: Entry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_missing_optional_fields_deserialize_to_none() {
        let json = r#"{"entryId":7,"person":{},"address":{}}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.entry_id, 7);
        assert!(entry.person.first_name.is_none());
        assert!(entry.notes.is_none());
    }

    #[test]
    fn test_unknown_enum_name_rejected() {
        let json = r#"{"entryId":1,"person":{"gender":"NEITHER"},"address":{}}"#;
        assert!(serde_json::from_str::<Entry>(json).is_err());
    }
}
