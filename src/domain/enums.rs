// SPDX-License-Identifier: MIT
//! Demographic enumerations for a person

use serde::{Deserialize, Serialize};

/// Gender options for a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Canonical uppercase name, as stored on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    /// Exact-match on the uppercase name; anything else is rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MALE" => Ok(Gender::Male),
            "FEMALE" => Ok(Gender::Female),
            "OTHER" => Ok(Gender::Other),
            _ => Err(format!("Invalid gender: {}", s)),
        }
    }
}

/// Marital status options for a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MaritalStatus {
    Married,
    Single,
    Widowed,
    Divorced,
    Other,
}

impl MaritalStatus {
    /// Canonical uppercase name, as stored on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            MaritalStatus::Married => "MARRIED",
            MaritalStatus::Single => "SINGLE",
            MaritalStatus::Widowed => "WIDOWED",
            MaritalStatus::Divorced => "DIVORCED",
            MaritalStatus::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MaritalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MARRIED" => Ok(MaritalStatus::Married),
            "SINGLE" => Ok(MaritalStatus::Single),
            "WIDOWED" => Ok(MaritalStatus::Widowed),
            "DIVORCED" => Ok(MaritalStatus::Divorced),
            "OTHER" => Ok(MaritalStatus::Other),
            _ => Err(format!("Invalid marital status: {}", s)),
        }
    }
}
