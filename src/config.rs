// SPDX-License-Identifier: MIT

use std::path::PathBuf;

/// Runtime settings shared by every codec
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Directory codec-default output files land in
    pub data_dir: PathBuf,
    /// Location of the record schema artifact for the schema-bound codecs
    pub schema_path: PathBuf,
}

impl CodecConfig {
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("ADDRESS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            schema_path: std::env::var("ADDRESS_SCHEMA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("schemas/entry-schema.json")),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.data_dir.as_os_str().is_empty() {
            return Err("ADDRESS_DATA_DIR cannot be empty".to_string());
        }

        if self.schema_path.as_os_str().is_empty() {
            return Err("ADDRESS_SCHEMA_PATH cannot be empty".to_string());
        }

        Ok(())
    }
}
