use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// What listing operations do when the folder is missing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingFolder {
    /// Return an empty result.
    #[default]
    Empty,
    /// Fail with `StoreError::FolderDoesNotExist`.
    Error,
}

/// Configuration for a document store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum number of intermediate folders a new document may sit under.
    pub max_depth: u32,
    /// Policy shared by `document_paths`, `documents` and `enumerator`.
    pub missing_folder: MissingFolder,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_depth: u32::MAX,
            missing_folder: MissingFolder::default(),
        }
    }
}

impl StoreConfig {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_missing_folder(mut self, policy: MissingFolder) -> Self {
        self.missing_folder = policy;
        self
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> StoreResult<Self> {
        toml::from_str(s).map_err(|e| StoreError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> StoreResult<String> {
        toml::to_string(self).map_err(|e| StoreError::Config(e.to_string()))
    }
}
