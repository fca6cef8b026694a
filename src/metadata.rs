//! Metadata - Per-backup side-record stored alongside the copied files

use crate::{Result, METADATA_FILENAME};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Free-text annotations for a single backup
///
/// Persisted as a small YAML mapping inside the backup directory. Only
/// `message` is read or written here; unknown keys in the file are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Metadata {
    /// Create metadata carrying a message
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Path of the metadata file inside a backup directory
    pub fn path_in(backup_dir: &Path) -> PathBuf {
        backup_dir.join(METADATA_FILENAME)
    }

    /// Read metadata from a backup directory
    ///
    /// A missing file, an empty file, or a file without the `message` key
    /// all produce defaults; none of them is an error.
    pub fn read_from(backup_dir: &Path) -> Result<Self> {
        let path = Self::path_in(backup_dir);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Write metadata into a backup directory, replacing any previous file
    pub fn write_to(&self, backup_dir: &Path) -> Result<()> {
        let contents = serde_yaml::to_string(self)?;
        fs::write(Self::path_in(backup_dir), contents)?;
        Ok(())
    }

    /// Check whether there is anything worth persisting
    pub fn is_empty(&self) -> bool {
        self.message.is_none()
    }
}
