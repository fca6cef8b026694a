//! Backup - One numbered snapshot directory and its metadata

use crate::{mkdir_if_needed, Error, Metadata, Result, NUMBER_PREFIX_REGEX};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// A single backup of a save's tracked files
///
/// The directory name's leading digit run is the canonical backup number;
/// anything after it (typically ` - <message>`) is decoration. Number `0`
/// is reserved for the automatic pre-restore safety copy.
#[derive(Debug, Clone)]
pub struct Backup {
    pub dir: PathBuf,
    pub number: u32,
    pub message: Option<String>,
}

impl Backup {
    /// Extract the backup number from a directory's base name
    ///
    /// The number is the maximal leading run of decimal digits. A name
    /// with no leading digits fails with `InvalidBackupName`.
    pub fn parse_number(dir: &Path) -> Result<u32> {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let number: Option<u32> = NUMBER_PREFIX_REGEX
            .captures(&name)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok());
        number.ok_or(Error::InvalidBackupName(name))
    }

    /// Create a backup directory, persisting the message when given
    ///
    /// The directory (and any missing parents) is created if needed. A
    /// non-empty message is written to the metadata file, replacing any
    /// previous one; an existing directory is otherwise left alone.
    pub fn create(dir: PathBuf, message: Option<String>) -> Result<Self> {
        let number = Self::parse_number(&dir)?;
        mkdir_if_needed(&dir)?;

        let message = message.filter(|m| !m.is_empty());
        if let Some(ref message) = message {
            Metadata::with_message(message.clone()).write_to(&dir)?;
        }

        Ok(Self {
            dir,
            number,
            message,
        })
    }

    /// Load an existing backup from its directory
    ///
    /// The message is filled from the metadata file when one is present;
    /// a missing file leaves it unset.
    pub fn load(dir: PathBuf) -> Result<Self> {
        let number = Self::parse_number(&dir)?;
        let metadata = Metadata::read_from(&dir)?;

        Ok(Self {
            dir,
            number,
            message: metadata.message,
        })
    }
}

impl PartialEq for Backup {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Backup {}

impl PartialOrd for Backup {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Backup {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number.cmp(&other.number)
    }
}
