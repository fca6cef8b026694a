//! SaveScum - Backup and restore tool for They Are Billions save files
//!
//! This library manages numbered snapshot directories for a named save:
//! full copies of the tracked save files that can be listed and restored
//! on demand, with an automatic safety copy taken before every restore.

use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Path, PathBuf};

pub mod backup;
pub mod config;
pub mod game_save;
pub mod listing;
pub mod metadata;
pub mod transfer;

pub use backup::Backup;
pub use config::Config;
pub use game_save::{delete_all, GameSave};
pub use listing::{list_all, ListingOptions};
pub use metadata::Metadata;
pub use transfer::TrackedFile;

/// Longest allowed backup directory name when folding a message into it
pub const MAX_DIR_NAME_LENGTH: usize = 30;

/// Backup number reserved for the automatic pre-restore safety copy
pub const SAFETY_SLOT: u32 = 0;

/// Name of the per-backup metadata side-file
pub const METADATA_FILENAME: &str = "metadata.yml";

/// Subdirectory of the save directory that holds all backups
pub const BACKUPS_DIR_NAME: &str = "backups";

/// Tracked file suffixes appended to the save name, with whether the
/// resulting file is required at copy time. The `_Backup` pair is the
/// game's own rotating slot and may legitimately be absent.
pub const TRACKED_SUFFIXES: [(&str, bool); 4] = [
    (".zxcheck", true),
    (".zxsav", true),
    ("_Backup.zxcheck", false),
    ("_Backup.zxsav", false),
];

lazy_static! {
    /// Regex matching the leading decimal-digit run of a backup directory name
    pub static ref NUMBER_PREFIX_REGEX: Regex = Regex::new(r"^([0-9]+)").unwrap();

    /// Regex matching message characters that must be replaced before use
    /// in a directory name
    pub static ref MESSAGE_SANITIZE_REGEX: Regex =
        Regex::new(r"[^A-Za-z0-9 ]").unwrap();
}

/// Create a directory (and parents) if it does not exist
///
/// Fails with `NotADirectory` if the path exists but is not a directory.
pub fn mkdir_if_needed(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    } else if !path.is_dir() {
        return Err(Error::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Backup directories must start with a number: {0:?}")]
    InvalidBackupName(String),

    #[error("Could not copy {}: the source is not a file", .0.display())]
    MissingSourceFile(PathBuf),

    #[error("No backups found for save: {0}")]
    NoBackupsFound(String),

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("Metadata error: {0}")]
    Metadata(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
