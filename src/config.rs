//! Config - Locates the live save directory and the backup root
//!
//! A `Config` is constructed explicitly and handed to each `GameSave`;
//! there is no global instance. The on-disk file is a tiny YAML mapping
//! (`save_dir: <path>`) kept in the user's config directory.

use crate::{mkdir_if_needed, Error, Result, BACKUPS_DIR_NAME};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the on-disk configuration file
pub const CONFIG_FILENAME: &str = "config.yml";

/// Configuration for one installation: where the game keeps its saves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    save_dir: PathBuf,
}

impl Config {
    /// Create a config pointing at an explicit save directory
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
        }
    }

    /// Resolve the directory holding the config file
    ///
    /// Resolution order:
    /// 1. `SAVESCUM_CONFIG_DIR` environment variable
    /// 2. Unix: `$HOME/.savescum`
    /// 3. Windows: `%APPDATA%\savescum`
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(custom) = std::env::var("SAVESCUM_CONFIG_DIR") {
            return Ok(PathBuf::from(custom));
        }
        resolve_default_config_dir()
    }

    /// Path of the config file itself
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILENAME))
    }

    /// Load the config from disk
    ///
    /// Fails if the file does not exist; first-run creation is the
    /// caller's job (it needs user interaction).
    pub fn load() -> Result<Self> {
        let contents = fs::read_to_string(Self::config_path()?)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Write the config to disk, creating the config directory if needed
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        mkdir_if_needed(&dir)?;
        let contents = serde_yaml::to_string(self)?;
        fs::write(dir.join(CONFIG_FILENAME), contents)?;
        Ok(())
    }

    /// The live save directory
    ///
    /// Fails with `NotADirectory` when the configured path is missing or
    /// is a file.
    pub fn save_directory(&self) -> Result<&Path> {
        if !self.save_dir.is_dir() {
            return Err(Error::NotADirectory(self.save_dir.clone()));
        }
        Ok(&self.save_dir)
    }

    /// The shared root under which every save's backups live
    ///
    /// Created on first use; fails with `NotADirectory` if the path
    /// exists as a file.
    pub fn backup_root_directory(&self) -> Result<PathBuf> {
        let root = self.save_directory()?.join(BACKUPS_DIR_NAME);
        mkdir_if_needed(&root)?;
        Ok(root)
    }
}

#[cfg(not(windows))]
fn resolve_default_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| Error::InvalidArgument("HOME environment variable not set".to_string()))?;
    Ok(PathBuf::from(home).join(".savescum"))
}

#[cfg(windows)]
fn resolve_default_config_dir() -> Result<PathBuf> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| Error::InvalidArgument("APPDATA environment variable not set".to_string()))?;
    Ok(PathBuf::from(appdata).join("savescum"))
}
