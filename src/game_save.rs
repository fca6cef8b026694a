//! GameSave - Manages the backup collection for one named save

use crate::{
    listing::{self, ListingOptions},
    mkdir_if_needed,
    transfer::{self, TrackedFile},
    Backup, Config, Error, Result, MAX_DIR_NAME_LENGTH, MESSAGE_SANITIZE_REGEX, SAFETY_SLOT,
};
use std::fs;
use std::path::PathBuf;

/// Mid-level: Orchestrates backup, restore, listing and deletion for one save
///
/// Existing backups are loaded eagerly from the per-save backup root at
/// construction time; directories whose names have no leading digit run
/// are skipped (they are someone else's files, not ours to touch).
pub struct GameSave {
    pub name: String,
    pub save_dir: PathBuf,
    pub backup_root: PathBuf,
    tracked: Vec<TrackedFile>,
    backups: Vec<Backup>,
}

impl GameSave {
    /// Create a registry for a named save
    ///
    /// Validates the name, creates the per-save backup root if needed and
    /// loads the existing backups from it.
    pub fn new(name: &str, config: &Config) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::InvalidArgument(
                "the save name must be a non-empty string".to_string(),
            ));
        }

        let save_dir = config.save_directory()?.to_path_buf();
        let backup_root = config.backup_root_directory()?.join(name);
        mkdir_if_needed(&backup_root)?;

        let mut backups = Vec::new();
        for entry in fs::read_dir(&backup_root)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            match Backup::load(path) {
                Ok(backup) => backups.push(backup),
                Err(Error::InvalidBackupName(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(Self {
            name: name.to_string(),
            save_dir,
            backup_root,
            tracked: TrackedFile::set_for(name),
            backups,
        })
    }

    /// The backups known to this registry, in load order
    pub fn backups(&self) -> &[Backup] {
        &self.backups
    }

    /// The highest backup number currently known, if any
    pub fn max_backup_number(&self) -> Option<u32> {
        self.backups.iter().map(|b| b.number).max()
    }

    /// Create a new backup of the live save files
    ///
    /// Without an explicit index the next free one is used (one past the
    /// current maximum, starting at 1). Index 0 is reserved for the
    /// pre-restore safety copy and is deliberately not validated here;
    /// passing it overwrites that slot.
    ///
    /// A non-empty message is folded into the directory name as
    /// `"{n} - {sanitized}"` when the result fits the name length limit,
    /// and is persisted in the metadata file either way.
    pub fn backup(&mut self, n: Option<u32>, message: Option<&str>) -> Result<Backup> {
        let n = match n {
            Some(n) => n,
            None => self.max_backup_number().map_or(1, |max| max + 1),
        };

        let message = message.filter(|m| !m.is_empty());
        let dir_name = match message {
            Some(message) => {
                let with_message = format!("{} - {}", n, sanitize_message(message));
                if with_message.len() > MAX_DIR_NAME_LENGTH {
                    n.to_string()
                } else {
                    with_message
                }
            }
            None => n.to_string(),
        };

        let backup = Backup::create(
            self.backup_root.join(dir_name),
            message.map(str::to_string),
        )?;
        transfer::copy_all(&self.save_dir, &backup.dir, &self.tracked)?;

        self.backups.push(backup.clone());
        Ok(backup)
    }

    /// Restore a backup over the live save files
    ///
    /// Without an explicit index the highest existing backup is restored;
    /// fails with `NoBackupsFound` when there is nothing to restore.
    /// Unless slot 0 itself is the target, the live files are first
    /// copied into slot 0 so an accidental restore can be undone.
    pub fn restore(&self, n: Option<u32>) -> Result<()> {
        let n = match n {
            Some(n) => n,
            None => self
                .max_backup_number()
                .ok_or_else(|| Error::NoBackupsFound(self.name.clone()))?,
        };

        if n != SAFETY_SLOT {
            let safety_dir = self.backup_root.join(SAFETY_SLOT.to_string());
            transfer::copy_all(&self.save_dir, &safety_dir, &self.tracked)?;
        }

        // A nonexistent index falls back to the bare numeric path and
        // fails at the copy pre-check.
        let source = self
            .backups
            .iter()
            .find(|b| b.number == n)
            .map(|b| b.dir.clone())
            .unwrap_or_else(|| self.backup_root.join(n.to_string()));
        transfer::copy_all(&source, &self.save_dir, &self.tracked)
    }

    /// Render the listing report for this save
    ///
    /// Rescans the backup root, tabulating only directories with fully
    /// numeric names; anything else is silently ignored.
    pub fn get_listing(&self, options: &ListingOptions) -> Result<String> {
        let mut backups = Vec::new();
        for entry in fs::read_dir(&self.backup_root)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let numeric = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
                .unwrap_or(false);
            if numeric {
                backups.push(Backup::load(path)?);
            }
        }

        Ok(listing::render_table(&self.name, &backups, options))
    }

    /// Delete every backup for this save, irrecoverably
    ///
    /// When confirmation is required the removal is gated on the supplied
    /// yes/no interaction; declining leaves everything in place. Returns
    /// whether the deletion happened.
    pub fn delete<F>(&self, require_confirmation: bool, confirm: F) -> Result<bool>
    where
        F: FnOnce(&str) -> bool,
    {
        if require_confirmation {
            let prompt = format!(
                "Are you certain that you want to delete all backups for the \
                 They Are Billions save '{}'? (yes/no): ",
                self.name
            );
            if !confirm(&prompt) {
                return Ok(false);
            }
        }

        fs::remove_dir_all(&self.backup_root)?;
        Ok(true)
    }
}

/// Replace directory-hostile characters and trim the result
fn sanitize_message(message: &str) -> String {
    MESSAGE_SANITIZE_REGEX
        .replace_all(message, "_")
        .trim()
        .to_string()
}

/// Delete every backup for every save
pub fn delete_all() -> Result<()> {
    // TODO: decide whether this should prompt per save or once globally
    // before wiring up the recursive removal.
    Err(Error::NotImplemented("delete-all"))
}
