//! Transfer - Copies the tracked file set between two directories

use crate::{mkdir_if_needed, Error, Result, TRACKED_SUFFIXES};
use filetime::FileTime;
use std::fs;
use std::path::Path;

/// One tracked filename and whether it must exist at copy time
#[derive(Debug, Clone)]
pub struct TrackedFile {
    pub filename: String,
    pub required: bool,
}

impl TrackedFile {
    /// Build the tracked file set for a save name
    ///
    /// Four files: the primary save and checksum (required) and the
    /// game's rotating `_Backup` pair (optional).
    pub fn set_for(save_name: &str) -> Vec<TrackedFile> {
        TRACKED_SUFFIXES
            .iter()
            .map(|(suffix, required)| TrackedFile {
                filename: format!("{}{}", save_name, suffix),
                required: *required,
            })
            .collect()
    }
}

/// Copy every tracked file from one directory to another
///
/// The destination directory is created if missing. Existence of the
/// whole set is checked up front: a missing required file aborts with
/// `MissingSourceFile` before anything is copied, while missing optional
/// files are skipped. Copies follow symlinks and preserve timestamps.
pub fn copy_all(source_dir: &Path, dest_dir: &Path, files: &[TrackedFile]) -> Result<()> {
    mkdir_if_needed(dest_dir)?;

    let mut pending = Vec::new();
    for file in files {
        let source = source_dir.join(&file.filename);
        if !source.is_file() {
            if file.required {
                return Err(Error::MissingSourceFile(source));
            }
            continue;
        }
        pending.push((source, dest_dir.join(&file.filename)));
    }

    for (source, dest) in pending {
        copy_preserving(&source, &dest)?;
    }
    Ok(())
}

/// Copy one file, carrying over its access and modification times
fn copy_preserving(source: &Path, dest: &Path) -> Result<()> {
    fs::copy(source, dest)?;

    let metadata = fs::metadata(source)?;
    let atime = FileTime::from_last_access_time(&metadata);
    let mtime = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_times(dest, atime, mtime)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_save_files(dir: &Path, name: &str, suffixes: &[&str]) {
        for suffix in suffixes {
            fs::write(dir.join(format!("{}{}", name, suffix)), *suffix).unwrap();
        }
    }

    #[test]
    fn test_copies_full_set() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        write_save_files(
            source.path(),
            "colony",
            &[".zxcheck", ".zxsav", "_Backup.zxcheck", "_Backup.zxsav"],
        );

        let files = TrackedFile::set_for("colony");
        copy_all(source.path(), dest.path(), &files).unwrap();

        for file in &files {
            assert!(dest.path().join(&file.filename).is_file());
        }
    }

    #[test]
    fn test_optional_files_may_be_absent() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        write_save_files(source.path(), "colony", &[".zxcheck", ".zxsav"]);

        let files = TrackedFile::set_for("colony");
        copy_all(source.path(), dest.path(), &files).unwrap();

        assert!(dest.path().join("colony.zxsav").is_file());
        assert!(!dest.path().join("colony_Backup.zxsav").exists());
    }

    #[test]
    fn test_missing_required_file_fails() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        write_save_files(
            source.path(),
            "colony",
            &[".zxcheck", "_Backup.zxcheck", "_Backup.zxsav"],
        );

        let files = TrackedFile::set_for("colony");
        let result = copy_all(source.path(), dest.path(), &files);
        assert!(matches!(result, Err(Error::MissingSourceFile(_))));
    }

    #[test]
    fn test_nothing_is_copied_when_a_required_file_is_missing() {
        let source = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let dest = root.path().join("1");
        write_save_files(source.path(), "colony", &[".zxcheck", "_Backup.zxsav"]);

        let files = TrackedFile::set_for("colony");
        copy_all(source.path(), &dest, &files).unwrap_err();

        // The pre-check rejects the set before the optional file lands.
        assert!(!dest.join("colony_Backup.zxsav").exists());
        assert!(!dest.join("colony.zxcheck").exists());
    }

    #[test]
    fn test_destination_directory_is_created() {
        let source = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let dest = root.path().join("deep").join("7");
        write_save_files(source.path(), "colony", &[".zxcheck", ".zxsav"]);

        copy_all(source.path(), &dest, &TrackedFile::set_for("colony")).unwrap();
        assert!(dest.join("colony.zxsav").is_file());
    }

    #[test]
    fn test_copy_preserves_contents_and_mtime() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let source_file = source.path().join("colony.zxsav");
        fs::write(&source_file, b"save bytes").unwrap();
        fs::write(source.path().join("colony.zxcheck"), b"check").unwrap();

        let old = FileTime::from_unix_time(1_500_000_000, 0);
        filetime::set_file_times(&source_file, old, old).unwrap();

        copy_all(source.path(), dest.path(), &TrackedFile::set_for("colony")).unwrap();

        let dest_file = dest.path().join("colony.zxsav");
        assert_eq!(fs::read(&dest_file).unwrap(), b"save bytes");

        let copied = fs::metadata(&dest_file).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&copied), old);
    }
}
