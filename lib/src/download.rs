//! Saving serialized exports to disk.

use crate::error::{ExportError, Result};
use log::{debug, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// What to do when the target name is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictAction {
    /// Save as `name (1).ext`, `name (2).ext`, ...
    #[default]
    Uniquify,
    Overwrite,
}

/// Where exported JSON ends up.
pub trait DownloadSink {
    /// Save `data` under `filename`, returning the final location.
    fn download_json(&self, data: &str, filename: &str) -> Result<PathBuf>;
}

/// Saves downloads into a directory, the way a browser's download folder works.
#[derive(Debug, Clone)]
pub struct DirectoryDownloads {
    dir: PathBuf,
    conflict: ConflictAction,
}

impl DirectoryDownloads {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            conflict: ConflictAction::default(),
        }
    }

    pub fn with_conflict(mut self, conflict: ConflictAction) -> Self {
        self.conflict = conflict;
        self
    }
}

impl DownloadSink for DirectoryDownloads {
    fn download_json(&self, data: &str, filename: &str) -> Result<PathBuf> {
        validate_filename(filename)?;
        fs::create_dir_all(&self.dir)?;

        // The temp file lives next to the target so the final rename stays on
        // one filesystem. It is deleted on drop unless persisted.
        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(data.as_bytes())?;
        staged.as_file().sync_all()?;
        debug!("Staged {} bytes at {}", data.len(), staged.path().display());

        let target = match self.conflict {
            ConflictAction::Overwrite => {
                let target = self.dir.join(filename);
                staged.persist(&target)?;
                target
            }
            ConflictAction::Uniquify => persist_unique(staged, &self.dir, filename)?,
        };

        info!("Saved {}", target.display());
        Ok(target)
    }
}

fn validate_filename(filename: &str) -> Result<()> {
    if filename.trim().is_empty() {
        return Err(ExportError::InvalidInput(
            "Download filename must not be empty".to_string(),
        ));
    }
    if filename.contains('/') || filename.contains('\\') || filename == "." || filename == ".." {
        return Err(ExportError::InvalidInput(format!(
            "Download filename '{}' must be a plain file name",
            filename
        )));
    }
    Ok(())
}

/// `bookmarks.json` -> `bookmarks (n).json`
fn numbered_name(filename: &str, n: usize) -> String {
    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{} ({}).{}", stem, n, ext),
        None => format!("{} ({})", stem, n),
    }
}

fn persist_unique(mut staged: NamedTempFile, dir: &Path, filename: &str) -> Result<PathBuf> {
    let mut n = 0;
    loop {
        let name = if n == 0 {
            filename.to_string()
        } else {
            numbered_name(filename, n)
        };
        let target = dir.join(name);

        match staged.persist_noclobber(&target) {
            Ok(_) => return Ok(target),
            Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => {
                staged = e.file;
                n += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn leftover_temp_files(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .flatten()
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(".tmp"))
            })
            .collect()
    }

    #[test]
    fn test_download_writes_exact_content() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectoryDownloads::new(dir.path());

        let path = sink.download_json("[\n  1\n]", "bookmarks.json").unwrap();

        assert_eq!(path, dir.path().join("bookmarks.json"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[\n  1\n]");
        assert!(leftover_temp_files(dir.path()).is_empty());
    }

    #[test]
    fn test_download_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports/today");
        let sink = DirectoryDownloads::new(&nested);

        let path = sink.download_json("[]", "bookmarks.json").unwrap();
        assert!(path.starts_with(&nested));
    }

    #[test]
    fn test_existing_file_is_uniquified() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectoryDownloads::new(dir.path());

        let first = sink.download_json("[1]", "bookmarks.json").unwrap();
        let second = sink.download_json("[2]", "bookmarks.json").unwrap();
        let third = sink.download_json("[3]", "bookmarks.json").unwrap();

        assert_eq!(first, dir.path().join("bookmarks.json"));
        assert_eq!(second, dir.path().join("bookmarks (1).json"));
        assert_eq!(third, dir.path().join("bookmarks (2).json"));
        assert_eq!(fs::read_to_string(&first).unwrap(), "[1]");
        assert!(leftover_temp_files(dir.path()).is_empty());
    }

    #[test]
    fn test_overwrite_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectoryDownloads::new(dir.path()).with_conflict(ConflictAction::Overwrite);

        sink.download_json("[1]", "bookmarks.json").unwrap();
        let path = sink.download_json("[2]", "bookmarks.json").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "[2]");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_save_releases_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory under the target name cannot be replaced by a file.
        let blocker = dir.path().join("bookmarks.json");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), "x").unwrap();
        let sink = DirectoryDownloads::new(dir.path()).with_conflict(ConflictAction::Overwrite);

        let err = sink.download_json("[1]", "bookmarks.json").unwrap_err();

        assert!(matches!(err, ExportError::Io(_)));
        assert!(leftover_temp_files(dir.path()).is_empty());
        assert!(blocker.is_dir());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("../bookmarks.json")]
    #[case("nested/bookmarks.json")]
    #[case("..")]
    fn test_bad_filenames_are_rejected(#[case] filename: &str) {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectoryDownloads::new(dir.path());

        let err = sink.download_json("[]", filename).unwrap_err();
        assert!(matches!(err, ExportError::InvalidInput(_)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[rstest]
    #[case("bookmarks.json", 1, "bookmarks (1).json")]
    #[case("bookmarks.tar.json", 3, "bookmarks.tar (3).json")]
    #[case("bookmarks", 2, "bookmarks (2)")]
    fn test_numbered_name(#[case] filename: &str, #[case] n: usize, #[case] expected: &str) {
        assert_eq!(numbered_name(filename, n), expected);
    }
}
