// Launch-merge lock files
//
// While a launch is being reported, a lock file named after the launch and
// its temp id sits in the lock directory. An external merge tool waits until
// no such files remain before merging the launches of parallel processes.

use crate::model::TempId;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const LOCK_PREFIX: &str = "rplaunchinprogress";
const LOCK_SUFFIX: &str = ".tmp";

#[derive(Debug, Error)]
pub enum MergeLockError {
    #[error("failed to create launch lock {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to delete launch lock {path}: {source}")]
    Delete {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read lock directory {path}: {source}")]
    List {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub fn lock_file_name(launch_name: &str, temp_id: &TempId) -> String {
    format!("{}-{}-{}{}", LOCK_PREFIX, launch_name, temp_id, LOCK_SUFFIX)
}

/// An acquired lock file
#[derive(Debug, PartialEq, Eq)]
pub struct LaunchLock {
    path: PathBuf,
}

impl LaunchLock {
    pub fn create(dir: &Path, launch_name: &str, temp_id: &TempId) -> Result<Self, MergeLockError> {
        let path = dir.join(lock_file_name(launch_name, temp_id));
        fs::write(&path, b"").map_err(|source| MergeLockError::Create {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the lock file. Not retried on failure.
    pub fn release(self) -> Result<(), MergeLockError> {
        fs::remove_file(&self.path).map_err(|source| MergeLockError::Delete {
            path: self.path,
            source,
        })
    }
}

/// Lock files of launches still being reported, sorted by path
pub fn list_launch_locks(dir: &Path) -> Result<Vec<PathBuf>, MergeLockError> {
    let entries = fs::read_dir(dir).map_err(|source| MergeLockError::List {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut locks: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path.file_name().and_then(|n| n.to_str()).is_some_and(|name| {
                    name.starts_with(LOCK_PREFIX) && name.ends_with(LOCK_SUFFIX)
                })
        })
        .collect();
    locks.sort();
    Ok(locks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_file_name_format() {
        let name = lock_file_name("nightly", &TempId::new("abc-123"));
        assert_eq!(name, "rplaunchinprogress-nightly-abc-123.tmp");
    }

    #[test]
    fn test_create_and_release() {
        let dir = tempfile::TempDir::new().expect("temp dir");

        let lock = LaunchLock::create(dir.path(), "nightly", &TempId::new("l1")).expect("created");
        let path = lock.path().to_path_buf();
        assert!(path.exists());

        lock.release().expect("released");
        assert!(!path.exists());
    }

    #[test]
    fn test_release_missing_file_errors() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let lock = LaunchLock::create(dir.path(), "nightly", &TempId::new("l1")).expect("created");
        fs::remove_file(lock.path()).expect("removed behind our back");

        assert!(matches!(lock.release(), Err(MergeLockError::Delete { .. })));
    }

    #[test]
    fn test_create_in_missing_dir_errors() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let missing = dir.path().join("nope");

        let result = LaunchLock::create(&missing, "nightly", &TempId::new("l1"));

        assert!(matches!(result, Err(MergeLockError::Create { .. })));
    }
}
