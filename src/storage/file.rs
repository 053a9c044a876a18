//! File-backed slot store
//!
//! Each slot is a `<key>.json` file in a data directory. Writes land in a
//! sibling temp file first and are renamed over the slot, so a reader never
//! sees a half-written cart.

use directories::ProjectDirs;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{CartStorage, StorageError};

/// Stores slots as files in a directory
///
/// Defaults to the XDG data directory (`~/.local/share/fakestore/` on Linux).
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Directory where slot files are stored
    data_dir: PathBuf,
}

impl FileStorage {
    /// Creates a FileStorage in the platform data directory
    ///
    /// Returns `None` if the data directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "fakestore")?;
        Some(Self::with_dir(project_dirs.data_dir().to_path_buf()))
    }

    /// Creates a FileStorage rooted at a custom directory
    pub fn with_dir(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Directory holding the slot files
    pub fn dir(&self) -> &Path {
        &self.data_dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

impl CartStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.data_dir)?;

        let path = self.slot_path(key);
        let tmp = self.data_dir.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
