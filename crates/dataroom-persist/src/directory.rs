//! File-backed slot storage: one file per key inside a directory.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::backend::SlotBackend;
use crate::error::{PersistError, PersistResult};

/// Extension given to in-flight writes before they are renamed into place.
const TEMP_SUFFIX: &str = ".tmp";

/// A [`SlotBackend`] storing each slot as a file named after its key.
///
/// Writes go to a sibling temporary file first and are renamed over the
/// target, so a crash mid-write leaves the previous value intact.
#[derive(Clone, Debug)]
pub struct DirectoryBackend {
    root: PathBuf,
}

impl DirectoryBackend {
    /// Open a backend rooted at `root`, creating the directory if needed.
    pub fn open(root: impl AsRef<Path>) -> PersistResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The directory holding the slot files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, key: &str) -> PersistResult<PathBuf> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.ends_with(TEMP_SUFFIX)
            && !key.contains(['/', '\\', '\0']);
        if !valid {
            return Err(PersistError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.root.join(key))
    }
}

impl SlotBackend for DirectoryBackend {
    fn get(&self, key: &str) -> PersistResult<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> PersistResult<()> {
        let path = self.slot_path(key)?;
        let temp = self.root.join(format!("{key}{TEMP_SUFFIX}"));

        let mut file = fs::File::create(&temp)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp, &path)?;

        debug!(key, bytes = value.len(), path = %path.display(), "wrote slot");
        Ok(())
    }

    fn remove(&self, key: &str) -> PersistResult<bool> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
