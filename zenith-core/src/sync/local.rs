//! File-backed local fallback storage.

use std::fs;
use std::io;
use std::path::PathBuf;

use super::collaborators::LocalStore;
use super::error::LocalStoreError;

/// Key of the local fallback slot; also the file stem on disk.
pub const STORAGE_KEY: &str = "zenith_app_state_v1";

/// Stores the fallback document as `<data_dir>/zenith_app_state_v1.json`.
#[derive(Debug, Clone)]
pub struct FileLocalStore {
    data_dir: PathBuf,
}

impl FileLocalStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Returns the full path of the fallback file.
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", STORAGE_KEY))
    }
}

impl LocalStore for FileLocalStore {
    /// Returns `Ok(None)` if the file doesn't exist.
    fn read(&self) -> Result<Option<String>, LocalStoreError> {
        let path = self.path();
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LocalStoreError::Io(path, e)),
        }
    }

    /// Creates the data directory if it doesn't exist. The file is written to
    /// a temporary sibling first and renamed into place.
    fn write(&self, contents: &str) -> Result<(), LocalStoreError> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| LocalStoreError::Io(self.data_dir.clone(), e))?;

        let path = self.path();
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents).map_err(|e| LocalStoreError::Io(tmp.clone(), e))?;
        fs::rename(&tmp, &path).map_err(|e| LocalStoreError::Io(path, e))?;
        Ok(())
    }
}
