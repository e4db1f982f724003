//! JSON file skip-policy store
//!
//! The blob is written to a sibling temp file and renamed over the target, so a
//! reader never sees a half-written value.

use crate::error::StorageError;
use noire_core::{PolicyStore, SkipPolicyState};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Skip-policy blob stored as a JSON file
#[derive(Debug, Clone)]
pub struct JsonFilePolicyStore {
    path: PathBuf,
}

impl JsonFilePolicyStore {
    /// Store the blob at `path` (parent directories are created on write)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store the blob as `<key>.json` inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>, key: &str) -> Self {
        Self::new(dir.as_ref().join(format!("{key}.json")))
    }

    /// Location of the blob
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read(&self) -> crate::Result<Option<SkipPolicyState>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let state = serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
            location: self.path.display().to_string(),
            source,
        })?;
        Ok(Some(state))
    }

    fn write(&self, state: &SkipPolicyState) -> crate::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.temp_path();
        fs::write(&tmp_path, serde_json::to_vec(state)?)?;
        fs::rename(&tmp_path, &self.path)?;

        debug!(
            "Policy blob written to {}: skips={}, lockout_until={}",
            self.path.display(),
            state.skip_count,
            state.lockout_until
        );
        Ok(())
    }
}

impl PolicyStore for JsonFilePolicyStore {
    fn get(&self) -> noire_core::Result<Option<SkipPolicyState>> {
        Ok(self.read()?)
    }

    fn set(&mut self, state: &SkipPolicyState) -> noire_core::Result<()> {
        Ok(self.write(state)?)
    }

    fn clear(&mut self) -> noire_core::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::from(e).into()),
        }
    }
}
