//! `localStorage`-backed skip policy store

use super::types::storage_error;
use noire_core::{PolicyStore, Result, SkipPolicyState};
use tracing::debug;
use web_sys::Storage;

/// Keys written by earlier web builds, read once and migrated
const LEGACY_SKIPS_KEY: &str = "noire_skips";
const LEGACY_LOCKOUT_KEY: &str = "noire_lockout_until";

/// Skip policy persisted under one `localStorage` key as a JSON blob
#[derive(Debug, Clone)]
pub struct LocalStoragePolicyStore {
    key: String,
}

impl LocalStoragePolicyStore {
    /// Store the blob under `key`
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Key of the blob
    pub fn key(&self) -> &str {
        &self.key
    }

    fn storage() -> Result<Storage> {
        let window = web_sys::window()
            .ok_or_else(|| noire_core::NoireError::storage("no window"))?;
        window
            .local_storage()
            .map_err(|e| storage_error(&e))?
            .ok_or_else(|| noire_core::NoireError::storage("localStorage disabled"))
    }
}

impl PolicyStore for LocalStoragePolicyStore {
    fn get(&self) -> Result<Option<SkipPolicyState>> {
        let storage = Self::storage()?;

        if let Some(blob) = storage.get_item(&self.key).map_err(|e| storage_error(&e))? {
            return Ok(Some(serde_json::from_str(&blob)?));
        }

        let skips = storage
            .get_item(LEGACY_SKIPS_KEY)
            .map_err(|e| storage_error(&e))?;
        let lockout = storage
            .get_item(LEGACY_LOCKOUT_KEY)
            .map_err(|e| storage_error(&e))?;
        let legacy = parse_legacy(skips.as_deref(), lockout.as_deref());
        if legacy.is_some() {
            debug!("Migrating skip policy from legacy keys");
        }
        Ok(legacy)
    }

    fn set(&mut self, state: &SkipPolicyState) -> Result<()> {
        let storage = Self::storage()?;
        let blob = serde_json::to_string(state)?;
        storage
            .set_item(&self.key, &blob)
            .map_err(|e| storage_error(&e))?;

        // Legacy keys are dead once the blob exists
        storage.remove_item(LEGACY_SKIPS_KEY).ok();
        storage.remove_item(LEGACY_LOCKOUT_KEY).ok();
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let storage = Self::storage()?;
        storage
            .remove_item(&self.key)
            .map_err(|e| storage_error(&e))
    }
}

/// Read the two-key layout (`noire_skips`, `noire_lockout_until`).
///
/// Unparseable values count as absent.
fn parse_legacy(skips: Option<&str>, lockout_until: Option<&str>) -> Option<SkipPolicyState> {
    if skips.is_none() && lockout_until.is_none() {
        return None;
    }

    Some(SkipPolicyState {
        skip_count: skips.and_then(|s| s.trim().parse().ok()).unwrap_or(0),
        lockout_until: lockout_until
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0),
    })
}
