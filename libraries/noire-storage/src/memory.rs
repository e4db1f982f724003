//! In-memory skip-policy store

use crate::error::StorageError;
use noire_core::{PolicyStore, SkipPolicyState};
use std::sync::{Arc, Mutex};

/// Process-local policy store.
///
/// Clones share the stored value, which lets a test drop one transport and
/// build another over the same data to simulate a page reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryPolicyStore {
    slot: Arc<Mutex<Option<SkipPolicyState>>>,
}

impl MemoryPolicyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `state`
    pub fn with_state(state: SkipPolicyState) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(state))),
        }
    }

    /// Current value without going through the port
    pub fn snapshot(&self) -> Option<SkipPolicyState> {
        self.slot.lock().ok().and_then(|slot| *slot)
    }
}

impl PolicyStore for MemoryPolicyStore {
    fn get(&self) -> noire_core::Result<Option<SkipPolicyState>> {
        let slot = self.slot.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(*slot)
    }

    fn set(&mut self, state: &SkipPolicyState) -> noire_core::Result<()> {
        let mut slot = self.slot.lock().map_err(|_| StorageError::Poisoned)?;
        *slot = Some(*state);
        Ok(())
    }

    fn clear(&mut self) -> noire_core::Result<()> {
        let mut slot = self.slot.lock().map_err(|_| StorageError::Poisoned)?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_returns_none() {
        let store = MemoryPolicyStore::new();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn set_then_clear() {
        let mut store = MemoryPolicyStore::new();
        let state = SkipPolicyState {
            skip_count: 10,
            lockout_until: 99,
        };

        store.set(&state).unwrap();
        assert_eq!(store.get().unwrap(), Some(state));

        store.clear().unwrap();
        assert_eq!(store.snapshot(), None);
    }

    #[test]
    fn clones_share_the_slot() {
        let mut writer = MemoryPolicyStore::with_state(SkipPolicyState::cleared());
        let reader = writer.clone();

        writer
            .set(&SkipPolicyState {
                skip_count: 2,
                lockout_until: 0,
            })
            .unwrap();

        assert_eq!(reader.get().unwrap().unwrap().skip_count, 2);
    }
}
