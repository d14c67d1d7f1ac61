//! In-memory role slot for tests and ephemeral hosts.

use anyhow::Result;
use std::sync::{Arc, Mutex, PoisonError};

use super::{marker_for, RoleStore, ADMIN_MARKER};

/// Keeps the slot in memory with the same tri-state semantics as the durable
/// store: unset, `"true"`, or `"false"`. Clones share the slot, which lets a
/// test hold one handle while the controller owns another.
#[derive(Clone, Debug, Default)]
pub struct MemoryRoleStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryRoleStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw slot contents, mostly useful to assert on the stored marker.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RoleStore for MemoryRoleStore {
    fn write(&self, decision: bool) -> Result<()> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(marker_for(decision).to_string());
        Ok(())
    }

    fn read(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_deref()
            == Some(ADMIN_MARKER)
    }
}
