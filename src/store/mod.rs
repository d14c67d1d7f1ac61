//! Durable storage for the last role decision.
//!
//! One slot, last-writer-wins, no locking: writes only originate from a
//! single-user client, so concurrent writers are rare and the newest value
//! is the right one. The slot is read at startup before the provider has
//! responded, which is why [`RoleStore::write`] must be durable before the
//! sign-in request goes out.

pub mod file;
pub mod memory;

pub use file::FileRoleStore;
pub use memory::MemoryRoleStore;

use anyhow::Result;

/// Marker stored when the cached role is admin. Anything else reads as
/// non-admin.
pub(crate) const ADMIN_MARKER: &str = "true";

/// Marker stored when the cached role is non-admin.
pub(crate) const NON_ADMIN_MARKER: &str = "false";

/// Persistence for the last-known role decision.
pub trait RoleStore: Send + Sync {
    /// Overwrite the single persisted slot. The value must be durable when
    /// this returns.
    ///
    /// # Errors
    /// Returns an error when the slot cannot be written; callers surface the
    /// failure instead of proceeding with a stale cache.
    fn write(&self, decision: bool) -> Result<()>;

    /// Last persisted decision. `false` when the slot is unset or holds
    /// anything other than the literal admin marker.
    fn read(&self) -> bool;
}

pub(crate) fn marker_for(decision: bool) -> &'static str {
    if decision {
        ADMIN_MARKER
    } else {
        NON_ADMIN_MARKER
    }
}
