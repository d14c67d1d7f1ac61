//! File-backed role slot shared across processes of the same user.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{marker_for, RoleStore, ADMIN_MARKER};

/// Persists the role decision as a single small file holding the literal
/// marker string. Every client pointed at the same path observes the last
/// write, surviving restarts.
#[derive(Clone, Debug)]
pub struct FileRoleStore {
    path: PathBuf,
}

impl FileRoleStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RoleStore for FileRoleStore {
    fn write(&self, decision: bool) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let mut file = File::create(&self.path)
            .with_context(|| format!("failed to open role slot {}", self.path.display()))?;
        file.write_all(marker_for(decision).as_bytes())
            .with_context(|| format!("failed to write role slot {}", self.path.display()))?;
        // A reload mid-sign-in must observe this decision, so flush to disk
        // before the provider call is issued.
        file.sync_all()
            .with_context(|| format!("failed to sync role slot {}", self.path.display()))?;
        debug!(path = %self.path.display(), decision, "persisted role decision");
        Ok(())
    }

    fn read(&self) -> bool {
        match fs::read_to_string(&self.path) {
            Ok(value) => value == ADMIN_MARKER,
            Err(_) => false,
        }
    }
}
