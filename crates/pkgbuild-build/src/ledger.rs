//! Version Ledger
//!
//! Append-only record of every version ever built, persisted one version
//! per line at `dist/versions.txt`. Entries keep first-seen order and are
//! never rewritten; a partial write can only fail to add the newest entry,
//! never lose prior history.

use crate::error::{BuildError, BuildResult};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Ledger file name, relative to the output directory root
pub const LEDGER_FILE: &str = "versions.txt";

/// Outcome of a [`VersionLedger::record`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerUpdate {
    /// Ledger file did not exist; it was created with this version
    Created,
    /// Version was appended to the existing ledger
    Appended,
    /// Version was already present; nothing was written
    AlreadyRecorded,
}

/// Append-only version history
pub struct VersionLedger {
    path: PathBuf,
}

impl VersionLedger {
    /// Create a ledger rooted at the given output directory
    pub fn new(dist_dir: &Path) -> Self {
        Self {
            path: dist_dir.join(LEDGER_FILE),
        }
    }

    /// Record a version, once
    ///
    /// Safe to call on every build-completion event: rebuilding an
    /// already-recorded version is a no-op. New versions are appended as
    /// `"\n" + version`; the first version is written without any
    /// separator, so the file never carries a trailing newline.
    pub fn record(&self, version: &str) -> BuildResult<LedgerUpdate> {
        if !self.path.exists() {
            fs::write(&self.path, version).map_err(|e| BuildError::io(&self.path, e))?;
            info!(%version, "created version ledger");
            return Ok(LedgerUpdate::Created);
        }

        let contents =
            fs::read_to_string(&self.path).map_err(|e| BuildError::io(&self.path, e))?;

        if contents.lines().any(|line| line.trim() == version) {
            debug!(%version, "version already recorded");
            return Ok(LedgerUpdate::AlreadyRecorded);
        }

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| BuildError::io(&self.path, e))?;
        write!(file, "\n{version}").map_err(|e| BuildError::io(&self.path, e))?;

        info!(%version, "recorded version");
        Ok(LedgerUpdate::Appended)
    }

    /// All recorded versions, in first-seen order
    pub fn versions(&self) -> BuildResult<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents =
            fs::read_to_string(&self.path).map_err(|e| BuildError::io(&self.path, e))?;

        Ok(contents.lines().map(|line| line.trim().to_string()).collect())
    }

    /// Path of the ledger artifact
    pub fn path(&self) -> &Path {
        &self.path
    }
}
