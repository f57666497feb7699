//! Descriptor Store
//!
//! Owns the cached descriptor snapshot for one build session. Watch builds
//! call [`DescriptorStore::refresh_if_changed`] on every compile event; an
//! unchanged descriptor is detected with a byte-equality check against the
//! cached raw form, so the common case never re-parses.

use crate::{DescriptorError, DescriptorResult, ProjectDescriptor};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Canonical descriptor file name, relative to the project root
pub const DESCRIPTOR_FILE: &str = "package.json";

/// Outcome of a [`DescriptorStore::refresh_if_changed`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Raw bytes were identical to the cached form; nothing happened
    Unchanged,
    /// Descriptor was re-parsed and the snapshot replaced
    Changed,
    /// Reload failed; the last-known-good snapshot was retained
    RetainedStale,
}

/// Cached project descriptor with change detection
///
/// Holds both the raw serialized form and the parsed snapshot. The raw form
/// exists only to make reloads cheap; the parsed snapshot is the single
/// source of truth for name, version, and metadata fields.
pub struct DescriptorStore {
    /// Path to package.json
    descriptor_path: PathBuf,

    /// Output directory root (dist/)
    dist_dir: PathBuf,

    /// Raw bytes of the last successfully parsed descriptor
    raw: String,

    /// Current snapshot
    descriptor: ProjectDescriptor,
}

impl DescriptorStore {
    /// Load the descriptor from `<project_root>/package.json`
    ///
    /// A missing or malformed descriptor is fatal here: without a valid
    /// name and version no artifact can be produced.
    pub fn load(project_root: &Path, dist_dir: &Path) -> DescriptorResult<Self> {
        let descriptor_path = project_root.join(DESCRIPTOR_FILE);

        let raw = fs::read_to_string(&descriptor_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DescriptorError::NotFound(descriptor_path.clone())
            } else {
                DescriptorError::IoError(e)
            }
        })?;

        let descriptor = ProjectDescriptor::parse(&raw, &descriptor_path)?;

        Ok(Self {
            descriptor_path,
            dist_dir: dist_dir.to_path_buf(),
            raw,
            descriptor,
        })
    }

    /// Re-read the descriptor and replace the snapshot if its bytes changed
    ///
    /// Byte-identical content is a pure no-op: no re-parse, no directory
    /// creation. On change, the snapshot is replaced wholesale and the
    /// version-keyed output directory for the new version is created.
    ///
    /// A reload that fails to read or parse (a malformed edit mid-watch)
    /// logs a warning and retains the last-known-good snapshot; only the
    /// initial load treats a bad descriptor as fatal.
    pub fn refresh_if_changed(&mut self) -> DescriptorResult<RefreshOutcome> {
        let new_raw = match fs::read_to_string(&self.descriptor_path) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(
                    path = %self.descriptor_path.display(),
                    %error,
                    "descriptor unreadable on reload, keeping previous snapshot"
                );
                return Ok(RefreshOutcome::RetainedStale);
            }
        };

        if new_raw == self.raw {
            debug!("descriptor unchanged");
            return Ok(RefreshOutcome::Unchanged);
        }

        let descriptor = match ProjectDescriptor::parse(&new_raw, &self.descriptor_path) {
            Ok(descriptor) => descriptor,
            Err(error) => {
                warn!(
                    path = %self.descriptor_path.display(),
                    %error,
                    "descriptor invalid on reload, keeping previous snapshot"
                );
                return Ok(RefreshOutcome::RetainedStale);
            }
        };

        info!(version = %descriptor.version, "descriptor changed, updating");

        self.raw = new_raw;
        self.descriptor = descriptor;
        self.ensure_version_dir()?;

        Ok(RefreshOutcome::Changed)
    }

    /// Create `dist/<version>/` for the current version if missing
    pub fn ensure_version_dir(&self) -> DescriptorResult<PathBuf> {
        let dir = self.version_dir();
        fs::create_dir_all(&dir).map_err(|error| DescriptorError::OutputDirError {
            path: dir.clone(),
            error,
        })?;
        Ok(dir)
    }

    /// Current snapshot
    pub fn descriptor(&self) -> &ProjectDescriptor {
        &self.descriptor
    }

    /// Current package name
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Current package version
    pub fn version(&self) -> &str {
        &self.descriptor.version
    }

    /// Path of the descriptor file
    pub fn descriptor_path(&self) -> &Path {
        &self.descriptor_path
    }

    /// Output directory root
    pub fn dist_dir(&self) -> &Path {
        &self.dist_dir
    }

    /// Version-keyed output directory for the current version
    pub fn version_dir(&self) -> PathBuf {
        self.dist_dir.join(&self.descriptor.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_descriptor(dir: &Path, content: &str) {
        fs::write(dir.join(DESCRIPTOR_FILE), content).unwrap();
    }

    fn store_in(dir: &Path) -> DescriptorStore {
        DescriptorStore::load(dir, &dir.join("dist")).unwrap()
    }

    #[test]
    fn test_load_reads_and_parses() {
        let temp_dir = TempDir::new().unwrap();
        write_descriptor(temp_dir.path(), r#"{"name": "demo", "version": "1.0.0"}"#);

        let store = store_in(temp_dir.path());

        assert_eq!(store.name(), "demo");
        assert_eq!(store.version(), "1.0.0");
    }

    #[test]
    fn test_load_missing_descriptor_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let result = DescriptorStore::load(temp_dir.path(), &temp_dir.path().join("dist"));

        assert!(matches!(result, Err(DescriptorError::NotFound(_))));
    }

    #[test]
    fn test_load_malformed_descriptor_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        write_descriptor(temp_dir.path(), "{broken");

        let result = DescriptorStore::load(temp_dir.path(), &temp_dir.path().join("dist"));

        assert!(matches!(result, Err(DescriptorError::ParseError { .. })));
    }

    #[test]
    fn test_refresh_unchanged_is_pure_noop() {
        let temp_dir = TempDir::new().unwrap();
        write_descriptor(temp_dir.path(), r#"{"name": "demo", "version": "1.0.0"}"#);

        let mut store = store_in(temp_dir.path());
        let snapshot = store.descriptor().clone();

        let outcome = store.refresh_if_changed().unwrap();

        assert_eq!(outcome, RefreshOutcome::Unchanged);
        assert_eq!(store.descriptor(), &snapshot);
        // No spurious directory creation for the unchanged version
        assert!(!store.version_dir().exists());
    }

    #[test]
    fn test_refresh_changed_replaces_snapshot_and_creates_dir() {
        let temp_dir = TempDir::new().unwrap();
        write_descriptor(temp_dir.path(), r#"{"name": "demo", "version": "1.0.0"}"#);

        let mut store = store_in(temp_dir.path());
        write_descriptor(temp_dir.path(), r#"{"name": "demo", "version": "1.1.0"}"#);

        let outcome = store.refresh_if_changed().unwrap();

        assert_eq!(outcome, RefreshOutcome::Changed);
        assert_eq!(store.version(), "1.1.0");
        assert!(temp_dir.path().join("dist").join("1.1.0").is_dir());
    }

    #[test]
    fn test_refresh_whitespace_change_reparses() {
        // Change detection is byte equality, not semantic equality
        let temp_dir = TempDir::new().unwrap();
        write_descriptor(temp_dir.path(), r#"{"name": "demo", "version": "1.0.0"}"#);

        let mut store = store_in(temp_dir.path());
        write_descriptor(temp_dir.path(), r#"{"name":"demo","version":"1.0.0"}"#);

        let outcome = store.refresh_if_changed().unwrap();

        assert_eq!(outcome, RefreshOutcome::Changed);
        assert_eq!(store.version(), "1.0.0");
    }

    #[test]
    fn test_refresh_invalid_edit_retains_last_good() {
        let temp_dir = TempDir::new().unwrap();
        write_descriptor(temp_dir.path(), r#"{"name": "demo", "version": "1.0.0"}"#);

        let mut store = store_in(temp_dir.path());
        write_descriptor(temp_dir.path(), "{half an edi");

        let outcome = store.refresh_if_changed().unwrap();

        assert_eq!(outcome, RefreshOutcome::RetainedStale);
        assert_eq!(store.name(), "demo");
        assert_eq!(store.version(), "1.0.0");
    }

    #[test]
    fn test_refresh_after_invalid_edit_recovers() {
        let temp_dir = TempDir::new().unwrap();
        write_descriptor(temp_dir.path(), r#"{"name": "demo", "version": "1.0.0"}"#);

        let mut store = store_in(temp_dir.path());
        write_descriptor(temp_dir.path(), "{half an edi");
        store.refresh_if_changed().unwrap();

        write_descriptor(temp_dir.path(), r#"{"name": "demo", "version": "2.0.0"}"#);
        let outcome = store.refresh_if_changed().unwrap();

        assert_eq!(outcome, RefreshOutcome::Changed);
        assert_eq!(store.version(), "2.0.0");
    }

    #[test]
    fn test_refresh_missing_file_retains_last_good() {
        let temp_dir = TempDir::new().unwrap();
        write_descriptor(temp_dir.path(), r#"{"name": "demo", "version": "1.0.0"}"#);

        let mut store = store_in(temp_dir.path());
        fs::remove_file(temp_dir.path().join(DESCRIPTOR_FILE)).unwrap();

        let outcome = store.refresh_if_changed().unwrap();

        assert_eq!(outcome, RefreshOutcome::RetainedStale);
        assert_eq!(store.version(), "1.0.0");
    }
}
