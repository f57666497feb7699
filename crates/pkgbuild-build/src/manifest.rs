//! Per-version build manifest
//!
//! One `meta.json` per built version, describing the script files the
//! bundler emitted for it plus the dependency list and a build timestamp.
//! Rebuilding a version overwrites its manifest in place; a manifest only
//! describes the most recent build of that specific version.

use crate::error::{BuildError, BuildResult};
use crate::lifecycle::AssetReport;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Manifest file name within a version directory
pub const MANIFEST_FILE: &str = "meta.json";

/// Extension of script artifacts; everything else (maps, styles) is dropped
pub const SCRIPT_EXTENSION: &str = ".js";

/// Build manifest for one version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Emitted script basenames, in chunk declaration order
    pub files: Vec<String>,

    /// Version this manifest describes
    pub version: String,

    /// Dependencies as `name@version` strings
    #[serde(rename = "deps")]
    pub dependencies: Vec<String>,

    /// Wall-clock build time in milliseconds since the Unix epoch
    pub build_timestamp: i64,
}

/// Builds and writes per-version manifests
pub struct ManifestBuilder {
    dist_dir: PathBuf,
}

impl ManifestBuilder {
    /// Create a builder rooted at the given output directory
    pub fn new(dist_dir: &Path) -> Self {
        Self {
            dist_dir: dist_dir.to_path_buf(),
        }
    }

    /// Build a manifest from the bundler's asset report
    ///
    /// Flattens the report across all chunks, keeps only `.js` filenames,
    /// and reduces each to its basename. Stamped with the current time.
    pub fn build(&self, report: &AssetReport, dependencies: &[String], version: &str) -> Manifest {
        let files = report
            .all_files()
            .filter(|file| file.ends_with(SCRIPT_EXTENSION))
            .map(basename)
            .collect();

        Manifest {
            files,
            version: version.to_string(),
            dependencies: dependencies.to_vec(),
            build_timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Write a manifest to `dist/<version>/meta.json`, pretty-printed
    ///
    /// Creates the version directory first. Overwrites any prior manifest
    /// for the same version.
    pub fn write(&self, manifest: &Manifest) -> BuildResult<PathBuf> {
        let version_dir = self.dist_dir.join(&manifest.version);
        fs::create_dir_all(&version_dir).map_err(|e| BuildError::io(&version_dir, e))?;

        let path = version_dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(manifest)
            .map_err(|e| BuildError::serialize(MANIFEST_FILE, e))?;
        fs::write(&path, json).map_err(|e| BuildError::io(&path, e))?;

        info!(version = %manifest.version, files = manifest.files.len(), "wrote meta.json");
        Ok(path)
    }

    /// Path of the manifest artifact for a version
    pub fn manifest_path(&self, version: &str) -> PathBuf {
        self.dist_dir.join(version).join(MANIFEST_FILE)
    }
}

/// Directory-free final component of an emitted filename
fn basename(file: &str) -> String {
    Path::new(file)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string())
}
